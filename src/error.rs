/// Errors surfaced by the mirror.
///
/// Storage operations themselves never fail from the caller's point of view;
/// these cover wiring mistakes and bad configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `use_shared_state` was called from a scope with no provider above it.
    #[error("no SharedStateProvider is mounted above this scope")]
    MissingProvider,
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] url::ParseError),
    #[error("invalid provider options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_provider_message() {
        assert_eq!(
            Error::MissingProvider.to_string(),
            "no SharedStateProvider is mounted above this scope"
        );
    }

    #[test]
    fn parse_errors_convert() {
        let err: Error = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, Error::InvalidAddress(_)));
    }
}
