//! Provider configuration and per-call overrides.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Defaults for every operation run through one provider.
///
/// All flags default to `false`: writes fan out to all three locations and
/// nothing is cleaned up on teardown.
///
/// ```
/// use tincan_mirror::ProviderOptions;
///
/// let options = ProviderOptions::from_json(r#"{ "suppressDurable": true }"#).unwrap();
/// assert!(options.suppress_durable);
/// assert!(!options.suppress_url);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderOptions {
    /// Skip the query-string location.
    pub suppress_url: bool,
    /// Skip durable storage.
    pub suppress_durable: bool,
    /// Skip the reactive mapping.
    pub suppress_state: bool,
    /// Remove this provider's keys from the URL when it is torn down.
    pub clear_url_on_unmount: bool,
    /// Remove this provider's keys from durable storage when it is torn down.
    pub clear_durable_on_unmount: bool,
}

impl ProviderOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_suppress_url(mut self, value: bool) -> Self {
        self.suppress_url = value;
        self
    }

    pub fn with_suppress_durable(mut self, value: bool) -> Self {
        self.suppress_durable = value;
        self
    }

    pub fn with_suppress_state(mut self, value: bool) -> Self {
        self.suppress_state = value;
        self
    }

    pub fn with_clear_url_on_unmount(mut self, value: bool) -> Self {
        self.clear_url_on_unmount = value;
        self
    }

    pub fn with_clear_durable_on_unmount(mut self, value: bool) -> Self {
        self.clear_durable_on_unmount = value;
        self
    }

    /// Effective suppression flags for one call.
    pub fn resolve(&self, overrides: &StoreOptions) -> Suppression {
        Suppression {
            url: overrides.suppress_url.unwrap_or(self.suppress_url),
            durable: overrides.suppress_durable.unwrap_or(self.suppress_durable),
            state: overrides.suppress_state.unwrap_or(self.suppress_state),
        }
    }
}

/// Per-call overrides of the provider's suppression flags.
///
/// `None` keeps the provider default. Teardown flags cannot be overridden
/// per call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreOptions {
    pub suppress_url: Option<bool>,
    pub suppress_durable: Option<bool>,
    pub suppress_state: Option<bool>,
}

impl StoreOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suppress_url(mut self, value: bool) -> Self {
        self.suppress_url = Some(value);
        self
    }

    pub fn suppress_durable(mut self, value: bool) -> Self {
        self.suppress_durable = Some(value);
        self
    }

    pub fn suppress_state(mut self, value: bool) -> Self {
        self.suppress_state = Some(value);
        self
    }
}

/// Resolved flags: `true` means the location is skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Suppression {
    pub url: bool,
    pub durable: bool,
    pub state: bool,
}
