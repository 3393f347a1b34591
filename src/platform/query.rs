use std::fmt;
use url::form_urlencoded;

/// An ordered list of query-string pairs.
///
/// `set`, `get` and `delete` follow the browser's `URLSearchParams`:
/// `set` rewrites the first pair with that name and drops any others,
/// `delete` removes every pair with that name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without its leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(name, _)| name == key)
    }

    pub fn set(&mut self, key: &str, value: &str) {
        match self.pairs.iter().position(|(name, _)| name == key) {
            Some(first) => {
                self.pairs[first].1 = value.to_string();
                let mut index = 0;
                self.pairs.retain(|(name, _)| {
                    let keep = index <= first || name != key;
                    index += 1;
                    keep
                });
            }
            None => self.pairs.push((key.to_string(), value.to_string())),
        }
    }

    pub fn delete(&mut self, key: &str) {
        self.pairs.retain(|(name, _)| name != key);
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Serializes without the leading `?`.
impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish();
        f.write_str(&encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strips_question_mark_and_decodes() {
        let params = QueryParams::parse("?tab=settings&q=hello+world&x=%26");
        assert_eq!(params.get("tab"), Some("settings"));
        assert_eq!(params.get("q"), Some("hello world"));
        assert_eq!(params.get("x"), Some("&"));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn set_replaces_first_and_drops_duplicates() {
        let mut params = QueryParams::parse("a=1&b=2&a=3");
        params.set("a", "9");
        assert_eq!(params.to_string(), "a=9&b=2");
    }

    #[test]
    fn set_appends_new_keys() {
        let mut params = QueryParams::parse("a=1");
        params.set("b", "two words");
        assert_eq!(params.to_string(), "a=1&b=two+words");
    }

    #[test]
    fn delete_removes_every_pair() {
        let mut params = QueryParams::parse("a=1&b=2&a=3");
        params.delete("a");
        assert!(!params.contains("a"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn empty_query() {
        let params = QueryParams::parse("");
        assert!(params.is_empty());
        assert_eq!(params.to_string(), "");
    }
}
