//! Platform capabilities: the page address and durable storage.
//!
//! The mirror never asks "is there a page?" per call. A host picks one
//! [`Platform`] at startup and injects it into every provider:
//!
//! - [`BrowserPlatform`] (wasm32 only) talks to `window.location`,
//!   `window.history` and `localStorage`.
//! - [`MemoryPlatform`] simulates a page in memory.
//! - [`DetachedPlatform`] has no page at all (server rendering, workers);
//!   only the reactive mapping is live.

#[cfg(target_arch = "wasm32")]
mod browser;
mod memory;
mod query;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserPlatform;
pub use memory::MemoryPlatform;
pub use query::QueryParams;

use std::sync::Arc;

/// Address-bar and durable-storage access for one page.
///
/// Implementations treat every operation as infallible: failures are logged
/// and the step is skipped.
pub trait Platform: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Value of the query parameter `key` in the current address.
    fn query_param(&self, key: &str) -> Option<String>;

    /// Edit the query string and write it back in place, replacing the
    /// current history entry without navigating.
    fn replace_query(&self, edit: &mut dyn FnMut(&mut QueryParams));

    fn storage_get(&self, key: &str) -> Option<String>;

    fn storage_set(&self, key: &str, value: &str);

    fn storage_remove(&self, key: &str);
}

/// No page context: nothing to read, writes go nowhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedPlatform;

impl Platform for DetachedPlatform {
    fn name(&self) -> &'static str {
        "detached"
    }

    fn query_param(&self, _key: &str) -> Option<String> {
        None
    }

    fn replace_query(&self, _edit: &mut dyn FnMut(&mut QueryParams)) {}

    fn storage_get(&self, _key: &str) -> Option<String> {
        None
    }

    fn storage_set(&self, _key: &str, _value: &str) {}

    fn storage_remove(&self, _key: &str) {}
}

/// Pick the platform for this process: the browser page when a `window`
/// exists, otherwise [`DetachedPlatform`].
#[cfg(target_arch = "wasm32")]
pub fn detect() -> Arc<dyn Platform> {
    match BrowserPlatform::detect() {
        Some(browser) => Arc::new(browser),
        None => Arc::new(DetachedPlatform),
    }
}

/// Pick the platform for this process. Native hosts have no page.
#[cfg(not(target_arch = "wasm32"))]
pub fn detect() -> Arc<dyn Platform> {
    Arc::new(DetachedPlatform)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_is_inert() {
        let platform = DetachedPlatform;
        platform.storage_set("k", "v");
        platform.replace_query(&mut |params: &mut QueryParams| params.set("k", "v"));
        assert_eq!(platform.storage_get("k"), None);
        assert_eq!(platform.query_param("k"), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_detects_detached() {
        assert_eq!(detect().name(), "detached");
    }
}
