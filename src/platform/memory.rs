use super::{Platform, QueryParams};
use crate::error::Result;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use url::Url;

const DEFAULT_ADDRESS: &str = "http://localhost/";

/// An in-memory page: an address with a history stack and a durable store.
///
/// Used for headless hosts and tests. It behaves like a browser tab that
/// never reloads, and keeps count of history entries and in-place address
/// replacements so callers can check that writes never navigate.
#[derive(Debug)]
pub struct MemoryPlatform {
    address: RwLock<Url>,
    storage: RwLock<HashMap<String, String>>,
    history_len: AtomicUsize,
    replacements: AtomicUsize,
}

impl MemoryPlatform {
    pub fn new() -> Self {
        Self::from_url(Url::parse(DEFAULT_ADDRESS).expect("default address is a valid URL"))
    }

    /// Start at the given absolute address.
    pub fn with_address(address: &str) -> Result<Self> {
        Ok(Self::from_url(Url::parse(address)?))
    }

    fn from_url(address: Url) -> Self {
        Self {
            address: RwLock::new(address),
            storage: RwLock::new(HashMap::new()),
            history_len: AtomicUsize::new(1),
            replacements: AtomicUsize::new(0),
        }
    }

    /// The full current address.
    pub fn address(&self) -> String {
        self.address.read().to_string()
    }

    /// The current query parameters.
    pub fn query(&self) -> QueryParams {
        QueryParams::parse(self.address.read().query().unwrap_or(""))
    }

    /// Simulate a user navigation, pushing a new history entry.
    ///
    /// Relative addresses resolve against the current one.
    pub fn navigate(&self, address: &str) -> Result<()> {
        let mut current = self.address.write();
        *current = current.join(address)?;
        self.history_len.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    pub fn history_len(&self) -> usize {
        self.history_len.load(Ordering::SeqCst)
    }

    /// How many times the address was rewritten in place.
    pub fn replacements(&self) -> usize {
        self.replacements.load(Ordering::SeqCst)
    }

    /// A copy of everything in durable storage.
    pub fn durable_snapshot(&self) -> HashMap<String, String> {
        self.storage.read().clone()
    }
}

impl Default for MemoryPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for MemoryPlatform {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn query_param(&self, key: &str) -> Option<String> {
        self.query().get(key).map(str::to_string)
    }

    fn replace_query(&self, edit: &mut dyn FnMut(&mut QueryParams)) {
        let mut address = self.address.write();
        let mut params = QueryParams::parse(address.query().unwrap_or(""));
        edit(&mut params);
        if params.is_empty() {
            address.set_query(None);
        } else {
            address.set_query(Some(&params.to_string()));
        }
        self.replacements.fetch_add(1, Ordering::SeqCst);
    }

    fn storage_get(&self, key: &str) -> Option<String> {
        self.storage.read().get(key).cloned()
    }

    fn storage_set(&self, key: &str, value: &str) {
        self.storage
            .write()
            .insert(key.to_string(), value.to_string());
    }

    fn storage_remove(&self, key: &str) {
        self.storage.write().remove(key);
    }
}
