use crate::options::{ProviderOptions, StoreOptions};
use crate::platform::{Platform, QueryParams};
use crate::store::{Store, Subscription};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Immutable snapshot of a provider's reactive mapping.
pub type StateMap = Arc<HashMap<String, String>>;

/// A key/value pair to mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for Entry {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

struct Inner {
    platform: Arc<dyn Platform>,
    options: ProviderOptions,
    state: Store<StateMap>,
    mounted: AtomicBool,
}

/// The capability a provider hands to its subtree.
///
/// Cloning is cheap; every clone talks to the same reactive mapping and the
/// same platform. Obtain one with [`use_shared_state`](crate::use_shared_state)
/// or [`SharedStateProvider::shared`](crate::SharedStateProvider::shared).
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tincan_mirror::{MemoryPlatform, ProviderOptions, Scope, SharedStateProvider};
///
/// let page = Arc::new(MemoryPlatform::new());
/// let root = Scope::root();
/// let provider = SharedStateProvider::mount(&root, page.clone(), ProviderOptions::default());
///
/// let shared = tincan_mirror::use_shared_state(&provider.scope().child()).unwrap();
/// shared.store(("tab", "billing"));
///
/// assert_eq!(shared.get_stored("tab").as_deref(), Some("billing"));
/// assert_eq!(page.address(), "http://localhost/?tab=billing");
/// ```
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<Inner>,
}

impl SharedState {
    pub(crate) fn new(platform: Arc<dyn Platform>, options: ProviderOptions) -> Self {
        Self {
            inner: Arc::new(Inner {
                platform,
                options,
                state: Store::new(StateMap::default()),
                mounted: AtomicBool::new(true),
            }),
        }
    }

    /// The provider-level defaults this handle applies.
    pub fn options(&self) -> &ProviderOptions {
        &self.inner.options
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.load(Ordering::SeqCst)
    }

    /// Write `entry` to every location not suppressed by the provider
    /// defaults.
    pub fn store(&self, entry: impl Into<Entry>) {
        self.store_with(entry, &StoreOptions::default());
    }

    /// Write `entry` with per-call overrides of the suppression flags.
    ///
    /// Locations are written in the order URL, reactive mapping, durable
    /// storage. Suppressed locations are skipped silently.
    pub fn store_with(&self, entry: impl Into<Entry>, options: &StoreOptions) {
        let Entry { key, value } = entry.into();
        if !self.is_mounted() {
            warn!(key = %key, "store after provider unmounted; ignoring");
            return;
        }

        let skip = self.inner.options.resolve(options);
        let platform = &self.inner.platform;

        if !skip.url {
            platform.replace_query(&mut |params: &mut QueryParams| params.set(&key, &value));
        }

        if !skip.state {
            self.inner.state.replace_if(|map| {
                if map.get(&key).is_some_and(|current| *current == value) {
                    return None;
                }
                let mut next = (**map).clone();
                next.insert(key.clone(), value.clone());
                Some(Arc::new(next))
            });
        }

        if !skip.durable {
            platform.storage_set(&key, &value);
        }

        debug!(
            key = %key,
            url = !skip.url,
            state = !skip.state,
            durable = !skip.durable,
            platform = platform.name(),
            "stored"
        );
    }

    /// Look `key` up in the URL, then the reactive mapping, then durable
    /// storage. The first non-empty value wins.
    pub fn get_stored(&self, key: &str) -> Option<String> {
        self.get_stored_with(key, &StoreOptions::default())
    }

    /// Like [`get_stored`](Self::get_stored), skipping the locations the
    /// resolved flags suppress.
    pub fn get_stored_with(&self, key: &str, options: &StoreOptions) -> Option<String> {
        let skip = self.inner.options.resolve(options);
        let platform = &self.inner.platform;

        let from_url = || (!skip.url).then(|| platform.query_param(key)).flatten();
        let from_state = || {
            (!skip.state)
                .then(|| self.inner.state.read(|map| map.get(key).cloned()))
                .flatten()
        };
        let from_durable = || (!skip.durable).then(|| platform.storage_get(key)).flatten();

        non_empty(from_url())
            .or_else(|| non_empty(from_state()))
            .or_else(|| non_empty(from_durable()))
    }

    /// Remove `key` from all three locations, whatever the suppression flags.
    pub fn clear_stored(&self, key: &str) {
        if !self.is_mounted() {
            warn!(key, "clear after provider unmounted; ignoring");
            return;
        }

        let platform = &self.inner.platform;
        platform.replace_query(&mut |params: &mut QueryParams| params.delete(key));

        self.inner.state.replace_if(|map| {
            if !map.contains_key(key) {
                return None;
            }
            let mut next = (**map).clone();
            next.remove(key);
            Some(Arc::new(next))
        });

        platform.storage_remove(key);
        debug!(key, platform = platform.name(), "cleared");
    }

    /// The reactive mapping as it is now.
    pub fn snapshot(&self) -> StateMap {
        self.inner.state.get()
    }

    /// Keys currently in the reactive mapping, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.inner.state.read(|map| map.keys().cloned().collect());
        keys.sort();
        keys
    }

    /// Observe changes to the reactive mapping.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&StateMap) + Send + Sync + 'static,
    {
        self.inner.state.subscribe(callback)
    }

    /// Run `f`, delivering at most one change notification for all the
    /// writes it makes.
    pub fn batch<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SharedState) -> R,
    {
        self.inner.state.batch(|| f(self))
    }

    /// Tear down once: drop this provider's keys from the URL and durable
    /// storage as configured.
    pub(crate) fn teardown(&self) {
        if !self.inner.mounted.swap(false, Ordering::SeqCst) {
            return;
        }

        let options = self.inner.options;
        let platform = &self.inner.platform;
        let keys = self.keys();

        if options.clear_url_on_unmount && !keys.is_empty() {
            platform.replace_query(&mut |params: &mut QueryParams| {
                for key in &keys {
                    params.delete(key);
                }
            });
        }

        if options.clear_durable_on_unmount {
            for key in &keys {
                platform.storage_remove(key);
            }
        }

        info!(
            keys = keys.len(),
            cleared_url = options.clear_url_on_unmount,
            cleared_durable = options.clear_durable_on_unmount,
            "shared state unmounted"
        );
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

impl fmt::Debug for SharedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedState")
            .field("platform", &self.inner.platform.name())
            .field("options", &self.inner.options)
            .field("mounted", &self.is_mounted())
            .field("keys", &self.keys())
            .finish()
    }
}
