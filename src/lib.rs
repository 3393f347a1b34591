//! # Tincan Mirror
//!
//! Shared UI state mirrored across three places at once.
//!
//! A [`SharedStateProvider`] owns a small string-to-string mapping for a
//! subtree of components. Descendants resolve its [`SharedState`] handle
//! from their [`Scope`] and use three operations:
//!
//! - `store` writes a pair to the page's query string (in place, no
//!   navigation), to the provider's reactive [`Store`], and to durable
//!   per-origin storage. Each location can be suppressed per provider or
//!   per call.
//! - `get_stored` reads the URL first, then the reactive mapping, then
//!   durable storage.
//! - `clear_stored` removes a key everywhere.
//!
//! The page itself sits behind the [`Platform`] trait, chosen once at
//! startup: the real browser on wasm32, an in-memory page for tests and
//! headless hosts, or a detached platform when there is no page at all.
//!
//! ```
//! use std::sync::Arc;
//! use tincan_mirror::{use_shared_state, MemoryPlatform, ProviderOptions, Scope, SharedStateProvider};
//!
//! let page = Arc::new(MemoryPlatform::new());
//! let root = Scope::root();
//! let options = ProviderOptions::default().with_clear_url_on_unmount(true);
//! let provider = SharedStateProvider::mount(&root, page.clone(), options);
//!
//! let filters = use_shared_state(&provider.scope().child()).unwrap();
//! filters.store(("sort", "newest"));
//! assert_eq!(filters.get_stored("sort").as_deref(), Some("newest"));
//!
//! drop(provider);
//! assert_eq!(page.address(), "http://localhost/");
//! ```

pub mod error;
pub mod options;
pub mod platform;
pub mod provider;
pub mod runtime;
pub mod store;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use options::{ProviderOptions, StoreOptions};
pub use platform::{DetachedPlatform, MemoryPlatform, Platform, QueryParams};
pub use provider::{use_shared_state, Entry, SharedState, SharedStateProvider, StateMap};
pub use runtime::Scope;
pub use store::{Store, Subscription};

#[cfg(target_arch = "wasm32")]
pub use platform::BrowserPlatform;
