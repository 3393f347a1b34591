use super::SharedState;
use crate::error::{Error, Result};
use crate::options::ProviderOptions;
use crate::platform::Platform;
use crate::runtime::Scope;
use std::sync::Arc;
use tracing::info;

/// Owns one mirrored mapping for a subtree of the component tree.
///
/// Mounting creates a child scope beneath `parent` and provides a
/// [`SharedState`] there. Dropping the provider (or calling
/// [`unmount`](Self::unmount)) withdraws it from the scope and runs the
/// configured cleanup.
pub struct SharedStateProvider {
    scope: Scope,
    shared: SharedState,
}

impl SharedStateProvider {
    pub fn mount(parent: &Scope, platform: Arc<dyn Platform>, options: ProviderOptions) -> Self {
        let scope = parent.child();
        info!(platform = platform.name(), ?options, "mounting shared state");
        let shared = SharedState::new(platform, options);
        scope.provide(shared.clone());
        Self { scope, shared }
    }

    /// The scope the provider's subtree renders in.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn shared(&self) -> &SharedState {
        &self.shared
    }

    /// Tear down now rather than at end of scope.
    pub fn unmount(self) {}
}

impl Drop for SharedStateProvider {
    fn drop(&mut self) {
        self.scope.withdraw::<SharedState>();
        self.shared.teardown();
    }
}

/// Resolve the nearest provider's [`SharedState`] from `scope`.
pub fn use_shared_state(scope: &Scope) -> Result<SharedState> {
    scope
        .use_context::<SharedState>()
        .ok_or(Error::MissingProvider)
}
