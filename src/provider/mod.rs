//! The shared-state provider and the capability it hands to descendants.

mod provider;
mod shared_state;

pub use provider::{use_shared_state, SharedStateProvider};
pub use shared_state::{Entry, SharedState, StateMap};
