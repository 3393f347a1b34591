//! Reactive state containers.
//!
//! A [`Store`] holds a value, notifies subscribers when it changes and can
//! coalesce several writes into one notification.

mod store;

pub use store::{Store, Subscription};
