//! Component-tree scopes.
//!
//! This module provides the explicit scope handles components use to share
//! capabilities with their descendants.

mod context;

pub use context::Scope;
