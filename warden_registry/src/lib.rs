//! # Warden Registry
//!
//! `warden_registry` holds the data the engine checks abilities against:
//!
//! 1. **Permission Registry**: the active set of named permissions,
//!    replaced atomically on reload. Readers always see a complete set.
//!
//! 2. **Grant Store**: an in-memory record of which actors hold which
//!    permissions, optionally narrowed to a scope.
//!
//! A registry that has never loaded successfully is reported as unloaded,
//! which the engine treats as fail-closed.

pub mod grant_store;
pub mod registry;
pub mod retry;
pub mod set;

pub use grant_store::{Grant, InMemoryGrantStore};
pub use registry::PermissionRegistry;
pub use retry::RetryPolicy;
pub use set::PermissionSet;
