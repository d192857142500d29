//! # Warden Core
//!
//! Core data structures and collaborator interfaces for the warden
//! authorization engine.
//!
//! This crate defines the vocabulary shared by the other warden crates:
//!
//! - Type-safe identifiers for actors and entities
//! - The permission, entity, scope and decision data model
//! - The error hierarchy for registry, policy and configuration failures
//! - The traits the engine delegates to (policies, grant checks and
//!   permission sources)
//!
//! `warden_core` holds no state of its own. The registry, policy set and
//! engine live in `warden_registry`, `warden_policy` and `warden_engine`.

pub mod error;
pub mod id;
pub mod traits;
pub mod types;

// Re-export key items for convenience
pub use error::{ConfigError, Error, LoadError, PolicyError, RegistryError, SourceError};
pub use id::{ActorId, EntityId, Id};
pub use traits::{GrantChecker, PermissionSource, Policy};
pub use types::{Actor, Decision, DenyReason, Entity, EntityKind, Permission, Scope, Target};

/// A type alias for Result with our error types
pub type Result<T, E = error::Error> = std::result::Result<T, E>;
