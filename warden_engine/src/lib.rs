//! # Warden Engine
//!
//! `warden_engine` answers one question: may this actor perform this
//! ability, optionally on this entity and within this scope?
//!
//! The evaluation order is fixed:
//!
//! 1. **Superuser bypass**: superusers are allowed unconditionally.
//! 2. **Registry**: an unloaded registry or an unknown ability is denied.
//! 3. **Policy**: an entity's policy may deny; it can never grant.
//! 4. **Grant**: the actor must hold the permission for the scope.
//!
//! Anything not explicitly allowed is denied.

pub mod audit;
pub mod authorizer;
pub mod cache;
pub mod config;

pub use audit::{AuditEntry, AuditLog};
pub use authorizer::Authorizer;
pub use cache::{CacheKey, DecisionCache};
pub use config::EngineConfig;
