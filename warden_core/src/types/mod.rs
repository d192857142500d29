//! Core data types.

pub mod actor;
pub mod decision;
pub mod entity;
pub mod permission;

pub use actor::Actor;
pub use decision::{Decision, DenyReason};
pub use entity::{Entity, EntityKind, Scope, Target};
pub use permission::Permission;
