//! # Warden Policy
//!
//! `warden_policy` maps entity kinds to the policies that guard them.
//!
//! Key concepts:
//!
//! 1. **Policy Set**: one policy per entity kind, registered at startup and
//!    read-only afterwards.
//!
//! 2. **Rules**: reusable policy building blocks (ownership, state guards,
//!    composition, closures) that cover the common cases without a
//!    hand-written `Policy` impl.
//!
//! Policies only restrict. The engine still requires the permission layer
//! to grant an ability even when a policy answers `Allow`.

pub mod rules;
pub mod set;

pub use rules::{CompositePolicy, FnPolicy, OwnershipPolicy, StateGuardPolicy};
pub use set::PolicySet;
