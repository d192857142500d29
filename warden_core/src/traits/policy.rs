//! Entity policies.

use crate::types::{Actor, Decision, Entity};

/// Authorization rules specific to one kind of entity.
///
/// Implementations must be pure functions of their inputs and must return
/// [`Decision::Abstain`] when the ability is irrelevant to the entity kind.
/// A policy can restrict what the permission layer allows, but an `Allow`
/// from a policy never grants an ability the actor does not hold.
pub trait Policy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Evaluate `ability` for `actor` against `entity`.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor performing the check.
    /// * `ability` - The permission name being checked.
    /// * `entity` - The entity the ability targets.
    ///
    /// # Returns
    ///
    /// `Allow`, `Deny` with a reason, or `Abstain` when no rule applies.
    fn evaluate(&self, actor: &Actor, ability: &str, entity: &Entity) -> Decision;
}
