//! State guards.

use std::collections::HashSet;
use serde_json::Value;
use warden_core::{Actor, Decision, Entity, Policy};

use super::ability_set;

/// Denies the listed abilities while an entity attribute holds a given value.
///
/// For example, deny `task.update` and `task.delete` while `locked == true`.
#[derive(Debug, Clone)]
pub struct StateGuardPolicy {
    attribute: String,
    blocked: Value,
    abilities: HashSet<String>,
    reason: String,
}

impl StateGuardPolicy {
    /// Create a guard.
    ///
    /// # Arguments
    ///
    /// * `attribute` - The entity attribute to inspect.
    /// * `blocked` - The value that blocks the abilities.
    /// * `abilities` - The abilities to block.
    /// * `reason` - Reason reported in the denial.
    pub fn new<I, S>(
        attribute: impl Into<String>,
        blocked: impl Into<Value>,
        abilities: I,
        reason: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attribute: attribute.into(),
            blocked: blocked.into(),
            abilities: ability_set(abilities),
            reason: reason.into(),
        }
    }
}

impl Policy for StateGuardPolicy {
    fn name(&self) -> &str {
        "state-guard"
    }

    fn evaluate(&self, _actor: &Actor, ability: &str, entity: &Entity) -> Decision {
        if self.abilities.contains(ability) && entity.attribute(&self.attribute) == Some(&self.blocked) {
            Decision::deny(self.reason.clone())
        } else {
            Decision::Abstain
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::{ActorId, DenyReason, EntityId};

    fn locked_guard() -> StateGuardPolicy {
        StateGuardPolicy::new("locked", true, ["task.update", "task.delete"], "task is locked")
    }

    #[test]
    fn test_blocks_when_attribute_matches() {
        let actor = Actor::new(ActorId::new());
        let task = Entity::new("task", EntityId::new()).with_attribute("locked", true);

        assert_eq!(
            locked_guard().evaluate(&actor, "task.delete", &task),
            Decision::Deny(DenyReason::PolicyDenied("task is locked".into()))
        );
    }

    #[test]
    fn test_abstains_otherwise() {
        let guard = locked_guard();
        let actor = Actor::new(ActorId::new());
        let unlocked = Entity::new("task", EntityId::new()).with_attribute("locked", false);
        let unknown = Entity::new("task", EntityId::new());
        let locked = Entity::new("task", EntityId::new()).with_attribute("locked", true);

        assert!(guard.evaluate(&actor, "task.delete", &unlocked).is_abstain());
        assert!(guard.evaluate(&actor, "task.delete", &unknown).is_abstain());
        assert!(guard.evaluate(&actor, "task.view", &locked).is_abstain());
    }

    #[test]
    fn test_string_states() {
        let guard = StateGuardPolicy::new("status", "closed", ["budget.spend"], "budget is closed");
        let actor = Actor::new(ActorId::new());
        let closed = Entity::new("budget", EntityId::new()).with_attribute("status", "closed");
        let open = Entity::new("budget", EntityId::new()).with_attribute("status", "open");

        assert!(guard.evaluate(&actor, "budget.spend", &closed).is_denied());
        assert!(guard.evaluate(&actor, "budget.spend", &open).is_abstain());
    }
}
