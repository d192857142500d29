//! Policy composition.

use std::sync::Arc;
use warden_core::{Actor, Decision, Entity, Policy};

/// Combines several policies for one entity kind.
///
/// The first `Deny` wins. Otherwise any `Allow` yields `Allow`, and if
/// every member abstains so does the composite.
#[derive(Clone, Default)]
pub struct CompositePolicy {
    policies: Vec<Arc<dyn Policy>>,
}

impl CompositePolicy {
    /// Create an empty composite.
    pub fn new() -> Self {
        Self { policies: Vec::new() }
    }

    /// Add a member policy.
    pub fn with<P: Policy + 'static>(mut self, policy: P) -> Self {
        self.policies.push(Arc::new(policy));
        self
    }

    /// Add an already shared member policy.
    pub fn push(&mut self, policy: Arc<dyn Policy>) {
        self.policies.push(policy);
    }

    /// Number of member policies.
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Whether there are no member policies.
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl std::fmt::Debug for CompositePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.policies.iter().map(|p| p.name()).collect();
        f.debug_struct("CompositePolicy").field("policies", &names).finish()
    }
}

impl Policy for CompositePolicy {
    fn name(&self) -> &str {
        "composite"
    }

    fn evaluate(&self, actor: &Actor, ability: &str, entity: &Entity) -> Decision {
        let mut allowed = false;
        for policy in &self.policies {
            match policy.evaluate(actor, ability, entity) {
                deny @ Decision::Deny(_) => return deny,
                Decision::Allow => allowed = true,
                Decision::Abstain => {}
            }
        }

        if allowed {
            Decision::Allow
        } else {
            Decision::Abstain
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{OwnershipPolicy, StateGuardPolicy};
    use warden_core::{ActorId, EntityId};

    fn task_policy() -> CompositePolicy {
        CompositePolicy::new()
            .with(OwnershipPolicy::new(["task.delete"]))
            .with(StateGuardPolicy::new("locked", true, ["task.delete"], "task is locked"))
    }

    #[test]
    fn test_deny_wins_over_allow() {
        let owner = Actor::new(ActorId::new());
        let task = Entity::new("task", EntityId::new())
            .with_owner(owner.id)
            .with_attribute("locked", true);

        assert_eq!(task_policy().evaluate(&owner, "task.delete", &task), Decision::deny("task is locked"));
    }

    #[test]
    fn test_allow_when_any_member_allows() {
        let owner = Actor::new(ActorId::new());
        let task = Entity::new("task", EntityId::new()).with_owner(owner.id);

        assert_eq!(task_policy().evaluate(&owner, "task.delete", &task), Decision::Allow);
    }

    #[test]
    fn test_abstain_when_all_abstain() {
        let actor = Actor::new(ActorId::new());
        let task = Entity::new("task", EntityId::new());

        assert!(task_policy().evaluate(&actor, "task.view", &task).is_abstain());
        assert!(CompositePolicy::new().evaluate(&actor, "task.view", &task).is_abstain());
    }
}
