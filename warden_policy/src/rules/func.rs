//! Closure-backed policies.

use std::fmt;
use warden_core::{Actor, Decision, Entity, Policy};

/// A policy defined by a closure.
///
/// The closure must be pure; it is called concurrently from any thread
/// that performs checks.
pub struct FnPolicy<F> {
    name: String,
    check_fn: F,
}

impl<F> FnPolicy<F> {
    /// Wrap `check_fn` as a policy named `name`.
    pub fn new(name: impl Into<String>, check_fn: F) -> Self
    where
        F: Fn(&Actor, &str, &Entity) -> Decision + Send + Sync,
    {
        Self {
            name: name.into(),
            check_fn,
        }
    }
}

impl<F> fmt::Debug for FnPolicy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPolicy").field("name", &self.name).finish()
    }
}

impl<F> Policy for FnPolicy<F>
where
    F: Fn(&Actor, &str, &Entity) -> Decision + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, actor: &Actor, ability: &str, entity: &Entity) -> Decision {
        (self.check_fn)(actor, ability, entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::{ActorId, EntityId};

    #[test]
    fn test_fn_policy_delegates() {
        let policy = FnPolicy::new("archived", |_: &Actor, ability: &str, entity: &Entity| {
            let archived = entity.attribute("archived").and_then(|v| v.as_bool()).unwrap_or(false);
            if archived && ability != "project.view" {
                Decision::deny("project is archived")
            } else {
                Decision::Abstain
            }
        });

        let actor = Actor::new(ActorId::new());
        let project = Entity::new("project", EntityId::new()).with_attribute("archived", true);

        assert_eq!(policy.name(), "archived");
        assert!(policy.evaluate(&actor, "project.update", &project).is_denied());
        assert!(policy.evaluate(&actor, "project.view", &project).is_abstain());
    }
}
