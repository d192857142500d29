//! Ownership checks.

use std::collections::HashSet;
use warden_core::{Actor, Decision, Entity, Policy};

use super::ability_set;

/// Restricts the listed abilities to the entity's owner.
///
/// Other abilities, and entities without an owner, get `Abstain`.
#[derive(Debug, Clone)]
pub struct OwnershipPolicy {
    abilities: HashSet<String>,
}

impl OwnershipPolicy {
    /// Create a policy guarding `abilities`.
    pub fn new<I, S>(abilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            abilities: ability_set(abilities),
        }
    }
}

impl Policy for OwnershipPolicy {
    fn name(&self) -> &str {
        "ownership"
    }

    fn evaluate(&self, actor: &Actor, ability: &str, entity: &Entity) -> Decision {
        if !self.abilities.contains(ability) {
            return Decision::Abstain;
        }

        match entity.owner {
            None => Decision::Abstain,
            Some(owner) if owner == actor.id => Decision::Allow,
            Some(_) => Decision::deny(format!(
                "{} does not own {} {}",
                actor.label(),
                entity.kind,
                entity.id
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::{ActorId, EntityId};

    #[test]
    fn test_owner_allowed_other_denied() {
        let policy = OwnershipPolicy::new(["project.update"]);
        let owner = Actor::new(ActorId::new());
        let stranger = Actor::new(ActorId::new());
        let project = Entity::new("project", EntityId::new()).with_owner(owner.id);

        assert_eq!(policy.evaluate(&owner, "project.update", &project), Decision::Allow);
        assert!(policy.evaluate(&stranger, "project.update", &project).is_denied());
    }

    #[test]
    fn test_abstains_when_irrelevant() {
        let policy = OwnershipPolicy::new(["project.update"]);
        let actor = Actor::new(ActorId::new());
        let owned = Entity::new("project", EntityId::new()).with_owner(ActorId::new());
        let ownerless = Entity::new("project", EntityId::new());

        assert!(policy.evaluate(&actor, "project.view", &owned).is_abstain());
        assert!(policy.evaluate(&actor, "project.update", &ownerless).is_abstain());
    }
}
