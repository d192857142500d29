//! Wiring a [`WardenConfig`] into a ready-to-use [`Authorizer`].

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use warden_core::error::ConfigError;
use warden_core::{Actor, ActorId, Entity, EntityId, Scope, Target};
use warden_engine::Authorizer;
use warden_policy::{CompositePolicy, OwnershipPolicy, PolicySet, StateGuardPolicy};
use warden_registry::{Grant, InMemoryGrantStore, PermissionRegistry};

use crate::config::{PolicyConfig, WardenConfig};
use crate::error::CliError;

/// Everything a check needs, built from one deployment file.
pub struct Deployment {
    authorizer: Authorizer<InMemoryGrantStore>,
    actors: HashMap<String, Actor>,
    entities: HashMap<String, Entity>,
    warnings: Vec<String>,
}

impl Deployment {
    pub fn build(config: WardenConfig) -> Result<Self, CliError> {
        let registry = Arc::new(PermissionRegistry::new());
        registry.load(config.permissions)?;

        let grants = InMemoryGrantStore::new();
        let mut actors = HashMap::new();
        let mut warnings = Vec::new();
        for actor_config in config.actors {
            let id = actor_config.id.unwrap_or_else(ActorId::new);
            let actor = if actor_config.superuser {
                Actor::superuser(id)
            } else {
                Actor::new(id)
            }
            .with_name(actor_config.name.clone());

            for grant in actor_config.grants {
                // Kept: the permission may be added by a later reload.
                if !registry.exists(&grant.permission) {
                    warn!(
                        actor = %actor_config.name,
                        permission = %grant.permission,
                        "Grant names an unknown permission"
                    );
                    warnings.push(format!(
                        "actor {} is granted unknown permission {}",
                        actor_config.name, grant.permission
                    ));
                }
                let grant = match grant.scope {
                    Some(scope) => Grant::scoped(grant.permission, scope),
                    None => Grant::global(grant.permission),
                };
                grants.grant(id, grant);
            }

            if actors.insert(actor_config.name.clone(), actor).is_some() {
                return Err(ConfigError::Invalid(format!(
                    "duplicate actor {}",
                    actor_config.name
                ))
                .into());
            }
        }

        let mut entities = HashMap::new();
        for entity_config in config.entities {
            let id = entity_config.id.unwrap_or_else(EntityId::new);
            let mut entity = Entity::new(entity_config.kind, id);
            if let Some(owner) = &entity_config.owner {
                let owner = actors.get(owner).ok_or_else(|| {
                    ConfigError::Invalid(format!(
                        "entity {} is owned by unknown actor {}",
                        entity_config.key, owner
                    ))
                })?;
                entity = entity.with_owner(owner.id);
            }
            entity.attributes = entity_config.attributes;

            if entities.insert(entity_config.key.clone(), entity).is_some() {
                return Err(ConfigError::Invalid(format!(
                    "duplicate entity {}",
                    entity_config.key
                ))
                .into());
            }
        }

        let mut policies = PolicySet::new();
        for policy_config in config.policies {
            let kind = policy_config.kind.clone();
            policies.register(kind, compose(policy_config))?;
        }

        info!(
            permissions = registry.len(),
            actors = actors.len(),
            entities = entities.len(),
            policies = policies.len(),
            warnings = warnings.len(),
            "Deployment loaded"
        );

        let authorizer =
            Authorizer::with_config(registry, Arc::new(policies), grants, config.engine);

        Ok(Self {
            authorizer,
            actors,
            entities,
            warnings,
        })
    }

    pub fn authorizer(&self) -> &Authorizer<InMemoryGrantStore> {
        &self.authorizer
    }

    /// Problems that did not stop the deployment from loading.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn actor(&self, name: &str) -> Result<&Actor, CliError> {
        self.actors
            .get(name)
            .ok_or_else(|| CliError::UnknownActor(name.to_string()))
    }

    pub fn entity(&self, key: &str) -> Result<&Entity, CliError> {
        self.entities
            .get(key)
            .ok_or_else(|| CliError::UnknownEntity(key.to_string()))
    }

    /// Resolve the command-line target, if any part of one was given.
    pub fn target(&self, entity: Option<&str>, scope: Option<&str>) -> Result<Option<Target>, CliError> {
        let entity = entity.map(|key| self.entity(key).cloned()).transpose()?;
        if entity.is_none() && scope.is_none() {
            return Ok(None);
        }
        Ok(Some(Target {
            scope: scope.map(Scope::new),
            entity,
        }))
    }
}

fn compose(config: PolicyConfig) -> CompositePolicy {
    let mut policy = CompositePolicy::new();
    if !config.owner_only.is_empty() {
        policy = policy.with(OwnershipPolicy::new(config.owner_only));
    }
    for guard in config.guards {
        policy = policy.with(StateGuardPolicy::new(
            guard.attribute,
            guard.equals,
            guard.abilities,
            guard.reason,
        ));
    }
    debug!(kind = %config.kind, rules = policy.len(), "Composed policy");
    policy
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::{Decision, DenyReason};

    const DEPLOYMENT: &str = r#"
[[permissions]]
name = "task.delete"
resource_kind = "task"
action = "delete"

[[permissions]]
name = "budget.approve"
resource_kind = "budget"
action = "approve"

[[actors]]
name = "alice"
grants = [{ permission = "task.delete" }, { permission = "budget.approve", scope = "org-1" }]

[[actors]]
name = "bob"
grants = [{ permission = "task.delete" }]

[[actors]]
name = "root"
superuser = true

[[entities]]
key = "alice-task"
kind = "task"
owner = "alice"

[[entities]]
key = "locked-task"
kind = "task"
owner = "alice"
attributes = { locked = true }

[[policies]]
kind = "task"
owner_only = ["task.delete"]

[[policies.guards]]
attribute = "locked"
equals = true
abilities = ["task.delete"]
reason = "task is locked"
"#;

    fn deployment() -> Deployment {
        Deployment::build(WardenConfig::parse(DEPLOYMENT).unwrap()).unwrap()
    }

    fn check(deployment: &Deployment, actor: &str, ability: &str, entity: Option<&str>, scope: Option<&str>) -> Decision {
        let actor = deployment.actor(actor).unwrap();
        let target = deployment.target(entity, scope).unwrap();
        deployment.authorizer().check(actor, ability, target.as_ref())
    }

    #[test]
    fn test_owner_may_delete_own_task() {
        let deployment = deployment();
        assert_eq!(check(&deployment, "alice", "task.delete", Some("alice-task"), None), Decision::Allow);
    }

    #[test]
    fn test_other_actor_denied_by_policy() {
        let deployment = deployment();
        let decision = check(&deployment, "bob", "task.delete", Some("alice-task"), None);
        assert!(matches!(decision, Decision::Deny(DenyReason::PolicyDenied(_))));
    }

    #[test]
    fn test_state_guard_applies_to_owner() {
        let deployment = deployment();
        let decision = check(&deployment, "alice", "task.delete", Some("locked-task"), None);
        assert_eq!(decision, Decision::deny("task is locked"));
    }

    #[test]
    fn test_scoped_grant() {
        let deployment = deployment();
        assert_eq!(check(&deployment, "alice", "budget.approve", None, Some("org-1")), Decision::Allow);
        assert_eq!(
            check(&deployment, "alice", "budget.approve", None, Some("org-2")),
            Decision::Deny(DenyReason::NotGranted)
        );
        assert_eq!(
            check(&deployment, "alice", "budget.approve", None, None),
            Decision::Deny(DenyReason::NotGranted)
        );
    }

    #[test]
    fn test_superuser_and_unknown_ability() {
        let deployment = deployment();
        assert_eq!(check(&deployment, "root", "anything.at-all", None, None), Decision::Allow);
        assert_eq!(
            check(&deployment, "alice", "task.fly", None, None),
            Decision::Deny(DenyReason::UnknownAbility)
        );
    }

    #[test]
    fn test_unknown_names() {
        let deployment = deployment();
        assert!(matches!(deployment.actor("mallory"), Err(CliError::UnknownActor(_))));
        assert!(matches!(deployment.target(Some("nope"), None), Err(CliError::UnknownEntity(_))));
        assert!(deployment.target(None, None).unwrap().is_none());
    }

    #[test]
    fn test_unknown_grant_is_a_warning() {
        let deployment = deployment();
        assert!(deployment.warnings().is_empty());

        let config = WardenConfig::parse(
            r#"
[[actors]]
name = "erin"
grants = [{ permission = "task.delete" }]
"#,
        )
        .unwrap();
        let deployment = Deployment::build(config).unwrap();
        assert_eq!(
            deployment.warnings(),
            ["actor erin is granted unknown permission task.delete".to_string()]
        );
        let erin = deployment.actor("erin").unwrap();
        assert_eq!(
            deployment.authorizer().check(erin, "task.delete", None),
            Decision::Deny(DenyReason::UnknownAbility)
        );
    }

    #[test]
    fn test_invalid_deployments() {
        let unknown_owner = r#"
[[entities]]
key = "t"
kind = "task"
owner = "ghost"
"#;
        let result = Deployment::build(WardenConfig::parse(unknown_owner).unwrap());
        assert!(matches!(result, Err(CliError::Config(ConfigError::Invalid(_)))));

        let duplicate_permission = r#"
[[permissions]]
name = "task.delete"
resource_kind = "task"
action = "delete"

[[permissions]]
name = "task.delete"
resource_kind = "task"
action = "remove"
"#;
        let result = Deployment::build(WardenConfig::parse(duplicate_permission).unwrap());
        assert!(matches!(result, Err(CliError::Load(_))));

        let duplicate_policy = r#"
[[policies]]
kind = "task"
[[policies]]
kind = "task"
"#;
        let result = Deployment::build(WardenConfig::parse(duplicate_policy).unwrap());
        assert!(matches!(result, Err(CliError::Policy(_))));
    }
}
