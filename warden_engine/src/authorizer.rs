//! The authorization engine.

use std::sync::Arc;

use tracing::{debug, warn};
use warden_core::{Actor, ActorId, Decision, DenyReason, GrantChecker, Target};
use warden_policy::PolicySet;
use warden_registry::PermissionRegistry;

use crate::audit::AuditLog;
use crate::cache::{CacheKey, DecisionCache};
use crate::config::EngineConfig;

/// Decides whether actors may perform abilities.
///
/// `Authorizer` is `Send + Sync`; share it behind an `Arc` and call
/// [`check`](Self::check) from as many threads as needed. The registry it
/// reads can be reloaded concurrently.
pub struct Authorizer<G> {
    /// Active permissions.
    registry: Arc<PermissionRegistry>,

    /// Per-entity-kind policies.
    policies: Arc<PolicySet>,

    /// Answers whether an actor holds a permission.
    grants: G,

    /// Memo used by `check_cached`.
    cache: DecisionCache,

    /// Trail of top-level decisions.
    audit: AuditLog,

    config: EngineConfig,
}

impl<G: GrantChecker> Authorizer<G> {
    /// Create an authorizer with the default configuration.
    pub fn new(registry: Arc<PermissionRegistry>, policies: Arc<PolicySet>, grants: G) -> Self {
        Self::with_config(registry, policies, grants, EngineConfig::default())
    }

    /// Create an authorizer with an explicit configuration.
    pub fn with_config(
        registry: Arc<PermissionRegistry>,
        policies: Arc<PolicySet>,
        grants: G,
        config: EngineConfig,
    ) -> Self {
        Self {
            registry,
            policies,
            grants,
            cache: DecisionCache::with_capacity(config.cache_capacity),
            audit: AuditLog::new(config.audit_max_entries_per_actor),
            config,
        }
    }

    /// Check whether `actor` may perform `ability`.
    ///
    /// Never returns [`Decision::Abstain`].
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor to check.
    /// * `ability` - The permission name.
    /// * `target` - Optional scope and entity the ability applies to.
    ///
    /// # Returns
    ///
    /// `Allow`, or `Deny` with the reason.
    pub fn check(&self, actor: &Actor, ability: &str, target: Option<&Target>) -> Decision {
        let decision = self.evaluate(actor, ability, target);
        self.audit.record(actor, ability, target, &decision, false);
        decision
    }

    /// Like [`check`](Self::check), but memoized per actor, ability, entity
    /// and scope.
    ///
    /// Cached decisions are dropped when the registry reloads and by
    /// [`invalidate`](Self::invalidate). With the cache disabled this is
    /// the same as `check`.
    ///
    /// The key holds the entity id, not the entity's state. Grant changes
    /// and entity changes (owner, attributes) are not seen until the
    /// affected actors are invalidated.
    pub fn check_cached(&self, actor: &Actor, ability: &str, target: Option<&Target>) -> Decision {
        // The bypass is cheaper than a lookup and must not be memoized
        // under an id whose superuser flag can change.
        if !self.config.cache_enabled || actor.is_superuser {
            return self.check(actor, ability, target);
        }

        let key = CacheKey::for_check(actor, ability, target);
        // Read both before evaluating: a reload or invalidation in between
        // only tags the entry as older than it is, which makes it a miss.
        let generation = self.registry.generation();
        let epoch = self.cache.epoch(&actor.id);

        if let Some(decision) = self.cache.get(&key, generation) {
            debug!(actor = %actor.label(), ability, %decision, "Cached authorization decision");
            self.audit.record(actor, ability, target, &decision, true);
            return decision;
        }

        let decision = self.evaluate(actor, ability, target);
        self.cache.insert(key, decision.clone(), generation, epoch);
        self.audit.record(actor, ability, target, &decision, false);
        decision
    }

    /// Convenience wrapper returning whether `check` allows the ability.
    pub fn is_allowed(&self, actor: &Actor, ability: &str, target: Option<&Target>) -> bool {
        self.check(actor, ability, target).is_allowed()
    }

    /// Forget every cached decision for `actor` (e.g. after a role change
    /// or a change to an entity the actor checked against).
    ///
    /// Checks already in flight for `actor` do not repopulate the cache.
    pub fn invalidate(&self, actor: &ActorId) {
        self.cache.invalidate(actor);
    }

    /// The permission registry.
    pub fn registry(&self) -> &Arc<PermissionRegistry> {
        &self.registry
    }

    /// The policy set.
    pub fn policies(&self) -> &Arc<PolicySet> {
        &self.policies
    }

    /// The grant checker.
    pub fn grants(&self) -> &G {
        &self.grants
    }

    /// The decision cache.
    pub fn cache(&self) -> &DecisionCache {
        &self.cache
    }

    /// The audit log.
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn evaluate(&self, actor: &Actor, ability: &str, target: Option<&Target>) -> Decision {
        if actor.is_superuser {
            debug!(actor = %actor.label(), ability, "Superuser bypass");
            return Decision::Allow;
        }

        // Fail closed until a permission set has loaded.
        let Some(permissions) = self.registry.snapshot() else {
            warn!(actor = %actor.label(), ability, "Permission registry not loaded, denying");
            return Decision::Deny(DenyReason::RegistryUnavailable);
        };

        let Some(permission) = permissions.get(ability) else {
            warn!(actor = %actor.label(), ability, "Unknown ability, denying");
            return Decision::Deny(DenyReason::UnknownAbility);
        };

        let scope = target.and_then(|t| t.scope.as_ref());

        if let Some(entity) = target.and_then(|t| t.entity.as_ref()) {
            match self.policies.resolve(&entity.kind) {
                Ok(policy) => {
                    let verdict = policy.evaluate(actor, ability, entity);
                    debug!(
                        actor = %actor.label(),
                        ability,
                        kind = %entity.kind,
                        entity = %entity.id,
                        policy = policy.name(),
                        %verdict,
                        "Policy evaluated"
                    );
                    // Allow and Abstain both defer to the grant check.
                    if verdict.is_denied() {
                        return verdict;
                    }
                }
                Err(_) => {
                    debug!(kind = %entity.kind, "No policy for entity kind, abstaining");
                }
            }
        }

        let decision = if self.grants.holds(actor, permission, scope) {
            Decision::Allow
        } else {
            Decision::Deny(DenyReason::NotGranted)
        };
        debug!(actor = %actor.label(), ability, scope = ?scope, %decision, "Authorization decision");
        decision
    }
}
