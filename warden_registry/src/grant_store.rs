//! In-memory grant store.
//!
//! Records which permissions each actor holds directly. This is the
//! default [`GrantChecker`] the engine is wired with when no external role
//! system is plugged in.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;
use warden_core::{Actor, ActorId, GrantChecker, Permission, Scope};

/// A permission held by an actor, optionally limited to one scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grant {
    /// Permission name.
    pub permission: String,

    /// `None` grants the permission in every scope.
    pub scope: Option<Scope>,
}

impl Grant {
    /// A grant valid in every scope.
    pub fn global(permission: impl Into<String>) -> Self {
        Self {
            permission: permission.into(),
            scope: None,
        }
    }

    /// A grant valid only within `scope`.
    pub fn scoped(permission: impl Into<String>, scope: impl Into<Scope>) -> Self {
        Self {
            permission: permission.into(),
            scope: Some(scope.into()),
        }
    }
}

/// An in-memory grant store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGrantStore {
    /// Grants, indexed by actor.
    grants: Arc<DashMap<ActorId, HashSet<Grant>>>,
}

impl InMemoryGrantStore {
    /// Create a new, empty grant store.
    pub fn new() -> Self {
        Self {
            grants: Arc::new(DashMap::new()),
        }
    }

    /// Give `actor` a grant. Returns `false` if it already held it.
    pub fn grant(&self, actor: ActorId, grant: Grant) -> bool {
        debug!(%actor, permission = %grant.permission, scope = ?grant.scope, "Granting permission");
        self.grants.entry(actor).or_default().insert(grant)
    }

    /// Remove one grant. Returns `false` if the actor did not hold it.
    pub fn revoke(&self, actor: &ActorId, grant: &Grant) -> bool {
        match self.grants.get_mut(actor) {
            Some(mut grants) => grants.remove(grant),
            None => false,
        }
    }

    /// Remove every grant held by `actor`.
    pub fn revoke_all(&self, actor: &ActorId) {
        self.grants.remove(actor);
    }

    /// All grants held by `actor`.
    pub fn grants_for(&self, actor: &ActorId) -> Vec<Grant> {
        self.grants
            .get(actor)
            .map(|grants| grants.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl GrantChecker for InMemoryGrantStore {
    /// An unscoped grant satisfies any check. A scoped grant satisfies only
    /// a check carrying the same scope; a check without a scope needs an
    /// unscoped grant.
    fn holds(&self, actor: &Actor, permission: &Permission, scope: Option<&Scope>) -> bool {
        let Some(grants) = self.grants.get(&actor.id) else {
            return false;
        };

        grants.iter().any(|grant| {
            grant.permission == permission.name
                && match (&grant.scope, scope) {
                    (None, _) => true,
                    (Some(granted), Some(requested)) => granted == requested,
                    (Some(_), None) => false,
                }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_grant_matches_any_scope() {
        let store = InMemoryGrantStore::new();
        let actor = Actor::new(ActorId::new());
        let permission = Permission::new("task", "delete");

        assert!(!store.holds(&actor, &permission, None));

        store.grant(actor.id, Grant::global("task.delete"));
        assert!(store.holds(&actor, &permission, None));
        assert!(store.holds(&actor, &permission, Some(&Scope::from("org-1"))));
        assert!(!store.holds(&actor, &Permission::new("task", "view"), None));
    }

    #[test]
    fn test_scoped_grant_matches_only_its_scope() {
        let store = InMemoryGrantStore::new();
        let actor = Actor::new(ActorId::new());
        let permission = Permission::new("budget", "approve");

        store.grant(actor.id, Grant::scoped("budget.approve", "org-1"));

        assert!(store.holds(&actor, &permission, Some(&Scope::from("org-1"))));
        assert!(!store.holds(&actor, &permission, Some(&Scope::from("org-2"))));
        assert!(!store.holds(&actor, &permission, None));
    }

    #[test]
    fn test_grants_are_per_actor() {
        let store = InMemoryGrantStore::new();
        let alice = Actor::new(ActorId::new());
        let bob = Actor::new(ActorId::new());

        store.grant(alice.id, Grant::global("task.delete"));

        assert!(store.holds(&alice, &Permission::new("task", "delete"), None));
        assert!(!store.holds(&bob, &Permission::new("task", "delete"), None));
    }

    #[test]
    fn test_grant_and_revoke() {
        let store = InMemoryGrantStore::new();
        let actor = ActorId::new();
        let grant = Grant::global("task.delete");

        assert!(store.grant(actor, grant.clone()));
        assert!(!store.grant(actor, grant.clone()));
        assert_eq!(store.grants_for(&actor), vec![grant.clone()]);

        assert!(store.revoke(&actor, &grant));
        assert!(!store.revoke(&actor, &grant));
        assert!(store.grants_for(&actor).is_empty());
    }

    #[test]
    fn test_revoke_all() {
        let store = InMemoryGrantStore::new();
        let actor = ActorId::new();
        store.grant(actor, Grant::global("task.delete"));
        store.grant(actor, Grant::scoped("task.view", "org-1"));

        store.revoke_all(&actor);
        assert!(store.grants_for(&actor).is_empty());
    }
}
