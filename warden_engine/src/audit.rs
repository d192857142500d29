//! Decision auditing.
//!
//! This module keeps a bounded, in-memory trail of top-level decisions per
//! actor. Nothing is persisted.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Serialize, Deserialize};
use warden_core::{Actor, ActorId, Decision, EntityId, EntityKind, Scope, Target};

/// An audit log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the decision was made.
    pub timestamp: DateTime<Utc>,

    /// The actor the check was performed for.
    pub actor_id: ActorId,

    /// Whether the actor was a superuser at the time.
    pub superuser: bool,

    /// The ability that was checked.
    pub ability: String,

    /// Kind of the targeted entity, if any.
    pub entity_kind: Option<EntityKind>,

    /// Id of the targeted entity, if any.
    pub entity_id: Option<EntityId>,

    /// Scope of the check, if any.
    pub scope: Option<Scope>,

    /// The decision returned to the caller.
    pub decision: Decision,

    /// Whether the decision was served from the cache.
    pub cached: bool,
}

/// An audit log.
#[derive(Debug, Clone)]
pub struct AuditLog {
    /// The audit entries, oldest first.
    entries: Arc<DashMap<ActorId, VecDeque<AuditEntry>>>,

    /// The maximum number of entries to keep per actor.
    max_entries_per_actor: usize,
}

impl AuditLog {
    /// Create a new audit log.
    ///
    /// # Arguments
    ///
    /// * `max_entries_per_actor` - The maximum number of entries to keep per
    ///   actor. `0` disables recording.
    pub fn new(max_entries_per_actor: usize) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            max_entries_per_actor,
        }
    }

    /// Whether decisions are being recorded.
    pub fn is_enabled(&self) -> bool {
        self.max_entries_per_actor > 0
    }

    /// Record a decision.
    ///
    /// The oldest entry for the actor is dropped once the per-actor limit is
    /// reached.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor the check was performed for.
    /// * `ability` - The ability that was checked.
    /// * `target` - The check target, if any.
    /// * `decision` - The decision returned.
    /// * `cached` - Whether the decision came from the cache.
    pub fn record(
        &self,
        actor: &Actor,
        ability: &str,
        target: Option<&Target>,
        decision: &Decision,
        cached: bool,
    ) {
        if !self.is_enabled() {
            return;
        }

        let entity = target.and_then(|t| t.entity.as_ref());
        let entry = AuditEntry {
            timestamp: Utc::now(),
            actor_id: actor.id,
            superuser: actor.is_superuser,
            ability: ability.to_string(),
            entity_kind: entity.map(|e| e.kind.clone()),
            entity_id: entity.map(|e| e.id),
            scope: target.and_then(|t| t.scope.clone()),
            decision: decision.clone(),
            cached,
        };

        let mut actor_entries = self.entries.entry(actor.id).or_default();
        while actor_entries.len() >= self.max_entries_per_actor {
            actor_entries.pop_front();
        }
        actor_entries.push_back(entry);
    }

    /// The entries recorded for `actor`, oldest first.
    pub fn entries_for(&self, actor: &ActorId) -> Vec<AuditEntry> {
        self.entries
            .get(actor)
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// The most recent entries across all actors, newest first.
    pub fn recent(&self, limit: usize) -> Vec<AuditEntry> {
        let mut entries: Vec<AuditEntry> = self
            .entries
            .iter()
            .flat_map(|entry| entry.value().iter().cloned().collect::<Vec<_>>())
            .collect();

        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(limit);
        entries
    }

    /// Clear the entries for one actor.
    pub fn clear_actor(&self, actor: &ActorId) {
        self.entries.remove(actor);
    }

    /// Clear every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::{DenyReason, Entity};

    #[test]
    fn test_record_and_get_entries() {
        let audit_log = AuditLog::new(10);
        let actor = Actor::new(ActorId::new());
        let task = Entity::new("task", EntityId::new());
        let target = Target::entity(task.clone()).with_scope("org-1");

        audit_log.record(&actor, "task.delete", Some(&target), &Decision::Allow, false);

        let entries = audit_log.entries_for(&actor.id);
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.actor_id, actor.id);
        assert_eq!(entry.ability, "task.delete");
        assert_eq!(entry.entity_kind, Some(EntityKind::from("task")));
        assert_eq!(entry.entity_id, Some(task.id));
        assert_eq!(entry.scope, Some(Scope::from("org-1")));
        assert_eq!(entry.decision, Decision::Allow);
        assert!(!entry.cached);
    }

    #[test]
    fn test_disabled_log_records_nothing() {
        let audit_log = AuditLog::default();
        let actor = Actor::new(ActorId::new());

        audit_log.record(&actor, "task.view", None, &Decision::Allow, false);

        assert!(!audit_log.is_enabled());
        assert!(audit_log.entries_for(&actor.id).is_empty());
    }

    #[test]
    fn test_max_entries_per_actor() {
        let audit_log = AuditLog::new(2);
        let actor = Actor::new(ActorId::new());

        for ability in ["task.view", "task.update", "task.delete"] {
            audit_log.record(&actor, ability, None, &Decision::Deny(DenyReason::NotGranted), false);
        }

        let entries = audit_log.entries_for(&actor.id);
        assert_eq!(entries.len(), 2);
        // The oldest entry was removed
        assert_eq!(entries[0].ability, "task.update");
        assert_eq!(entries[1].ability, "task.delete");
    }

    #[test]
    fn test_entry_serialization() {
        let audit_log = AuditLog::new(1);
        let actor = Actor::new(ActorId::new());
        let target = Target::entity(Entity::new("task", EntityId::new())).with_scope("org-1");

        audit_log.record(&actor, "task.delete", Some(&target), &Decision::deny("task is locked"), true);
        let entry = audit_log.entries_for(&actor.id).remove(0);

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["ability"], "task.delete");
        assert_eq!(json["entity_kind"], "task");
        assert_eq!(json["scope"], "org-1");
        assert_eq!(json["actor_id"], actor.id.to_string());
        assert_eq!(json["cached"], true);

        let back: AuditEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_recent_and_clear() {
        let audit_log = AuditLog::new(5);
        let alice = Actor::new(ActorId::new());
        let bob = Actor::new(ActorId::new());

        audit_log.record(&alice, "task.view", None, &Decision::Allow, false);
        audit_log.record(&bob, "task.view", None, &Decision::Allow, true);
        audit_log.record(&alice, "task.delete", None, &Decision::Allow, false);

        assert_eq!(audit_log.recent(10).len(), 3);
        assert_eq!(audit_log.recent(2).len(), 2);

        audit_log.clear_actor(&alice.id);
        assert!(audit_log.entries_for(&alice.id).is_empty());
        assert_eq!(audit_log.entries_for(&bob.id).len(), 1);

        audit_log.clear();
        assert!(audit_log.recent(10).is_empty());
    }
}
