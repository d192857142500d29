//! Decision cache.
//!
//! Entries are tagged with the registry generation they were computed
//! against. An entry from an older generation is never returned, so a
//! registry reload invalidates the whole cache without coordination.
//!
//! Entries are also tagged with the actor's invalidation epoch, read before
//! the decision was computed. [`DecisionCache::invalidate`] bumps the epoch,
//! so a decision that was still being computed when the actor was
//! invalidated is never served, even if it lands after the invalidation.
//!
//! The cache holds at most `capacity` entries; the oldest insertions are
//! evicted first.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::trace;
use warden_core::{Actor, ActorId, Decision, EntityId, Scope, Target};

/// Capacity used by [`DecisionCache::new`].
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// What a cached decision was computed for.
///
/// The scope is part of the key because a scoped grant can allow an
/// ability in one scope and not another. Entity state (owner, attributes)
/// is not: after changing an entity, invalidate the affected actors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub actor: ActorId,
    pub ability: String,
    pub entity: Option<EntityId>,
    pub scope: Option<Scope>,
}

impl CacheKey {
    /// Build the key for a check.
    pub fn for_check(actor: &Actor, ability: &str, target: Option<&Target>) -> Self {
        Self {
            actor: actor.id,
            ability: ability.to_string(),
            entity: target.and_then(|t| t.entity.as_ref()).map(|e| e.id),
            scope: target.and_then(|t| t.scope.clone()),
        }
    }
}

#[derive(Debug, Clone)]
struct CachedDecision {
    generation: u64,
    epoch: u64,
    decision: Decision,
}

/// Concurrent, bounded memo of top-level decisions.
#[derive(Debug)]
pub struct DecisionCache {
    entries: DashMap<CacheKey, CachedDecision>,

    /// Insertion order of the keys in `entries`. Every structural change
    /// to `entries` happens under this lock.
    order: Mutex<VecDeque<CacheKey>>,

    /// Invalidation epoch per actor; absent means `0`.
    epochs: DashMap<ActorId, u64>,

    /// Newest registry generation seen.
    generation: AtomicU64,

    capacity: usize,
}

impl DecisionCache {
    /// Create an empty cache holding up to [`DEFAULT_CACHE_CAPACITY`] entries.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Create an empty cache holding up to `capacity` entries.
    ///
    /// A capacity of `0` caches nothing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            order: Mutex::new(VecDeque::new()),
            epochs: DashMap::new(),
            generation: AtomicU64::new(0),
            capacity,
        }
    }

    /// Maximum number of cached decisions.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The current invalidation epoch for `actor`.
    ///
    /// Read it before computing a decision and pass it to
    /// [`insert`](Self::insert).
    pub fn epoch(&self, actor: &ActorId) -> u64 {
        self.epochs.get(actor).map_or(0, |e| *e.value())
    }

    /// Look up a decision computed under `generation`.
    pub fn get(&self, key: &CacheKey, generation: u64) -> Option<Decision> {
        self.observe_generation(generation);
        let epoch = self.epoch(&key.actor);
        let entry = self.entries.get(key)?;
        let cached = entry.value();
        if cached.generation == generation && cached.epoch == epoch {
            Some(cached.decision.clone())
        } else {
            None
        }
    }

    /// Store a decision computed under `generation` and the actor's `epoch`.
    ///
    /// Decisions computed before the actor was last invalidated are dropped.
    pub fn insert(&self, key: CacheKey, decision: Decision, generation: u64, epoch: u64) {
        self.observe_generation(generation);
        if self.capacity == 0 || epoch < self.epoch(&key.actor) {
            return;
        }

        let mut order = self.order.lock();
        let entry = CachedDecision {
            generation,
            epoch,
            decision,
        };
        if self.entries.insert(key.clone(), entry).is_none() {
            order.push_back(key);
        }
        while order.len() > self.capacity {
            if let Some(oldest) = order.pop_front() {
                self.entries.remove(&oldest);
                trace!(actor = %oldest.actor, ability = %oldest.ability, "Evicted cached decision");
            }
        }
    }

    /// Drop every decision cached for `actor`, including ones still being
    /// computed.
    pub fn invalidate(&self, actor: &ActorId) {
        *self.epochs.entry(*actor).or_insert(0) += 1;

        let mut order = self.order.lock();
        self.entries.retain(|key, _| key.actor != *actor);
        order.retain(|key| key.actor != *actor);
        trace!(%actor, "Invalidated cached decisions");
    }

    /// Drop everything.
    pub fn clear(&self) {
        let mut order = self.order.lock();
        self.entries.clear();
        order.clear();
    }

    /// Number of cached decisions, including stale ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evict entries from older generations once a newer one shows up.
    fn observe_generation(&self, generation: u64) {
        let previous = self.generation.fetch_max(generation, Ordering::SeqCst);
        if generation > previous {
            let mut order = self.order.lock();
            self.entries.retain(|_, cached| cached.generation >= generation);
            order.retain(|key| self.entries.contains_key(key));
            trace!(generation, "Evicted decisions from older permission sets");
        }
    }
}

impl Default for DecisionCache {
    fn default() -> Self {
        Self::new()
    }
}
