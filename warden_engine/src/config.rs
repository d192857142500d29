//! Engine configuration.

use serde::{Serialize, Deserialize};

use crate::cache::DEFAULT_CACHE_CAPACITY;

/// Tunables for an [`Authorizer`](crate::Authorizer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Memoize decisions in `check_cached`.
    pub cache_enabled: bool,

    /// Maximum number of cached decisions; the oldest are evicted first.
    pub cache_capacity: usize,

    /// Decisions kept per actor in the audit log; `0` turns auditing off.
    pub audit_max_entries_per_actor: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            audit_max_entries_per_actor: 0,
        }
    }
}
