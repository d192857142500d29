//! The permission registry.
//!
//! The active set lives behind an `Arc` that is swapped wholesale on every
//! successful load. Readers clone the `Arc` under a short read lock and
//! then work on an immutable snapshot, so a concurrent reload can never
//! expose a half-built set.

use std::sync::Arc;
use std::thread;

use parking_lot::RwLock;
use tracing::{error, info, warn};
use warden_core::error::{LoadError, RegistryError};
use warden_core::{Permission, PermissionSource};

use crate::retry::RetryPolicy;
use crate::set::PermissionSet;

/// Registry of active named permissions.
#[derive(Debug, Default)]
pub struct PermissionRegistry {
    /// The published set; `None` until the first successful load.
    current: RwLock<Option<Arc<PermissionSet>>>,
}

impl PermissionRegistry {
    /// Create an empty, unloaded registry.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Replace the active set.
    ///
    /// The new set is validated before anything is published. On error
    /// the previously active set stays in place.
    ///
    /// # Arguments
    ///
    /// * `records` - Every permission record, active or not.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - The number of active permissions now loaded.
    /// * `Err(LoadError)` - If the records are malformed or contain duplicate active names.
    pub fn load(&self, records: impl IntoIterator<Item = Permission>) -> Result<usize, LoadError> {
        let set = match PermissionSet::build(records) {
            Ok(set) => set,
            Err(e) => {
                error!(error = %e, "Rejected permission load, keeping previous set");
                return Err(e);
            }
        };

        let count = set.len();
        let mut current = self.current.write();
        let generation = current.as_ref().map_or(0, |s| s.generation()) + 1;
        *current = Some(Arc::new(set.with_generation(generation)));
        drop(current);

        info!(count, generation, "Loaded permission set");
        Ok(count)
    }

    /// Fetch records from `source` and load them.
    ///
    /// A failed fetch is reported as [`LoadError::Source`] and leaves the
    /// active set untouched.
    pub fn reload_from(&self, source: &dyn PermissionSource) -> Result<usize, LoadError> {
        let records = source.fetch().map_err(|e| {
            error!(error = %e, "Permission fetch failed, keeping previous set");
            LoadError::from(e)
        })?;
        self.load(records)
    }

    /// Fetch and load, retrying failed fetches with backoff.
    ///
    /// Only fetch failures are retried. Malformed or duplicate data is
    /// returned immediately since fetching it again yields the same rows.
    pub fn reload_with_retry(
        &self,
        source: &dyn PermissionSource,
        policy: &RetryPolicy,
    ) -> Result<usize, LoadError> {
        let mut attempt = 1;
        loop {
            match source.fetch() {
                Ok(records) => return self.load(records),
                Err(e) if attempt >= policy.max_attempts => {
                    error!(attempt, error = %e, "Permission fetch failed, giving up");
                    return Err(e.into());
                }
                Err(e) => {
                    let backoff = policy.backoff_for(attempt);
                    warn!(attempt, ?backoff, error = %e, "Permission fetch failed, retrying");
                    thread::sleep(backoff);
                    attempt += 1;
                }
            }
        }
    }

    /// The current set, or `None` if nothing has loaded yet.
    pub fn snapshot(&self) -> Option<Arc<PermissionSet>> {
        self.current.read().clone()
    }

    /// Whether a permission set has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }

    /// Generation of the current set; `0` before the first load.
    pub fn generation(&self) -> u64 {
        self.current.read().as_ref().map_or(0, |s| s.generation())
    }

    /// Whether an active permission with this name exists.
    pub fn exists(&self, name: &str) -> bool {
        self.snapshot().map_or(false, |s| s.contains(name))
    }

    /// Get an active permission by name.
    pub fn get(&self, name: &str) -> Result<Permission, RegistryError> {
        self.snapshot()
            .and_then(|s| s.get(name).cloned())
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Number of active permissions.
    pub fn len(&self) -> usize {
        self.snapshot().map_or(0, |s| s.len())
    }

    /// Whether there are no active permissions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of the active permissions, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .snapshot()
            .map(|s| s.iter().map(|p| p.name.clone()).collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Active permissions for one resource kind, sorted by name.
    pub fn by_resource_kind(&self, resource_kind: &str) -> Vec<Permission> {
        let mut permissions: Vec<Permission> = self
            .snapshot()
            .map(|s| {
                s.iter()
                    .filter(|p| p.resource_kind == resource_kind)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        permissions.sort_by(|a, b| a.name.cmp(&b.name));
        permissions
    }
}
