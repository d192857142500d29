//! Immutable permission sets.

use std::collections::HashMap;
use warden_core::error::LoadError;
use warden_core::Permission;

/// One complete, validated set of active permissions.
///
/// Sets are never mutated after construction; a reload builds a new one.
#[derive(Debug, Clone, Default)]
pub struct PermissionSet {
    /// Active permissions by name.
    permissions: HashMap<String, Permission>,

    /// Load counter this set was published under.
    generation: u64,
}

impl PermissionSet {
    /// Build a set from raw records.
    ///
    /// Inactive records are dropped before duplicate detection, so an
    /// inactive row never conflicts with an active one.
    ///
    /// # Arguments
    ///
    /// * `records` - Every permission record, active or not.
    ///
    /// # Returns
    ///
    /// * `Ok(PermissionSet)` - The active permissions.
    /// * `Err(LoadError::Malformed)` - If an active record fails validation.
    /// * `Err(LoadError::DuplicateName)` - If two active records share a name.
    pub fn build(records: impl IntoIterator<Item = Permission>) -> Result<Self, LoadError> {
        let mut permissions = HashMap::new();

        for permission in records.into_iter().filter(|p| p.active) {
            permission.validate()?;
            if permissions.contains_key(&permission.name) {
                return Err(LoadError::DuplicateName(permission.name));
            }
            permissions.insert(permission.name.clone(), permission);
        }

        Ok(Self {
            permissions,
            generation: 0,
        })
    }

    pub(crate) fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    /// The load counter this set was published under.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Look up a permission by name.
    pub fn get(&self, name: &str) -> Option<&Permission> {
        self.permissions.get(name)
    }

    /// Whether a permission with this name is active.
    pub fn contains(&self, name: &str) -> bool {
        self.permissions.contains_key(name)
    }

    /// Number of active permissions.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// Iterate over the active permissions in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.permissions.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_skips_inactive() {
        let set = PermissionSet::build(vec![
            Permission::new("task", "view"),
            Permission::new("task", "delete").inactive(),
        ])
        .unwrap();

        assert_eq!(set.len(), 1);
        assert!(set.contains("task.view"));
        assert!(!set.contains("task.delete"));
    }

    #[test]
    fn test_build_rejects_duplicate_active_names() {
        let result = PermissionSet::build(vec![
            Permission::new("task", "view"),
            Permission::named("task.view", "task", "read"),
        ]);
        assert_eq!(result.unwrap_err(), LoadError::DuplicateName("task.view".into()));
    }

    #[test]
    fn test_build_allows_inactive_duplicate() {
        let set = PermissionSet::build(vec![
            Permission::new("task", "view"),
            Permission::new("task", "view").inactive(),
        ])
        .unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_build_rejects_malformed() {
        let result = PermissionSet::build(vec![Permission::named("Task View", "task", "view")]);
        assert!(matches!(result, Err(LoadError::Malformed(_))));
    }

    #[test]
    fn test_inactive_malformed_is_ignored() {
        let set = PermissionSet::build(vec![Permission::named("Bad Name", "task", "view").inactive()])
            .unwrap();
        assert!(set.is_empty());
    }
}
