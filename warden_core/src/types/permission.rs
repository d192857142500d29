//! Named permissions.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Deserialize};
use crate::error::LoadError;

lazy_static! {
    /// Dot-separated lowercase slug, e.g. `task.delete` or `budget.approve-large`.
    static ref NAME_PATTERN: Regex =
        Regex::new(r"^[a-z0-9_-]+(\.[a-z0-9_-]+)*$").expect("permission name pattern is valid");
}

fn default_active() -> bool {
    true
}

/// A named permission: an action on a kind of resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    /// Unique slug; this is the ability name checks refer to.
    pub name: String,

    /// Kind of resource the permission applies to.
    pub resource_kind: String,

    /// Action on the resource.
    pub action: String,

    /// Inactive permissions are ignored by the registry.
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Permission {
    /// Create an active permission named `<resource_kind>.<action>`.
    pub fn new(resource_kind: impl Into<String>, action: impl Into<String>) -> Self {
        let resource_kind = resource_kind.into();
        let action = action.into();
        Self {
            name: format!("{}.{}", resource_kind, action),
            resource_kind,
            action,
            active: true,
        }
    }

    /// Create an active permission with an explicit name.
    pub fn named(
        name: impl Into<String>,
        resource_kind: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            resource_kind: resource_kind.into(),
            action: action.into(),
            active: true,
        }
    }

    /// Mark this permission inactive.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Check that the record is well formed.
    pub fn validate(&self) -> Result<(), LoadError> {
        if !NAME_PATTERN.is_match(&self.name) {
            return Err(LoadError::Malformed(format!(
                "invalid permission name {:?}",
                self.name
            )));
        }
        if self.resource_kind.trim().is_empty() {
            return Err(LoadError::Malformed(format!(
                "permission {} has an empty resource kind",
                self.name
            )));
        }
        if self.action.trim().is_empty() {
            return Err(LoadError::Malformed(format!(
                "permission {} has an empty action",
                self.name
            )));
        }
        Ok(())
    }
}
