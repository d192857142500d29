//! Actors.

use serde::{Serialize, Deserialize};
use crate::id::ActorId;

/// The identity an authorization check is performed for.
///
/// Actors are owned by the caller's session and treated as immutable for
/// the duration of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Actor identifier.
    pub id: ActorId,

    /// Optional display name, used only for logging.
    #[serde(default)]
    pub name: Option<String>,

    /// Superusers bypass every other check.
    #[serde(default)]
    pub is_superuser: bool,
}

impl Actor {
    /// Create a regular actor.
    pub fn new(id: ActorId) -> Self {
        Self {
            id,
            name: None,
            is_superuser: false,
        }
    }

    /// Create a superuser actor.
    pub fn superuser(id: ActorId) -> Self {
        Self {
            id,
            name: None,
            is_superuser: true,
        }
    }

    /// Attach a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name for log output, falling back to the id.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.id.to_string(),
        }
    }
}
