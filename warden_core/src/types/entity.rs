//! Entities, scopes and check targets.

use std::fmt;
use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};
use crate::id::{ActorId, EntityId};

/// The kind of a policy-governed entity (e.g. `task`, `project`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKind(String);

impl EntityKind {
    /// Create an entity kind.
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    /// The kind as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityKind {
    fn from(kind: &str) -> Self {
        Self(kind.to_string())
    }
}

impl From<String> for EntityKind {
    fn from(kind: String) -> Self {
        Self(kind)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque caller context narrowing a check (e.g. an organisation id).
///
/// The engine passes it through to the grant checker untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scope(String);

impl Scope {
    /// Create a scope.
    pub fn new(scope: impl Into<String>) -> Self {
        Self(scope.into())
    }

    /// The scope as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Scope {
    fn from(scope: &str) -> Self {
        Self(scope.to_string())
    }
}

impl From<String> for Scope {
    fn from(scope: String) -> Self {
        Self(scope)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A typed entity a policy can reason about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity kind, used to resolve the policy.
    pub kind: EntityKind,

    /// Entity identifier.
    pub id: EntityId,

    /// Owning actor, if the entity has one.
    #[serde(default)]
    pub owner: Option<ActorId>,

    /// State exposed to policies (e.g. `{"locked": true}`).
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl Entity {
    /// Create an entity with no owner and no attributes.
    pub fn new(kind: impl Into<EntityKind>, id: EntityId) -> Self {
        Self {
            kind: kind.into(),
            id,
            owner: None,
            attributes: Map::new(),
        }
    }

    /// Set the owner.
    pub fn with_owner(mut self, owner: ActorId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Look up an attribute.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Whether the given actor owns this entity.
    pub fn is_owned_by(&self, actor: &ActorId) -> bool {
        self.owner.as_ref() == Some(actor)
    }
}

/// What a check is about: an optional scope and an optional entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Target {
    /// Scope passed to the grant checker.
    pub scope: Option<Scope>,

    /// Entity whose kind selects a policy.
    pub entity: Option<Entity>,
}

impl Target {
    /// A target with only a scope.
    pub fn scoped(scope: impl Into<Scope>) -> Self {
        Self {
            scope: Some(scope.into()),
            entity: None,
        }
    }

    /// A target with only an entity.
    pub fn entity(entity: Entity) -> Self {
        Self {
            scope: None,
            entity: Some(entity),
        }
    }

    /// Add a scope to this target.
    pub fn with_scope(mut self, scope: impl Into<Scope>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}
