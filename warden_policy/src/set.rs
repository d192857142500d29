//! The policy set.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;
use warden_core::error::PolicyError;
use warden_core::{EntityKind, Policy};

/// Registered policies, indexed by entity kind.
///
/// Registration takes `&mut self`; once the set is shared behind an `Arc`
/// it can no longer change.
#[derive(Default)]
pub struct PolicySet {
    policies: HashMap<EntityKind, Arc<dyn Policy>>,
}

impl PolicySet {
    /// Create an empty policy set.
    pub fn new() -> Self {
        Self {
            policies: HashMap::new(),
        }
    }

    /// Register the policy for an entity kind.
    ///
    /// # Arguments
    ///
    /// * `kind` - The entity kind the policy governs.
    /// * `policy` - The policy.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the policy was registered.
    /// * `Err(PolicyError::DuplicateKind)` - If the kind already has a policy.
    pub fn register<P>(&mut self, kind: impl Into<EntityKind>, policy: P) -> Result<(), PolicyError>
    where
        P: Policy + 'static,
    {
        self.register_shared(kind, Arc::new(policy))
    }

    /// Register an already shared policy for an entity kind.
    pub fn register_shared(
        &mut self,
        kind: impl Into<EntityKind>,
        policy: Arc<dyn Policy>,
    ) -> Result<(), PolicyError> {
        let kind = kind.into();
        if self.policies.contains_key(&kind) {
            return Err(PolicyError::DuplicateKind(kind));
        }

        debug!(%kind, policy = policy.name(), "Registered policy");
        self.policies.insert(kind, policy);
        Ok(())
    }

    /// Find the policy for an entity kind.
    pub fn resolve(&self, kind: &EntityKind) -> Result<Arc<dyn Policy>, PolicyError> {
        self.policies
            .get(kind)
            .cloned()
            .ok_or_else(|| PolicyError::NotFound(kind.clone()))
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<EntityKind> {
        let mut kinds: Vec<EntityKind> = self.policies.keys().cloned().collect();
        kinds.sort();
        kinds
    }

    /// Number of registered policies.
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Whether no policy is registered.
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl fmt::Debug for PolicySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicySet")
            .field("kinds", &self.kinds())
            .finish()
    }
}
