//! Actor capability checks.

use std::sync::Arc;
use crate::types::{Actor, Permission, Scope};

/// Answers whether an actor directly holds a permission.
///
/// This is where role assignments live; the engine only asks the question.
/// How `scope` narrows a grant is up to the implementation.
pub trait GrantChecker: Send + Sync {
    /// Whether `actor` holds `permission` within `scope`.
    fn holds(&self, actor: &Actor, permission: &Permission, scope: Option<&Scope>) -> bool;
}

impl<G: GrantChecker + ?Sized> GrantChecker for Arc<G> {
    fn holds(&self, actor: &Actor, permission: &Permission, scope: Option<&Scope>) -> bool {
        (**self).holds(actor, permission, scope)
    }
}
