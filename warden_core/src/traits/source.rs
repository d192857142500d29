//! Permission sources.

use crate::error::SourceError;
use crate::types::Permission;

/// Supplies the persisted permission records (e.g. a database table).
///
/// Fetch failures are reported to whoever triggered the reload; the
/// registry keeps serving its previous set.
pub trait PermissionSource: Send + Sync {
    /// Fetch every permission record, active or not.
    fn fetch(&self) -> Result<Vec<Permission>, SourceError>;
}

impl PermissionSource for Vec<Permission> {
    fn fetch(&self) -> Result<Vec<Permission>, SourceError> {
        Ok(self.clone())
    }
}
