//! Error types for the warden authorization engine.
//!
//! Only mutation APIs (registry loads, policy registration, configuration
//! loading) produce errors. Ability checks never do: every business
//! outcome of a check is expressed as a [`Decision`](crate::Decision).

use thiserror::Error;
use crate::types::EntityKind;

/// Root error type for warden.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    #[error("Permission source error: {0}")]
    Source(#[from] SourceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort a permission reload.
///
/// A failed load always leaves the previously active set in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("Duplicate active permission: {0}")]
    DuplicateName(String),

    #[error("Malformed permission record: {0}")]
    Malformed(String),

    #[error("Permission fetch failed: {0}")]
    Source(#[from] SourceError),
}

/// Errors related to permission registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Permission load failed: {0}")]
    Load(#[from] LoadError),

    #[error("Permission not found: {0}")]
    NotFound(String),
}

/// Errors related to the policy set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("A policy is already registered for entity kind: {0}")]
    DuplicateKind(EntityKind),

    #[error("No policy registered for entity kind: {0}")]
    NotFound(EntityKind),
}

/// Errors reported by an external permission source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("Permission source unavailable: {0}")]
    Unavailable(String),

    #[error("Permission source returned invalid data: {0}")]
    Invalid(String),
}

/// Errors related to loading a deployment configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(String),

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversions() {
        let err: Error = RegistryError::from(LoadError::DuplicateName("task.delete".into())).into();
        assert!(matches!(err, Error::Registry(RegistryError::Load(LoadError::DuplicateName(_)))));
        assert_eq!(
            err.to_string(),
            "Registry error: Permission load failed: Duplicate active permission: task.delete"
        );

        let err: Error = PolicyError::DuplicateKind(EntityKind::from("task")).into();
        assert_eq!(
            err.to_string(),
            "Policy error: A policy is already registered for entity kind: task"
        );
    }

    #[test]
    fn test_source_error_becomes_load_error() {
        let load: LoadError = SourceError::Unavailable("connection refused".into()).into();
        assert_eq!(load, LoadError::Source(SourceError::Unavailable("connection refused".into())));
    }
}
