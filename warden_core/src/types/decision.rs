//! Authorization decisions.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Why a check was denied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DenyReason {
    /// The ability is not an active permission.
    UnknownAbility,

    /// The actor does not hold the permission for the requested scope.
    NotGranted,

    /// An entity policy explicitly denied the ability.
    PolicyDenied(String),

    /// No permission set has been loaded yet.
    RegistryUnavailable,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAbility => write!(f, "unknown ability"),
            Self::NotGranted => write!(f, "permission not granted"),
            Self::PolicyDenied(reason) => write!(f, "denied by policy: {}", reason),
            Self::RegistryUnavailable => write!(f, "permission registry not loaded"),
        }
    }
}

/// The outcome of evaluating an ability.
///
/// Policies may return `Abstain`; the engine never does. At the top level
/// `Abstain` always resolves to `Deny`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    /// The ability is granted.
    Allow,

    /// The ability is refused.
    Deny(DenyReason),

    /// No applicable rule.
    Abstain,
}

impl Decision {
    /// A policy denial carrying a human-readable reason.
    pub fn deny(reason: impl Into<String>) -> Self {
        Self::Deny(DenyReason::PolicyDenied(reason.into()))
    }

    /// Whether this decision grants access.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Whether this decision is an explicit denial.
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Deny(_))
    }

    /// Whether this decision expresses no opinion.
    pub fn is_abstain(&self) -> bool {
        matches!(self, Self::Abstain)
    }

    /// The deny reason, if any.
    pub fn deny_reason(&self) -> Option<&DenyReason> {
        match self {
            Self::Deny(reason) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::Deny(reason) => write!(f, "deny ({})", reason),
            Self::Abstain => write!(f, "abstain"),
        }
    }
}
