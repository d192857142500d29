//! Collaborator interfaces.
//!
//! The engine owns the decision algorithm; everything it does not own is
//! reached through one of these traits.

pub mod grant;
pub mod policy;
pub mod source;

pub use grant::GrantChecker;
pub use policy::Policy;
pub use source::PermissionSource;
