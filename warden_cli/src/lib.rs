//! Warden CLI - load a deployment file and answer authorization checks.

pub mod commands;
pub mod config;
pub mod deployment;
pub mod error;
pub mod logging;

pub use config::WardenConfig;
pub use deployment::Deployment;
pub use error::CliError;
