use thiserror::Error;
use warden_core::error::{ConfigError, LoadError, PolicyError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid permissions: {0}")]
    Load(#[from] LoadError),

    #[error("Invalid policies: {0}")]
    Policy(#[from] PolicyError),

    #[error("Unknown actor: {0}")]
    UnknownActor(String),

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),
}
