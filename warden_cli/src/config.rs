use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use warden_core::error::ConfigError;
use warden_core::{ActorId, EntityId, Permission};
use warden_engine::EngineConfig;

/// File name searched for by [`WardenConfig::from_project_root`].
pub const CONFIG_FILE_NAME: &str = "Warden.toml";

/// A deployment file: the permission catalogue plus the actors, entities
/// and policies the CLI evaluates checks against.
#[derive(Debug, Default, Deserialize)]
pub struct WardenConfig {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub permissions: Vec<Permission>,

    #[serde(default)]
    pub actors: Vec<ActorConfig>,

    #[serde(default)]
    pub entities: Vec<EntityConfig>,

    #[serde(default)]
    pub policies: Vec<PolicyConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActorConfig {
    pub name: String,

    /// Generated when omitted.
    #[serde(default)]
    pub id: Option<ActorId>,

    #[serde(default)]
    pub superuser: bool,

    #[serde(default)]
    pub grants: Vec<GrantConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GrantConfig {
    pub permission: String,

    /// Unscoped grants hold in every scope.
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntityConfig {
    /// Name used on the command line to refer to this entity.
    pub key: String,

    pub kind: String,

    #[serde(default)]
    pub id: Option<EntityId>,

    /// Name of the owning actor.
    #[serde(default)]
    pub owner: Option<String>,

    #[serde(default)]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    pub kind: String,

    /// Abilities restricted to the entity owner.
    #[serde(default)]
    pub owner_only: Vec<String>,

    #[serde(default)]
    pub guards: Vec<GuardConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuardConfig {
    pub attribute: String,
    pub equals: Value,
    pub abilities: Vec<String>,
    pub reason: String,
}

impl WardenConfig {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(config_path.as_ref()).map_err(|e| {
            ConfigError::Read(format!("{}: {}", config_path.as_ref().display(), e))
        })?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load `Warden.toml` from the current directory or the nearest parent
    /// that has one.
    pub fn from_project_root() -> Result<Self, ConfigError> {
        let current_dir = std::env::current_dir()
            .map_err(|e| ConfigError::Read(format!("Failed to get current directory: {}", e)))?;

        match Self::find_upward(&current_dir) {
            Some(path) => Self::load(path),
            None => Err(ConfigError::Read(format!(
                "Could not find {}",
                CONFIG_FILE_NAME
            ))),
        }
    }

    fn find_upward(start: &Path) -> Option<PathBuf> {
        let mut dir = start.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !dir.pop() {
                return None;
            }
        }
    }
}
