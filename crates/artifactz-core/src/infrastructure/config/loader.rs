use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use super::interpolation::{
    interpolate_toml,
    InterpolationError,
};
use super::schema::ArtifactzConfig;

pub const CONFIG_PATH_ENV: &str = "ARTIFACTZ_CONFIG_PATH";
pub const LOCAL_CONFIG_FILE: &str = "artifactz.toml";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Environment variable interpolation failed: {0}")]
    InterpolationError(#[from] InterpolationError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type ConfigLoadResult<T> = Result<T, ConfigLoadError>;

pub struct ConfigLoader;

impl ConfigLoader {
    /// First existing file among `ARTIFACTZ_CONFIG_PATH`, `./artifactz.toml`
    /// and `<config dir>/artifactz/config.toml`
    pub fn discover_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            tracing::debug!("Using config path from {}: {}", CONFIG_PATH_ENV, path);
            return Some(PathBuf::from(path));
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            tracing::debug!("Using local config file: {}", local.display());
            return Some(local);
        }

        let user = dirs::config_dir()?.join("artifactz").join("config.toml");
        if user.exists() {
            tracing::debug!("Using user config file: {}", user.display());
            return Some(user);
        }

        None
    }

    /// Loads the discovered file, or an empty configuration when there is none
    pub fn load_default() -> ConfigLoadResult<ArtifactzConfig> {
        match Self::discover_config_path() {
            Some(path) => Self::load(&path),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(ArtifactzConfig::default())
            }
        }
    }

    pub fn load(path: &Path) -> ConfigLoadResult<ArtifactzConfig> {
        if !path.exists() {
            return Err(ConfigLoadError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> ConfigLoadResult<ArtifactzConfig> {
        let mut value: toml::Value = toml::from_str(content)?;

        interpolate_toml(&mut value)?;

        let config: ArtifactzConfig = value.try_into().map_err(|e| {
            ConfigLoadError::InvalidConfig(format!("Failed to deserialize config: {}", e))
        })?;

        tracing::debug!(
            server_url = %config.server_url(),
            proxy = config.proxy().is_some(),
            credentials = config.credentials.len(),
            "Loaded config"
        );

        Ok(config)
    }
}
