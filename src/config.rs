use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "FCBOT_CONFIG";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {}", .0.display(), .1)]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub misc: MiscConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    pub token: String,
    /// Long-poll timeout in seconds.
    #[serde(default = "default_update_timeout")]
    pub update_timeout: u64,
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MiscConfig {
    /// HTTP proxy for the Bot API; empty means none.
    #[serde(default)]
    pub proxy: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file, relative to the config file's directory unless absolute.
    pub db_name: PathBuf,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_update_timeout() -> u64 {
    60
}

fn default_max_connections() -> u32 {
    4
}

impl Config {
    /// Load from a TOML file, resolving `db_name` against its directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        let mut config = Self::from_toml(&content)?;

        if config.database.db_name.is_relative() {
            if let Some(dir) = path.parent() {
                config.database.db_name = dir.join(&config.database.db_name);
            }
        }
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.telegram.token.trim().is_empty() {
            return Err(ConfigError::Invalid("telegram.token is empty".to_string()));
        }
        if self.database.db_name.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database.db_name is empty".to_string()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn proxy(&self) -> Option<&str> {
        self.misc.proxy.as_deref().filter(|p| !p.is_empty())
    }

    /// `$FCBOT_CONFIG`, else `config.toml` next to the executable.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let exe = std::env::current_exe()
            .map_err(|e| ConfigError::Invalid(format!("cannot locate executable: {e}")))?;
        let dir = exe
            .parent()
            .ok_or_else(|| ConfigError::Invalid("executable has no parent directory".to_string()))?;
        Ok(dir.join(CONFIG_FILE_NAME))
    }
}
