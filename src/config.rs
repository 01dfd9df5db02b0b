//! Persisted application settings (`config.toml` in the `.cardioai` folder).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize, de::Error as SerdeDeError};
use thiserror::Error;
use url::Url;

use crate::app_dirs;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const MIN_HEALTH_POLL_SECS: u64 = 2;
const MAX_HEALTH_POLL_SECS: u64 = 300;
const MAX_HISTORY_LIMIT: usize = 10_000;

/// Errors raised while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not resolve application directory: {0}")]
    AppDir(#[from] app_dirs::AppDirError),
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config: {0}")]
    SerializeToml(#[from] toml::ser::Error),
    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid prediction service URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}

/// Aggregate application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub export: ExportSettings,
}

/// Where the prediction service lives and how patiently we talk to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
    /// Interval between backend reachability probes.
    #[serde(default = "default_health_poll_secs")]
    pub health_poll_secs: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
            health_poll_secs: default_health_poll_secs(),
        }
    }
}

impl ServiceSettings {
    /// Parse the base URL, normalizing it so relative endpoint joins keep its path.
    pub fn base(&self) -> Result<Url, ConfigError> {
        let trimmed = self.base_url.trim();
        let mut text = trimmed.to_string();
        if !text.ends_with('/') {
            text.push('/');
        }
        Url::parse(&text).map_err(|source| ConfigError::InvalidUrl {
            url: trimmed.to_string(),
            source,
        })
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.max(1))
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs.max(1))
    }

    pub fn health_poll_interval(&self) -> Duration {
        Duration::from_secs(
            self.health_poll_secs
                .clamp(MIN_HEALTH_POLL_SECS, MAX_HEALTH_POLL_SECS),
        )
    }
}

/// Local persistence tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Maximum number of history entries kept, most recent first.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
        }
    }
}

impl StorageSettings {
    pub fn effective_history_limit(&self) -> usize {
        self.history_limit.clamp(1, MAX_HISTORY_LIMIT)
    }
}

/// Where generated PDFs and JSON exports are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl ExportSettings {
    /// Resolve the configured export directory or the platform default.
    pub fn resolve_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.directory {
            Some(dir) => Ok(dir.clone()),
            None => Ok(app_dirs::default_export_dir()?),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_read_timeout_secs() -> u64 {
    60
}

fn default_health_poll_secs() -> u64 {
    6
}

fn default_history_limit() -> usize {
    500
}

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, writing defaults on first launch.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    let path = config_path()?;
    if !path.exists() {
        let config = AppConfig::default();
        save_to_path(&config, &path)?;
        tracing::info!("Wrote default config to {}", path.display());
        return Ok(config);
    }
    load_from_path(&path)
}

/// Load configuration from a specific file.
pub fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source: SerdeDeError::custom(source),
    })?;
    let config: AppConfig = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    config.service.base()?;
    Ok(config)
}

/// Persist configuration to disk, overwriting any previous contents.
pub fn save(config: &AppConfig) -> Result<(), ConfigError> {
    save_to_path(config, &config_path()?)
}

/// Save configuration to a specific path, creating parent directories as needed.
pub fn save_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let text = toml::to_string_pretty(config)?;
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[service]\nbase_url = \"http://10.0.0.5:9000\"\n").unwrap();
        let config = load_from_path(&path).unwrap();
        assert_eq!(config.service.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.service.health_poll_secs, 6);
        assert_eq!(config.storage.history_limit, 500);
        assert!(config.export.directory.is_none());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[service\nbase_url = 1").unwrap();
        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
    }

    #[test]
    fn invalid_url_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[service]\nbase_url = \"not a url\"\n").unwrap();
        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let mut config = AppConfig::default();
        config.storage.history_limit = 42;
        config.export.directory = Some(dir.path().join("out"));
        save_to_path(&config, &path).unwrap();
        assert_eq!(load_from_path(&path).unwrap(), config);
    }

    #[test]
    fn base_url_keeps_path_prefix_for_joins() {
        let settings = ServiceSettings {
            base_url: "http://host:8000/api".into(),
            ..ServiceSettings::default()
        };
        let joined = settings.base().unwrap().join("predict").unwrap();
        assert_eq!(joined.as_str(), "http://host:8000/api/predict");
    }

    #[test]
    fn poll_interval_and_history_limit_are_clamped() {
        let service = ServiceSettings {
            health_poll_secs: 0,
            ..ServiceSettings::default()
        };
        assert_eq!(service.health_poll_interval(), Duration::from_secs(2));
        let storage = StorageSettings { history_limit: 0 };
        assert_eq!(storage.effective_history_limit(), 1);
    }
}
