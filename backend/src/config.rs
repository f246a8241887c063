//! # Backend Configuration
//!
//! Settings for the backend process itself (where data lives, where the API
//! listens, how reminders are delivered). Not to be confused with the
//! user-facing app settings stored under `appSettings`.
//!
//! Values are resolved in three layers:
//!
//! 1. Built-in defaults
//! 2. An optional YAML file: `$LANSIA_HELPER_CONFIG`, or `config.yaml` in the
//!    data directory
//! 3. Environment overrides
//!
//! ```yaml
//! data_directory: "/home/oma/.local/share/Lansia Helper"
//! database_file: "lansia_helper.db"
//! storage_backend: sqlite
//! bind_address: "127.0.0.1:3000"
//! cors_origin: "http://localhost:8080"
//! reminder_tick_secs: 60
//! notification_permission: undetermined
//! log_level: info
//! ```

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::models::reminder::PermissionStatus;

pub const CONFIG_PATH_ENV: &str = "LANSIA_HELPER_CONFIG";
pub const DATA_DIR_ENV: &str = "LANSIA_HELPER_DATA_DIR";
pub const BIND_ENV: &str = "LANSIA_HELPER_BIND";
pub const NOTIFICATION_PERMISSION_ENV: &str = "LANSIA_HELPER_NOTIFICATION_PERMISSION";
pub const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Where key/value data is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    /// Nothing survives a restart
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_directory: PathBuf,
    pub database_file: String,
    pub storage_backend: StorageBackend,
    pub bind_address: String,
    /// Origin of the UI allowed to call the API
    pub cors_origin: String,
    pub reminder_tick_secs: u64,
    /// Permission the local reminder service starts with
    pub notification_permission: PermissionStatus,
    /// Default log filter when RUST_LOG is not set
    pub log_level: String,
    /// File the configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_directory(),
            database_file: "lansia_helper.db".to_string(),
            storage_backend: StorageBackend::Sqlite,
            bind_address: "127.0.0.1:3000".to_string(),
            cors_origin: "http://localhost:8080".to_string(),
            reminder_tick_secs: 60,
            notification_permission: PermissionStatus::Undetermined,
            log_level: "info".to_string(),
            source: None,
        }
    }
}

fn default_data_directory() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Lansia Helper")
}

impl AppConfig {
    /// Resolve the configuration from defaults, config file and process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::load`] with environment lookups going through `env`
    pub fn load_with_env<F>(env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_path = match env(CONFIG_PATH_ENV) {
            // An explicitly named file must exist
            Some(path) => Some(PathBuf::from(path)),
            None => {
                let data_directory = env(DATA_DIR_ENV)
                    .map(PathBuf::from)
                    .unwrap_or_else(default_data_directory);
                let candidate = data_directory.join(CONFIG_FILE_NAME);
                candidate.exists().then_some(candidate)
            }
        };

        let mut config = match config_path {
            Some(path) => {
                let mut config = Self::from_yaml_file(&path)?;
                config.source = Some(path);
                config
            }
            None => Self::default(),
        };

        config.apply_env(&env)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env<F>(&mut self, env: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = env(DATA_DIR_ENV) {
            self.data_directory = PathBuf::from(dir);
        }
        if let Some(bind) = env(BIND_ENV) {
            self.bind_address = bind;
        }
        if let Some(permission) = env(NOTIFICATION_PERMISSION_ENV) {
            self.notification_permission = match permission.trim().to_lowercase().as_str() {
                "granted" => PermissionStatus::Granted,
                "denied" => PermissionStatus::Denied,
                "undetermined" => PermissionStatus::Undetermined,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: NOTIFICATION_PERMISSION_ENV,
                        value: permission,
                    })
                }
            };
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidValue {
                key: "bind_address",
                value: self.bind_address.clone(),
            });
        }
        if HeaderValue::from_str(&self.cors_origin).is_err() {
            return Err(ConfigError::InvalidValue {
                key: "cors_origin",
                value: self.cors_origin.clone(),
            });
        }
        if self.reminder_tick_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "reminder_tick_secs",
                value: "0".to_string(),
            });
        }
        if self.database_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "database_file",
                value: self.database_file.clone(),
            });
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_directory.join(&self.database_file)
    }

    pub fn reminder_tick(&self) -> Duration {
        Duration::from_secs(self.reminder_tick_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_config_file() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().to_string_lossy().to_string();

        let config = AppConfig::load_with_env(env_of(&[(DATA_DIR_ENV, &data_dir)])).unwrap();

        assert_eq!(config.data_directory, dir.path());
        assert_eq!(config.bind_address, "127.0.0.1:3000");
        assert_eq!(config.storage_backend, StorageBackend::Sqlite);
        assert_eq!(config.reminder_tick(), Duration::from_secs(60));
        assert_eq!(config.database_path(), dir.path().join("lansia_helper.db"));
        assert_eq!(config.source, None);
    }

    #[test]
    fn test_partial_yaml_in_data_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "storage_backend: memory\nreminder_tick_secs: 15\nnotification_permission: granted\n",
        )
        .unwrap();
        let data_dir = dir.path().to_string_lossy().to_string();

        let config = AppConfig::load_with_env(env_of(&[(DATA_DIR_ENV, &data_dir)])).unwrap();

        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert_eq!(config.reminder_tick_secs, 15);
        assert_eq!(config.notification_permission, PermissionStatus::Granted);
        // Env override still wins over the file's (missing) data_directory
        assert_eq!(config.data_directory, dir.path());
        assert_eq!(config.log_level, "info");
        assert_eq!(config.source, Some(dir.path().join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.yaml");
        fs::write(&path, "bind_address: \"127.0.0.1:4000\"\nnotification_permission: granted\n").unwrap();
        let path = path.to_string_lossy().to_string();

        let config = AppConfig::load_with_env(env_of(&[
            (CONFIG_PATH_ENV, &path),
            (BIND_ENV, "0.0.0.0:5000"),
            (NOTIFICATION_PERMISSION_ENV, "Denied"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address, "0.0.0.0:5000");
        assert_eq!(config.notification_permission, PermissionStatus::Denied);
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.yaml").to_string_lossy().to_string();

        let err = AppConfig::load_with_env(env_of(&[(CONFIG_PATH_ENV, &path)])).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().to_string_lossy().to_string();

        let err = AppConfig::load_with_env(env_of(&[
            (DATA_DIR_ENV, &data_dir),
            (NOTIFICATION_PERMISSION_ENV, "maybe"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == NOTIFICATION_PERMISSION_ENV));

        let err = AppConfig::load_with_env(env_of(&[(DATA_DIR_ENV, &data_dir), (BIND_ENV, "localhost")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "bind_address", .. }));

        fs::write(dir.path().join(CONFIG_FILE_NAME), "reminder_tick_secs: 0\n").unwrap();
        let err = AppConfig::load_with_env(env_of(&[(DATA_DIR_ENV, &data_dir)])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "reminder_tick_secs", .. }));
    }

    #[test]
    fn test_malformed_yaml_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "storage_backend: [not, a, backend]\n").unwrap();
        let data_dir = dir.path().to_string_lossy().to_string();

        let err = AppConfig::load_with_env(env_of(&[(DATA_DIR_ENV, &data_dir)])).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
