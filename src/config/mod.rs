//! Application configuration: endpoint, initial theme, request timeout.
//!
//! User-level config: `~/.gencircular/config.yaml`
//! Project-level config: `.gencircular/config.yaml` (overrides user keys it sets)
//!
//! Resolution: CLI flags → project config → user config → defaults.
//! A missing or malformed file contributes nothing.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::session::UiMode;

/// Where circulars are POSTed when no config says otherwise.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/generate_circular/";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot determine home directory")]
    NoHome,
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("YAML serialize error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub endpoint: String,
    pub theme: UiMode,
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            theme: UiMode::Light,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// One config file's contribution. Unset keys fall through.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigLayer {
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    theme: Option<UiMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
}

/// Path to `~/.gencircular/`.
pub fn dirs_path() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE")
            .ok()
            .map(|p| PathBuf::from(p).join(".gencircular"))
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME")
            .ok()
            .map(|p| PathBuf::from(p).join(".gencircular"))
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs_path().map(|p| p.join("config.yaml"))
}

fn project_config_path() -> PathBuf {
    PathBuf::from(".gencircular").join("config.yaml")
}

fn read_layer(path: &Path) -> ConfigLayer {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("ignoring malformed config {}: {e}", path.display());
            ConfigLayer::default()
        }),
        Err(_) => ConfigLayer::default(),
    }
}

impl AppConfig {
    /// Load user + project config from their standard locations.
    pub fn load() -> Self {
        let user = user_config_path();
        Self::load_from(user.as_deref(), Some(&project_config_path()))
    }

    /// Load from explicit paths; `project` keys override `user` keys.
    pub fn load_from(user: Option<&Path>, project: Option<&Path>) -> Self {
        let mut config = Self::default();
        for path in [user, project].into_iter().flatten() {
            config.apply(read_layer(path));
        }
        config
    }

    /// Load a single explicit file over the defaults (`--config`).
    pub fn load_file(path: &Path) -> Self {
        Self::load_from(None, Some(path))
    }

    fn apply(&mut self, layer: ConfigLayer) {
        if let Some(endpoint) = layer.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(theme) = layer.theme {
            self.theme = theme;
        }
        if let Some(timeout) = layer.timeout_secs {
            self.timeout_secs = timeout;
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Save to `~/.gencircular/config.yaml`.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let dir = dirs_path().ok_or(ConfigError::NoHome)?;
        let path = dir.join("config.yaml");
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write this config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
