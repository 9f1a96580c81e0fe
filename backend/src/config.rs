//! # Application Configuration
//!
//! Optional YAML file controlling where dossiers are stored.
//!
//! ## YAML Format
//!
//! ```yaml
//! data_directory: "/home/user/Documents/La Gestiona"
//! collection_key: "dossiers"
//! log_level: "info"
//! ```
//!
//! ## Resolution Order
//!
//! 1. file given on the command line
//! 2. file named by `DOSSIER_TRACKER_CONFIG`
//! 3. `config.yaml` in the default data directory, when present
//! 4. built-in defaults
//!
//! `DOSSIER_TRACKER_DATA_DIR` overrides the data directory in every case.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::JsonConnection;

pub const CONFIG_ENV_VAR: &str = "DOSSIER_TRACKER_CONFIG";
pub const DATA_DIR_ENV_VAR: &str = "DOSSIER_TRACKER_DATA_DIR";
pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const DEFAULT_COLLECTION_KEY: &str = "dossiers";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the collection file; the documents folder when unset
    pub data_directory: Option<PathBuf>,
    /// Key (file stem) the collection is stored under
    pub collection_key: String,
    /// Default log filter when RUST_LOG is not set
    pub log_level: String,
    /// File the configuration was read from; `None` for built-in defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: None,
            collection_key: DEFAULT_COLLECTION_KEY.to_string(),
            log_level: "info".to_string(),
            source: None,
        }
    }
}

impl AppConfig {
    /// Read a configuration file; missing keys take their default values
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Resolve the configuration from the process environment
    pub fn resolve(explicit_path: Option<&Path>) -> Result<Self> {
        Self::resolve_with(explicit_path, |key| std::env::var(key).ok())
    }

    /// Resolve the configuration with an injectable environment lookup
    pub fn resolve_with<F>(explicit_path: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_path = env(CONFIG_ENV_VAR).filter(|p| !p.is_empty()).map(PathBuf::from);
        let default_path = JsonConnection::default_data_directory().join(CONFIG_FILE_NAME);

        let mut config = match (explicit_path, env_path) {
            (Some(path), _) => Self::load_from_file(path)?,
            (None, Some(path)) => Self::load_from_file(&path)?,
            (None, None) if default_path.is_file() => Self::load_from_file(&default_path)?,
            (None, None) => Self::default(),
        };

        if let Some(dir) = env(DATA_DIR_ENV_VAR).filter(|d| !d.is_empty()) {
            config.data_directory = Some(PathBuf::from(dir));
        }

        if config.collection_key.trim().is_empty() {
            anyhow::bail!("collection_key must not be empty");
        }

        Ok(config)
    }

    /// Data directory to use, falling back to the default location
    pub fn data_directory(&self) -> PathBuf {
        self.data_directory
            .clone()
            .unwrap_or_else(JsonConnection::default_data_directory)
    }
}
