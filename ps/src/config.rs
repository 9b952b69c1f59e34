//! Configuration for prefstore

use eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the preference document
    #[serde(default = "default_store_path", rename = "store-path")]
    pub store_path: PathBuf,
}

/// `<data_local_dir>/lifenav/preferences.json`, or `./preferences.json` when
/// the platform has no data directory
pub fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("lifenav"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(crate::DEFAULT_FILE_NAME)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            return Ok(config);
        }

        let default_paths = [
            dirs::config_dir().map(|p| p.join("lifenav").join("prefstore.yml")),
            Some(PathBuf::from("prefstore.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let config: Config = serde_yaml::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Config::default())
    }
}
