use serde::{Deserialize, Serialize};
use sitecraft_editor::{EngineConfig, DEFAULT_HISTORY_LIMIT};
use sitecraft_workspace::{AutoSaveConfig, FileStore};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "sitecraft.config.json";

/// Sitecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory the document store writes to
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    /// Undo/redo checkpoints kept per session
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default)]
    pub autosave: AutoSaveConfig,
}

fn default_storage_dir() -> String {
    ".sitecraft".to_string()
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn storage_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.storage_dir)
    }

    pub fn store(&self, cwd: &str) -> FileStore {
        FileStore::new(self.storage_dir(cwd))
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            history_limit: self.history_limit,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            history_limit: default_history_limit(),
            autosave: AutoSaveConfig::default(),
        }
    }
}
