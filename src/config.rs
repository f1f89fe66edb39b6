//! Persisted settings, overridden by command-line flags

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root of the JSON fixture tree served as the backend
    #[serde(default)]
    pub data_dir: Option<String>,
    /// Where log output goes; defaults to `courses-tui.log` in the config directory
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".courses-tui"))
    }

    fn config_path(config_dir: &Path) -> PathBuf {
        config_dir.join("config.json")
    }

    pub fn load(config_dir: &Path) -> Option<Config> {
        let config_path = Self::config_path(config_dir);
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the config to disk
    pub fn save(&self, config_dir: &Path) -> anyhow::Result<()> {
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(Self::config_path(config_dir), contents)?;

        Ok(())
    }

    /// Flag values win over stored ones
    pub fn merge(self, data_dir: Option<String>, log_file: Option<String>) -> Config {
        Config {
            data_dir: data_dir.or(self.data_dir),
            log_file: log_file.or(self.log_file),
        }
    }

    pub fn log_path(&self, config_dir: &Path) -> PathBuf {
        self.log_file
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| config_dir.join("courses-tui.log"))
    }
}
