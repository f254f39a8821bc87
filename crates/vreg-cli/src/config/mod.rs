//! CLI configuration
//!
//! One JSON file under the vreg home (next to the session store), plus the
//! `VREG_API_URL` environment override.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vreg_client::store::vreg_home;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            api_url: default_api_url(),
        }
    }
}

pub struct ConfigManager;

impl ConfigManager {
    /// Get the config file path (~/.vreg/config.json)
    pub fn config_path() -> Result<PathBuf> {
        Ok(vreg_home().context("Could not resolve the vreg home directory")?.join("config.json"))
    }

    /// Load config from disk, defaults when the file does not exist
    pub fn load() -> Result<CliConfig> {
        Self::load_from(&Self::config_path()?)
    }

    /// Save config to disk
    pub fn save(config: &CliConfig) -> Result<()> {
        Self::save_to(&Self::config_path()?, config)
    }

    fn load_from(path: &Path) -> Result<CliConfig> {
        if !path.exists() {
            return Ok(CliConfig::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    fn save_to(path: &Path, config: &CliConfig) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }
        let content =
            serde_json::to_string_pretty(config).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;
        Ok(())
    }

    /// API base URL to use: VREG_API_URL wins over the config file
    pub fn api_url() -> Result<String> {
        if let Ok(url) = std::env::var("VREG_API_URL") {
            return Ok(url.trim_end_matches('/').to_string());
        }
        Ok(Self::load()?.api_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips() {
        let config = CliConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: CliConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_missing_field_falls_back_to_default() {
        let config: CliConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_config_file_round_trip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");

        let config = CliConfig {
            api_url: "https://registry.example.com/api".to_string(),
        };
        ConfigManager::save_to(&path, &config)?;

        let loaded = ConfigManager::load_from(&path)?;
        assert_eq!(loaded.api_url, "https://registry.example.com/api");
        Ok(())
    }

    #[test]
    fn test_missing_file_loads_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let loaded = ConfigManager::load_from(&dir.path().join("nope.json"))?;
        assert_eq!(loaded.api_url, DEFAULT_API_URL);
        Ok(())
    }
}
