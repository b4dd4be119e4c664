//! Configuration management for the Hospice CLI.

use anyhow::{Context, Result};
use hospice::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE: &str = "hospice.toml";

/// Hospice project configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub aco: AcoConfig,
    #[serde(default)]
    pub admission: AdmissionConfig,
    #[serde(default)]
    pub grid: GridSpec,
    #[serde(default = "default_store")]
    pub store: StoreConfig,
}

fn default_store() -> StoreConfig { StoreConfig::sqlite(".hospice/pheromones.db") }

impl Default for Config {
    fn default() -> Self {
        Self {
            aco: AcoConfig::default(),
            admission: AdmissionConfig::default(),
            grid: GridSpec::default(),
            store: default_store(),
        }
    }
}

impl Config {
    /// Load config from hospice.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Open the pheromone store, creating the database directory if needed.
    pub fn open_store(&self) -> Result<DynPheromoneStore> {
        if let StoreConfig::Sqlite { path: Some(path) } = &self.store {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        create_store(&self.store).context("Failed to open pheromone store")
    }
}

/// Find hospice.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        Config::default().save(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.aco, AcoConfig::default());
        assert_eq!(loaded.admission, AdmissionConfig::default());
        assert_eq!(loaded.store, default_store());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            "[aco]\niterations = 5\nlayout = \"preserve-original\"\n\n[store]\nkind = \"in-memory\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.aco.iterations, 5);
        assert_eq!(config.aco.ant_count, 20);
        assert_eq!(config.aco.layout, LayoutStrategy::PreserveOriginal);
        assert_eq!(config.store, StoreConfig::InMemory);
        assert_eq!(config.grid.columns, 8);
    }

    #[test]
    fn invalid_toml_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[aco\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
