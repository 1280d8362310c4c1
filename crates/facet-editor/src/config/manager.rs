//! Loading, saving and resetting the application configuration

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use super::AppConfig;

pub type SharedConfig = Arc<RwLock<ConfigManager>>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Deserialization error: {0}")]
    Deserialize(#[from] ron::error::SpannedError),
}

/// Owns the configuration and its file location; tracks unsaved changes.
pub struct ConfigManager {
    config: AppConfig,
    config_path: PathBuf,
    dirty: bool,
}

impl ConfigManager {
    /// Load from the OS configuration directory, falling back to defaults.
    pub fn new() -> Self {
        Self::with_path(default_config_path())
    }

    /// Load from `path`, falling back to defaults.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        let config_path = path.into();
        let config = match load_from_path(&config_path) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", config_path);
                config
            }
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file found, using defaults");
                AppConfig::default()
            }
            Err(e) => {
                tracing::warn!("Failed to load config {:?}: {}", config_path, e);
                AppConfig::default()
            }
        };

        Self {
            config,
            config_path,
            dirty: false,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Mutable access; marks the configuration dirty.
    pub fn config_mut(&mut self) -> &mut AppConfig {
        self.dirty = true;
        &mut self.config
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the configuration if it changed since the last save.
    pub fn save(&mut self) -> Result<(), ConfigError> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = ron::ser::to_string_pretty(&self.config, ron::ser::PrettyConfig::default())?;
        std::fs::write(&self.config_path, content)?;

        tracing::info!("Saved config to {:?}", self.config_path);
        self.dirty = false;
        Ok(())
    }

    pub fn reset_to_defaults(&mut self) {
        self.config = AppConfig::default();
        self.dirty = true;
    }

    pub fn config_file_path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("facet")
        .join("config.ron")
}

fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(ron::from_str(&content)?)
}

pub fn create_shared_config() -> SharedConfig {
    Arc::new(RwLock::new(ConfigManager::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("facet-config-{}", uuid::Uuid::new_v4()))
            .join("config.ron")
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let manager = ConfigManager::with_path(temp_path());
        assert_eq!(manager.config(), &AppConfig::default());
        assert!(!manager.is_dirty());
    }

    #[test]
    fn test_save_and_reload() {
        let path = temp_path();
        let mut manager = ConfigManager::with_path(&path);
        manager.config_mut().editor.default_lod = 42;
        manager.config_mut().renderer.grid_divisions = 30;
        assert!(manager.is_dirty());
        manager.save().unwrap();
        assert!(!manager.is_dirty());

        let reloaded = ConfigManager::with_path(&path);
        assert_eq!(reloaded.config().editor.default_lod, 42);
        assert_eq!(reloaded.config().renderer.grid_divisions, 30);

        if let Some(dir) = path.parent() {
            std::fs::remove_dir_all(dir).ok();
        }
    }

    #[test]
    fn test_invalid_file_uses_defaults() {
        let path = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not ron at all {").unwrap();

        let manager = ConfigManager::with_path(&path);
        assert_eq!(manager.config(), &AppConfig::default());
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_reset_marks_dirty() {
        let mut manager = ConfigManager::with_path(temp_path());
        manager.reset_to_defaults();
        assert!(manager.is_dirty());
    }
}
