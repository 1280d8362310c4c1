//! Application configuration
//!
//! Renderer settings, editor preferences and UI settings, persisted as RON.

mod manager;

pub use manager::{ConfigError, ConfigManager, SharedConfig, create_shared_config};

use std::path::PathBuf;

use facet_renderer::RendererConfig;
use serde::{Deserialize, Serialize};

/// Default content library location, relative to the working directory.
pub const DEFAULT_CONTENT_ROOT: &str = "./Database";

/// Editor preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    /// Root of the content browser
    pub content_root: PathBuf,
    /// Level of detail proposed by the mesh creator
    pub default_lod: u32,
    pub show_grid: bool,
    pub show_axes: bool,
    pub show_scene_inspector: bool,
    pub show_performance: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from(DEFAULT_CONTENT_ROOT),
            default_lod: 10,
            show_grid: true,
            show_axes: true,
            show_scene_inspector: true,
            show_performance: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum UiTheme {
    #[default]
    Dark,
    Light,
}

/// UI preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub theme: UiTheme,
    /// Multiplier applied to egui's points-per-pixel
    pub font_scale: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: UiTheme::Dark,
            font_scale: 1.0,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub renderer: RendererConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    pub const CURRENT_VERSION: u32 = 1;
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            renderer: RendererConfig::default(),
            editor: EditorConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = ron::from_str("(version: 1, ui: (theme: Light))").unwrap();
        assert_eq!(config.ui.theme, UiTheme::Light);
        assert_eq!(config.ui.font_scale, 1.0);
        assert_eq!(config.editor, EditorConfig::default());
        assert_eq!(config.renderer.grid_divisions, 150);
    }
}
