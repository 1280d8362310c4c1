//! Renderer configuration

use serde::{Deserialize, Serialize};

use crate::constants;

/// Settings the editor can change at runtime and persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Side length of the ground grid.
    pub grid_size: f32,
    /// Number of cells along each side of the grid.
    pub grid_divisions: u32,
    pub grid_color: [f32; 3],
    pub background_color: [f32; 4],
    pub mesh_color: [f32; 4],
    /// Color of the picked triangle.
    pub highlight_color: [f32; 4],
    pub fov_degrees: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    /// Pick through the de-indexed vertex path even when the device
    /// supports `primitive_index`. Read when the renderer is created.
    pub picking_fallback: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            grid_size: constants::grid::DEFAULT_SIZE,
            grid_divisions: constants::grid::DEFAULT_DIVISIONS,
            grid_color: constants::grid::LINE_COLOR,
            background_color: constants::viewport::CLEAR_COLOR,
            mesh_color: constants::mesh::DEFAULT_COLOR,
            highlight_color: constants::mesh::HIGHLIGHT_COLOR,
            fov_degrees: constants::camera::FOV_DEGREES,
            near_plane: constants::camera::NEAR,
            far_plane: constants::camera::FAR,
            picking_fallback: false,
        }
    }
}

impl RendererConfig {
    /// Distance between two grid lines.
    pub fn grid_step(&self) -> f32 {
        self.grid_size / self.grid_divisions.max(1) as f32
    }

    /// Restore field of view and clip planes.
    pub fn reset_camera(&mut self) {
        let defaults = Self::default();
        self.fov_degrees = defaults.fov_degrees;
        self.near_plane = defaults.near_plane;
        self.far_plane = defaults.far_plane;
    }

    /// Restore grid size and divisions.
    pub fn reset_grid(&mut self) {
        let defaults = Self::default();
        self.grid_size = defaults.grid_size;
        self.grid_divisions = defaults.grid_divisions;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_step() {
        let config = RendererConfig::default();
        assert_eq!(config.grid_step(), 1.0);

        let config = RendererConfig {
            grid_divisions: 0,
            ..Default::default()
        };
        assert_eq!(config.grid_step(), config.grid_size);
    }

    #[test]
    fn test_partial_resets() {
        let mut config = RendererConfig {
            fov_degrees: 90.0,
            near_plane: 0.5,
            far_plane: 2000.0,
            grid_size: 40.0,
            grid_divisions: 20,
            ..Default::default()
        };

        config.reset_camera();
        assert_eq!(config.fov_degrees, constants::camera::FOV_DEGREES);
        assert_eq!(config.near_plane, constants::camera::NEAR);
        assert_eq!(config.far_plane, constants::camera::FAR);
        assert_eq!(config.grid_size, 40.0);

        config.reset_grid();
        assert_eq!(config, RendererConfig::default());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: RendererConfig = ron::from_str("(fov_degrees: 60.0)").unwrap();
        assert_eq!(config.fov_degrees, 60.0);
        assert!(!config.picking_fallback);
        assert_eq!(config.grid_divisions, constants::grid::DEFAULT_DIVISIONS);
    }
}
