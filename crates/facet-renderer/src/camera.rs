//! Orbit camera and the per-frame scene uniform

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::constants::camera as constants;

/// Pitch limit keeping the camera off the poles.
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Scene-wide uniform (group 0).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct SceneUniform {
    pub view_proj: [[f32; 4]; 4],
    pub highlight_color: [f32; 4],
}

impl Default for SceneUniform {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            highlight_color: crate::constants::mesh::HIGHLIGHT_COLOR,
        }
    }
}

/// Camera orbiting a target point.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Horizontal angle in radians.
    pub yaw: f32,
    /// Vertical angle in radians.
    pub pitch: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
    pub orbit_sensitivity: f32,
    pub pan_sensitivity: f32,
    pub zoom_sensitivity: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: constants::DEFAULT_DISTANCE,
            yaw: 0.6,
            pitch: 0.45,
            fov_degrees: constants::FOV_DEGREES,
            near: constants::NEAR,
            far: constants::FAR,
            aspect: 16.0 / 9.0,
            orbit_sensitivity: 0.008,
            pan_sensitivity: 0.0015,
            zoom_sensitivity: 0.1,
        }
    }
}

impl OrbitCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            aspect,
            ..Default::default()
        }
    }

    pub fn position(&self) -> Vec3 {
        let offset = Vec3::new(
            self.distance * self.pitch.cos() * self.yaw.sin(),
            self.distance * self.pitch.sin(),
            self.distance * self.pitch.cos() * self.yaw.cos(),
        );
        self.target + offset
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn update_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Rotate around the target by a mouse drag in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * self.orbit_sensitivity;
        self.pitch = (self.pitch + dy * self.orbit_sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Move the target in the view plane by a mouse drag in pixels.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let forward = (self.target - self.position()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        let scale = self.distance * self.pan_sensitivity;
        self.target += (-right * dx + up * dy) * scale;
    }

    /// Zoom by scroll lines; positive moves closer.
    pub fn zoom(&mut self, delta: f32) {
        let factor = (1.0 - delta * self.zoom_sensitivity).clamp(0.5, 1.5);
        self.distance =
            (self.distance * factor).clamp(constants::MIN_DISTANCE, constants::MAX_DISTANCE);
    }

    pub fn uniform(&self, highlight_color: [f32; 4]) -> SceneUniform {
        SceneUniform {
            view_proj: self.view_projection().to_cols_array_2d(),
            highlight_color,
        }
    }

    /// Restore target, distance and angles. Projection settings are kept.
    pub fn reset_view(&mut self) {
        let defaults = Self::default();
        self.target = defaults.target;
        self.distance = defaults.distance;
        self.yaw = defaults.yaw;
        self.pitch = defaults.pitch;
    }

    pub fn apply_config(&mut self, config: &crate::RendererConfig) {
        self.fov_degrees = config.fov_degrees;
        self.near = config.near_plane;
        self.far = config.far_plane;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_position_keeps_distance() {
        let mut camera = OrbitCamera::default();
        camera.orbit(120.0, -40.0);
        assert_relative_eq!(camera.position().distance(camera.target), camera.distance, epsilon = 1e-4);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = OrbitCamera::default();
        camera.orbit(0.0, 1.0e6);
        assert!(camera.pitch <= MAX_PITCH);
        camera.orbit(0.0, -1.0e6);
        assert!(camera.pitch >= -MAX_PITCH);
    }

    #[test]
    fn test_zoom_limits() {
        let mut camera = OrbitCamera::default();
        for _ in 0..200 {
            camera.zoom(5.0);
        }
        assert_relative_eq!(camera.distance, constants::MIN_DISTANCE);
    }

    #[test]
    fn test_reset_view_keeps_projection() {
        let mut camera = OrbitCamera::new(2.0);
        camera.fov_degrees = 80.0;
        camera.orbit(300.0, 50.0);
        camera.pan(40.0, -10.0);
        camera.zoom(3.0);

        camera.reset_view();
        let defaults = OrbitCamera::default();
        assert_eq!(camera.target, defaults.target);
        assert_relative_eq!(camera.distance, defaults.distance);
        assert_relative_eq!(camera.yaw, defaults.yaw);
        assert_relative_eq!(camera.pitch, defaults.pitch);
        assert_eq!(camera.fov_degrees, 80.0);
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn test_target_projects_to_center() {
        let camera = OrbitCamera::new(1.5);
        let clip = camera.view_projection() * camera.target.extend(1.0);
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-5);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-5);
    }
}
