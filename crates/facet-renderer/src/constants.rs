//! Rendering constants

/// Viewport targets.
pub mod viewport {
    /// Format of the color texture shown in the editor.
    pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
    pub const CLEAR_COLOR: [f32; 4] = [0.12, 0.12, 0.13, 1.0];
}

/// Identity (picking) target.
pub mod identity {
    /// Object id, draw id, primitive id, unused.
    pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba32Uint;
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
    /// Bytes of one `Rgba32Uint` texel.
    pub const TEXEL_SIZE: u64 = 16;
    /// Row pitch of the single-texel copy (`COPY_BYTES_PER_ROW_ALIGNMENT`).
    pub const STAGING_BYTES_PER_ROW: u32 = 256;
}

/// Ground grid on the XZ plane.
pub mod grid {
    pub const DEFAULT_SIZE: f32 = 150.0;
    pub const DEFAULT_DIVISIONS: u32 = 150;
    pub const LINE_COLOR: [f32; 3] = [0.4, 0.4, 0.4];
}

/// World axes drawn from the origin.
pub mod axis {
    pub const X_COLOR: [f32; 3] = [1.0, 0.0, 0.0];
    pub const Y_COLOR: [f32; 3] = [0.0, 1.0, 0.0];
    pub const Z_COLOR: [f32; 3] = [0.0, 0.0, 1.0];
}

/// Mesh shading.
pub mod mesh {
    pub const DEFAULT_COLOR: [f32; 4] = [0.8, 0.8, 0.8, 1.0];
    pub const HIGHLIGHT_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
}

/// Camera defaults.
pub mod camera {
    pub const FOV_DEGREES: f32 = 45.0;
    pub const NEAR: f32 = 0.1;
    pub const FAR: f32 = 500.0;
    pub const DEFAULT_DISTANCE: f32 = 12.0;
    pub const MIN_DISTANCE: f32 = 0.5;
    pub const MAX_DISTANCE: f32 = 300.0;
}
