//! Render context shared by all renderers.
//!
//! Owns the device handles, the scene uniform (group 0) and the layout of
//! the per-mesh object uniform (group 1).

use std::sync::Arc;

use wgpu::util::DeviceExt;

use crate::camera::SceneUniform;
use crate::constants::viewport;

pub struct RenderContext {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    color_format: wgpu::TextureFormat,
    depth_format: wgpu::TextureFormat,
    scene_bind_group_layout: wgpu::BindGroupLayout,
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    object_bind_group_layout: wgpu::BindGroupLayout,
    supports_primitive_index: bool,
}

fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

impl RenderContext {
    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>) -> Self {
        let scene_bind_group_layout = uniform_layout(&device, "Scene Bind Group Layout");
        let object_bind_group_layout = uniform_layout(&device, "Object Bind Group Layout");

        let scene_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Uniform Buffer"),
            contents: bytemuck::cast_slice(&[SceneUniform::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &scene_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });

        let supports_primitive_index = device
            .features()
            .contains(wgpu::Features::SHADER_PRIMITIVE_INDEX);
        tracing::info!(
            "Render context created (primitive_index: {})",
            supports_primitive_index
        );

        Self {
            device,
            queue,
            color_format: viewport::COLOR_FORMAT,
            depth_format: viewport::DEPTH_FORMAT,
            scene_bind_group_layout,
            scene_buffer,
            scene_bind_group,
            object_bind_group_layout,
            supports_primitive_index,
        }
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Format of the visible color target.
    pub fn color_format(&self) -> wgpu::TextureFormat {
        self.color_format
    }

    pub fn depth_format(&self) -> wgpu::TextureFormat {
        self.depth_format
    }

    pub fn scene_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.scene_bind_group_layout
    }

    pub fn scene_bind_group(&self) -> &wgpu::BindGroup {
        &self.scene_bind_group
    }

    pub fn object_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.object_bind_group_layout
    }

    /// Whether shaders may read `@builtin(primitive_index)`.
    pub fn supports_primitive_index(&self) -> bool {
        self.supports_primitive_index
    }

    /// Route picking through the de-indexed vertex path.
    ///
    /// Must be called before any pass or mesh is created from this context.
    pub fn disable_primitive_index(&mut self) {
        if self.supports_primitive_index {
            tracing::info!("Picking forced onto the expanded vertex path");
        }
        self.supports_primitive_index = false;
    }

    /// Upload the scene uniform.
    pub fn update_scene(&self, uniform: &SceneUniform) {
        self.queue
            .write_buffer(&self.scene_buffer, 0, bytemuck::cast_slice(&[*uniform]));
    }

    pub fn create_buffer_init(&self, desc: &wgpu::util::BufferInitDescriptor) -> wgpu::Buffer {
        self.device.create_buffer_init(desc)
    }

    pub fn create_bind_group(&self, desc: &wgpu::BindGroupDescriptor) -> wgpu::BindGroup {
        self.device.create_bind_group(desc)
    }
}
