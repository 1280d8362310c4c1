//! World coordinate axes

use crate::config::RendererConfig;
use crate::constants::axis as constants;
use crate::context::RenderContext;
use crate::error::RendererError;
use crate::pipeline::PipelineConfig;
use crate::vertex::PositionColorVertex;

pub struct AxisRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    length: f32,
}

impl AxisRenderer {
    pub fn new(ctx: &RenderContext, config: &RendererConfig) -> Result<Self, RendererError> {
        // Drawn over the grid lines they coincide with.
        let pipeline = PipelineConfig::new(
            "Axis",
            include_str!("shaders/line.wgsl"),
            ctx.color_format(),
            ctx.depth_format(),
            &[ctx.scene_bind_group_layout()],
        )
        .with_vertex_layouts(vec![PositionColorVertex::layout()])
        .with_topology(wgpu::PrimitiveTopology::LineList)
        .with_depth_compare(wgpu::CompareFunction::LessEqual)
        .build(ctx.device())?;

        let length = config.grid_size / 2.0;
        let vertex_buffer = create_vertex_buffer(ctx, length);
        Ok(Self {
            pipeline,
            vertex_buffer,
            length,
        })
    }

    pub fn apply_config(&mut self, ctx: &RenderContext, config: &RendererConfig) {
        let length = config.grid_size / 2.0;
        if length != self.length {
            self.length = length;
            self.vertex_buffer.destroy();
            self.vertex_buffer = create_vertex_buffer(ctx, length);
        }
    }

    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>, scene_bind_group: &wgpu::BindGroup) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, scene_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..6, 0..1);
    }
}

fn create_vertex_buffer(ctx: &RenderContext, length: f32) -> wgpu::Buffer {
    ctx.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Axis Vertex Buffer"),
        contents: bytemuck::cast_slice(&generate_axis_vertices(length)),
        usage: wgpu::BufferUsages::VERTEX,
    })
}

/// X (red), Y (green) and Z (blue) from the origin.
pub fn generate_axis_vertices(length: f32) -> [PositionColorVertex; 6] {
    [
        PositionColorVertex::new([0.0, 0.0, 0.0], constants::X_COLOR),
        PositionColorVertex::new([length, 0.0, 0.0], constants::X_COLOR),
        PositionColorVertex::new([0.0, 0.0, 0.0], constants::Y_COLOR),
        PositionColorVertex::new([0.0, length, 0.0], constants::Y_COLOR),
        PositionColorVertex::new([0.0, 0.0, 0.0], constants::Z_COLOR),
        PositionColorVertex::new([0.0, 0.0, length], constants::Z_COLOR),
    ]
}
