//! Ground grid on the XZ plane

use crate::config::RendererConfig;
use crate::context::RenderContext;
use crate::error::RendererError;
use crate::pipeline::PipelineConfig;
use crate::vertex::PositionColorVertex;

pub struct GridRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    size: f32,
    divisions: u32,
    color: [f32; 3],
}

impl GridRenderer {
    pub fn new(ctx: &RenderContext, config: &RendererConfig) -> Result<Self, RendererError> {
        let pipeline = PipelineConfig::new(
            "Grid",
            include_str!("shaders/line.wgsl"),
            ctx.color_format(),
            ctx.depth_format(),
            &[ctx.scene_bind_group_layout()],
        )
        .with_vertex_layouts(vec![PositionColorVertex::layout()])
        .with_topology(wgpu::PrimitiveTopology::LineList)
        .build(ctx.device())?;

        let vertices =
            generate_grid_vertices(config.grid_size, config.grid_divisions, config.grid_color);
        let vertex_buffer = create_vertex_buffer(ctx, &vertices);

        Ok(Self {
            pipeline,
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            size: config.grid_size,
            divisions: config.grid_divisions,
            color: config.grid_color,
        })
    }

    /// Regenerate the lines if the grid settings changed.
    pub fn apply_config(&mut self, ctx: &RenderContext, config: &RendererConfig) {
        if self.size == config.grid_size
            && self.divisions == config.grid_divisions
            && self.color == config.grid_color
        {
            return;
        }
        self.size = config.grid_size;
        self.divisions = config.grid_divisions;
        self.color = config.grid_color;

        let vertices = generate_grid_vertices(self.size, self.divisions, self.color);
        self.vertex_count = vertices.len() as u32;
        self.vertex_buffer.destroy();
        self.vertex_buffer = create_vertex_buffer(ctx, &vertices);
        tracing::debug!("Rebuilt grid: size {}, {} divisions", self.size, self.divisions);
    }

    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>, scene_bind_group: &wgpu::BindGroup) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, scene_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }
}

fn create_vertex_buffer(ctx: &RenderContext, vertices: &[PositionColorVertex]) -> wgpu::Buffer {
    ctx.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Grid Vertex Buffer"),
        contents: bytemuck::cast_slice(vertices),
        usage: wgpu::BufferUsages::VERTEX,
    })
}

/// Lines of constant X and constant Z covering `size` x `size` around the origin.
pub fn generate_grid_vertices(size: f32, divisions: u32, color: [f32; 3]) -> Vec<PositionColorVertex> {
    let divisions = divisions.max(1);
    let half = size / 2.0;
    let step = size / divisions as f32;

    let mut vertices = Vec::with_capacity((divisions as usize + 1) * 4);
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        vertices.push(PositionColorVertex::new([k, 0.0, -half], color));
        vertices.push(PositionColorVertex::new([k, 0.0, half], color));
        vertices.push(PositionColorVertex::new([-half, 0.0, k], color));
        vertices.push(PositionColorVertex::new([half, 0.0, k], color));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_vertices() {
        let vertices = generate_grid_vertices(10.0, 10, [0.4; 3]);
        assert_eq!(vertices.len(), 44);
        assert!(vertices.iter().all(|v| v.position[1] == 0.0));
        assert_eq!(vertices[0].position, [-5.0, 0.0, -5.0]);
        assert_eq!(vertices.last().unwrap().position, [5.0, 0.0, 5.0]);
    }
}
