//! Identity render pass: writes object and triangle ids instead of color

use facet_core::MeshCollection;

use crate::constants::identity as constants;
use crate::context::RenderContext;
use crate::error::RendererError;
use crate::identity::IdentityFramebuffer;
use crate::mesh::GpuMesh;
use crate::pipeline::PipelineConfig;
use crate::vertex::PositionColorVertex;

/// How the triangle index reaches the fragment shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveSource {
    /// `@builtin(primitive_index)` on indexed draws.
    Rasterizer,
    /// `vertex_index / 3` on the de-indexed vertex buffer.
    ExpandedVertices,
}

pub struct IdentityPass {
    pipeline: wgpu::RenderPipeline,
    source: PrimitiveSource,
}

impl IdentityPass {
    pub fn new(ctx: &RenderContext) -> Result<Self, RendererError> {
        let (source, shader) = if ctx.supports_primitive_index() {
            (PrimitiveSource::Rasterizer, include_str!("shaders/identity.wgsl"))
        } else {
            tracing::info!("SHADER_PRIMITIVE_INDEX unavailable, identity pass uses expanded vertices");
            (
                PrimitiveSource::ExpandedVertices,
                include_str!("shaders/identity_expanded.wgsl"),
            )
        };

        let pipeline = PipelineConfig::new(
            "Identity",
            shader,
            constants::COLOR_FORMAT,
            constants::DEPTH_FORMAT,
            &[ctx.scene_bind_group_layout(), ctx.object_bind_group_layout()],
        )
        .with_vertex_layouts(vec![PositionColorVertex::layout()])
        .without_blending()
        .build(ctx.device())?;

        Ok(Self { pipeline, source })
    }

    pub fn source(&self) -> PrimitiveSource {
        self.source
    }

    /// Draw every visible mesh into `target` in collection order.
    ///
    /// Object uniforms must already hold the ids of the current collection order.
    pub fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &IdentityFramebuffer,
        scene_bind_group: &wgpu::BindGroup,
        meshes: &MeshCollection<GpuMesh>,
    ) {
        let mut pass = target.begin_pass(encoder);
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, scene_bind_group, &[]);

        for entry in meshes.iter().filter(|e| e.mesh.visible) {
            let gpu = &entry.gpu;
            pass.set_bind_group(1, gpu.object_bind_group(), &[]);
            match (self.source, gpu.expanded_buffer()) {
                (PrimitiveSource::ExpandedVertices, Some(expanded)) => {
                    pass.set_vertex_buffer(0, expanded.slice(..));
                    pass.draw(0..gpu.index_count(), 0..1);
                }
                (PrimitiveSource::ExpandedVertices, None) => {
                    tracing::warn!("Mesh '{}' has no expanded buffer, not pickable", entry.mesh.name);
                }
                (PrimitiveSource::Rasterizer, _) => {
                    pass.set_vertex_buffer(0, gpu.vertex_buffer().slice(..));
                    pass.set_index_buffer(gpu.index_buffer().slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..gpu.index_count(), 0, 0..1);
                }
            }
        }
    }
}
