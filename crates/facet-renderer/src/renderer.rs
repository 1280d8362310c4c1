//! Scene renderer: owns the meshes, draws the viewport and resolves picks

use std::sync::Arc;

use facet_core::{IdentityPixel, Mesh, MeshCollection, Scene, Selection, TargetOrigin};

use crate::axis::AxisRenderer;
use crate::camera::OrbitCamera;
use crate::config::RendererConfig;
use crate::context::RenderContext;
use crate::error::RendererError;
use crate::grid::GridRenderer;
use crate::identity::IdentityFramebuffer;
use crate::identity_pass::{IdentityPass, PrimitiveSource};
use crate::mesh::{GpuMesh, ObjectUniform, split_draw_ranges};
use crate::pipeline::PipelineConfig;
use crate::vertex::PositionColorVertex;

/// wgpu textures store row 0 at the top, like egui.
const IDENTITY_ORIGIN: TargetOrigin = TargetOrigin::TopLeft;

pub struct SceneRenderer {
    ctx: RenderContext,
    scene: Scene<GpuMesh>,
    camera: OrbitCamera,
    config: RendererConfig,
    grid: GridRenderer,
    axis: AxisRenderer,
    mesh_pipeline: wgpu::RenderPipeline,
    highlight_pipeline: wgpu::RenderPipeline,
    identity_pass: IdentityPass,
    identity: IdentityFramebuffer,
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
    pub show_grid: bool,
    pub show_axes: bool,
}

impl SceneRenderer {
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        config: RendererConfig,
        width: u32,
        height: u32,
    ) -> Result<Self, RendererError> {
        let mut ctx = RenderContext::new(device, queue);
        if config.picking_fallback {
            ctx.disable_primitive_index();
        }
        let width = width.max(1);
        let height = height.max(1);

        let layouts = [ctx.scene_bind_group_layout(), ctx.object_bind_group_layout()];
        let mesh_pipeline = PipelineConfig::new(
            "Mesh",
            include_str!("shaders/mesh.wgsl"),
            ctx.color_format(),
            ctx.depth_format(),
            &layouts,
        )
        .with_vertex_layouts(vec![PositionColorVertex::layout()])
        .build(ctx.device())?;

        let highlight_pipeline = PipelineConfig::new(
            "Mesh Highlight",
            include_str!("shaders/mesh.wgsl"),
            ctx.color_format(),
            ctx.depth_format(),
            &layouts,
        )
        .with_vertex_layouts(vec![PositionColorVertex::layout()])
        .with_entry_points("vs_main", "fs_highlight")
        .with_depth_compare(wgpu::CompareFunction::LessEqual)
        .build(ctx.device())?;

        let grid = GridRenderer::new(&ctx, &config)?;
        let axis = AxisRenderer::new(&ctx, &config)?;
        let identity_pass = IdentityPass::new(&ctx)?;
        let identity = IdentityFramebuffer::init(ctx.device(), width, height)?;
        let (depth_texture, depth_view) = create_depth_texture(&ctx, width, height);

        let mut camera = OrbitCamera::new(width as f32 / height as f32);
        camera.apply_config(&config);

        tracing::info!("Scene renderer initialized ({}x{})", width, height);
        Ok(Self {
            ctx,
            scene: Scene::new(),
            camera,
            config,
            grid,
            axis,
            mesh_pipeline,
            highlight_pipeline,
            identity_pass,
            identity,
            depth_texture,
            depth_view,
            width,
            height,
            show_grid: true,
            show_axes: true,
        })
    }

    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    pub fn color_format(&self) -> wgpu::TextureFormat {
        self.ctx.color_format()
    }

    /// How the identity pass obtains triangle indices on this device.
    pub fn primitive_source(&self) -> PrimitiveSource {
        self.identity_pass.source()
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RendererConfig) {
        if config == self.config {
            return;
        }
        if config.picking_fallback != self.config.picking_fallback {
            tracing::info!("Picking path change applies after restart");
        }
        self.grid.apply_config(&self.ctx, &config);
        self.axis.apply_config(&self.ctx, &config);
        self.camera.apply_config(&config);
        self.config = config;
    }

    // ---- mesh collection ----

    pub fn meshes(&self) -> &MeshCollection<GpuMesh> {
        self.scene.meshes()
    }

    pub fn mesh_mut(&mut self, index: usize) -> Option<&mut Mesh> {
        self.scene.mesh_mut(index)
    }

    pub fn selection(&self) -> Selection {
        self.scene.selection()
    }

    /// Upload `mesh` and append it to the collection. Returns its index.
    pub fn append(&mut self, mesh: Mesh) -> usize {
        let gpu = GpuMesh::upload(&self.ctx, &mesh);
        self.scene.append(mesh, gpu)
    }

    /// Remove a mesh, releasing its GPU buffers.
    pub fn remove(&mut self, index: usize) -> Option<Mesh> {
        self.scene.remove(index).map(|entry| entry.mesh)
    }

    pub fn clear(&mut self) {
        self.scene.clear();
    }

    /// Reallocate the depth and identity targets.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RendererError> {
        if width == self.width && height == self.height {
            return Ok(());
        }
        self.identity.resize(self.ctx.device(), width, height)?;
        self.depth_texture.destroy();
        let (depth_texture, depth_view) = create_depth_texture(&self.ctx, width, height);
        self.depth_texture = depth_texture;
        self.depth_view = depth_view;
        self.width = width;
        self.height = height;
        self.camera.update_aspect(width, height);
        Ok(())
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Recompute dirty model matrices and upload the scene and object uniforms.
    fn prepare(&mut self) {
        self.scene.update_model_matrices();
        self.ctx
            .update_scene(&self.camera.uniform(self.config.highlight_color));

        let color = self.config.mesh_color;
        for (index, entry) in self.scene.meshes().iter().enumerate() {
            let uniform = ObjectUniform::new(entry.mesh.model_matrix(), color, index);
            entry.gpu.write_uniform(self.ctx.queue(), &uniform);
        }
    }

    /// Render the identity pass, read the pixel under `cursor` (viewport
    /// pixels, origin top-left) and update the selection.
    ///
    /// Returns the selected `(mesh, triangle)` afterwards.
    pub fn request_pick(&mut self, cursor: (f32, f32)) -> Option<(usize, usize)> {
        let coord = IDENTITY_ORIGIN.to_target(
            cursor.0,
            cursor.1,
            self.identity.width(),
            self.identity.height(),
        );
        let Some(coord) = coord else {
            return self.scene.apply_pick(IdentityPixel::BACKGROUND);
        };

        self.prepare();
        let mut encoder = self
            .ctx
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Identity Encoder"),
            });
        self.identity_pass.encode(
            &mut encoder,
            &self.identity,
            self.ctx.scene_bind_group(),
            self.scene.meshes(),
        );
        self.identity.copy_pixel(&mut encoder, coord);
        self.ctx.queue().submit(std::iter::once(encoder.finish()));

        match self.identity.read_pixel(self.ctx.device()) {
            Ok(pixel) => self.scene.apply_pick(pixel),
            Err(e) => {
                tracing::warn!("Pick readback failed: {}", e);
                self.scene.selection().picked()
            }
        }
    }

    /// Draw grid, axes and meshes into `view`, highlighting the picked triangle.
    pub fn render(&mut self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        self.prepare();

        let [r, g, b, a] = self.config.background_color;
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Viewport Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: r as f64,
                        g: g as f64,
                        b: b as f64,
                        a: a as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        let scene_bind_group = self.ctx.scene_bind_group();
        if self.show_grid {
            self.grid.render(&mut pass, scene_bind_group);
        }
        if self.show_axes {
            self.axis.render(&mut pass, scene_bind_group);
        }

        let selection = self.scene.selection();
        pass.set_bind_group(0, scene_bind_group, &[]);
        for (index, entry) in self.scene.meshes().iter().enumerate() {
            if !entry.mesh.visible {
                continue;
            }
            let gpu = &entry.gpu;
            pass.set_bind_group(1, gpu.object_bind_group(), &[]);
            pass.set_vertex_buffer(0, gpu.vertex_buffer().slice(..));
            pass.set_index_buffer(gpu.index_buffer().slice(..), wgpu::IndexFormat::Uint32);

            let picked = match selection {
                Selection::Selected { mesh, triangle } if mesh == index => Some(triangle),
                _ => None,
            };
            let (ranges, highlight) = split_draw_ranges(gpu.index_count(), picked);

            pass.set_pipeline(&self.mesh_pipeline);
            for range in ranges {
                pass.draw_indexed(range, 0, 0..1);
            }
            if let Some(range) = highlight {
                pass.set_pipeline(&self.highlight_pipeline);
                pass.draw_indexed(range, 0, 0..1);
            }
        }
    }
}

fn create_depth_texture(ctx: &RenderContext, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = ctx.device().create_texture(&wgpu::TextureDescriptor {
        label: Some("Viewport Depth Texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: ctx.depth_format(),
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}
