//! Viewport rendering state

use std::sync::Arc;

use facet_core::InputState;
use facet_renderer::{RendererConfig, RendererError, SceneRenderer};
use parking_lot::Mutex;

/// Initial size of the off-screen targets, replaced on the first frame.
const INITIAL_SIZE: (u32, u32) = (800, 600);

/// Render texture for viewport
struct RenderTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    egui_texture_id: egui::TextureId,
    width: u32,
    height: u32,
}

/// Viewport rendering state
pub struct ViewportState {
    pub renderer: SceneRenderer,
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
    render_texture: Option<RenderTexture>,
}

impl ViewportState {
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        config: RendererConfig,
    ) -> Result<Self, RendererError> {
        let renderer = SceneRenderer::new(
            device.clone(),
            queue.clone(),
            config,
            INITIAL_SIZE.0,
            INITIAL_SIZE.1,
        )?;
        Ok(Self {
            renderer,
            device,
            queue,
            render_texture: None,
        })
    }

    /// Ensure the render texture matches the requested size
    pub fn ensure_texture(
        &mut self,
        width: u32,
        height: u32,
        egui_renderer: &mut egui_wgpu::Renderer,
    ) -> Result<egui::TextureId, RendererError> {
        let width = width.max(1);
        let height = height.max(1);

        if let Some(rt) = &self.render_texture
            && rt.width == width
            && rt.height == height
        {
            return Ok(rt.egui_texture_id);
        }

        self.renderer.resize(width, height)?;

        if let Some(old) = self.render_texture.take() {
            egui_renderer.free_texture(&old.egui_texture_id);
            old.texture.destroy();
        }

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Viewport Render Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.renderer.color_format(),
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let egui_texture_id =
            egui_renderer.register_native_texture(&self.device, &view, wgpu::FilterMode::Linear);

        tracing::debug!("Viewport texture resized to {}x{}", width, height);
        self.render_texture = Some(RenderTexture {
            texture,
            view,
            egui_texture_id,
            width,
            height,
        });
        Ok(egui_texture_id)
    }

    /// Camera navigation and picking for this frame.
    ///
    /// `response` covers the viewport image. Returns the picked
    /// `(mesh, triangle)` when a pick was issued.
    pub fn handle_input(&mut self, ui: &egui::Ui, response: &egui::Response) -> Option<Option<(usize, usize)>> {
        let pixels_per_point = ui.ctx().pixels_per_point();

        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta() * pixels_per_point;
            self.renderer.camera_mut().orbit(delta.x, delta.y);
        }
        if response.dragged_by(egui::PointerButton::Middle) {
            let delta = response.drag_delta() * pixels_per_point;
            self.renderer.camera_mut().pan(delta.x, delta.y);
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                // One scroll line is roughly 50 points.
                self.renderer.camera_mut().zoom(scroll / 50.0);
            }
        }

        let primary_down = ui.input(|i| i.pointer.primary_down());
        let cursor = response.hover_pos().map(|pos| {
            let local = (pos - response.rect.min) * pixels_per_point;
            (local.x, local.y)
        });
        // A press that started outside the viewport never picks.
        let pressed_here = response.is_pointer_button_down_on();
        let input = InputState {
            cursor,
            primary_down: primary_down && pressed_here,
        };

        input
            .pick_request()
            .map(|cursor| self.renderer.request_pick(cursor))
    }

    /// Render the 3D scene to the texture
    pub fn render(&mut self) {
        let Some(rt) = &self.render_texture else {
            return;
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Viewport Render Encoder"),
            });
        self.renderer.render(&mut encoder, &rt.view);
        self.queue.submit(std::iter::once(encoder.finish()));
    }
}

impl Drop for ViewportState {
    fn drop(&mut self) {
        if let Some(rt) = &self.render_texture {
            rt.texture.destroy();
        }
    }
}

pub type SharedViewportState = Arc<Mutex<ViewportState>>;
