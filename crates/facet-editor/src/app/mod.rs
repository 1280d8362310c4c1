//! Main application

mod menu;
mod overlays;

use std::sync::Arc;

use facet_core::{generate, load_obj};
use parking_lot::Mutex;

use crate::config::{SharedConfig, UiTheme, create_shared_config};
use crate::panels::{
    CameraScenePanel, ContentBrowserPanel, ObjectEditorPanel, Panel, PanelContext,
    SceneCollectionPanel, SceneInspectorPanel, show_mesh_creator, show_object_preview,
};
use crate::state::{AppAction, SharedAppState, create_shared_state};
use crate::viewport_state::{SharedViewportState, ViewportState};

use overlays::FrameStats;

/// Facet scene editor
pub struct FacetApp {
    app_state: SharedAppState,
    config: SharedConfig,
    viewport: Option<SharedViewportState>,
    /// Renderer initialization failure shown instead of the viewport.
    init_error: Option<String>,
    scene_collection: SceneCollectionPanel,
    object_editor: ObjectEditorPanel,
    camera_scene: CameraScenePanel,
    inspector: SceneInspectorPanel,
    content_browser: ContentBrowserPanel,
    stats: FrameStats,
    applied_ui: Option<(UiTheme, f32)>,
}

impl FacetApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = create_shared_config();

        let (viewport, init_error) = match cc.wgpu_render_state.as_ref() {
            Some(render_state) => {
                let renderer_config = config.read().config().renderer.clone();
                match ViewportState::new(
                    render_state.device.clone(),
                    render_state.queue.clone(),
                    renderer_config,
                ) {
                    Ok(viewport) => (Some(Arc::new(Mutex::new(viewport))), None),
                    Err(e) => {
                        tracing::error!("Failed to initialize renderer: {}", e);
                        (None, Some(e.to_string()))
                    }
                }
            }
            None => {
                tracing::error!("No wgpu render state available");
                (None, Some("No wgpu render state available".to_string()))
            }
        };

        Self {
            app_state: create_shared_state(),
            config,
            viewport,
            init_error,
            scene_collection: SceneCollectionPanel::new(),
            object_editor: ObjectEditorPanel::new(),
            camera_scene: CameraScenePanel::new(),
            inspector: SceneInspectorPanel::new(),
            content_browser: ContentBrowserPanel::new(),
            stats: FrameStats::new(),
            applied_ui: None,
        }
    }

    /// Apply the actions queued by the panels during the last frame.
    fn process_actions(&mut self) {
        let actions = self.app_state.lock().take_actions();
        for action in actions {
            self.process_action(action);
        }
    }

    fn process_action(&mut self, action: AppAction) {
        match action {
            AppAction::SaveConfig => {
                let result = self.config.write().save();
                let mut state = self.app_state.lock();
                match result {
                    Ok(()) => state.set_info("Settings saved"),
                    Err(e) => {
                        tracing::warn!("Failed to save settings: {}", e);
                        state.set_error(format!("Failed to save settings: {}", e));
                    }
                }
                return;
            }
            AppAction::ResetConfig => {
                self.config.write().reset_to_defaults();
                self.app_state.lock().set_info("Settings reset to defaults");
                return;
            }
            _ => {}
        }

        let Some(viewport) = &self.viewport else {
            return;
        };
        let mut viewport = viewport.lock();
        let mut state = self.app_state.lock();

        match action {
            AppAction::CreatePrimitive { kind, params, name } => {
                match generate(kind, &params, &name) {
                    Ok(mesh) => {
                        let index = viewport.renderer.append(mesh);
                        state.select_mesh(index);
                        state.set_info(format!("Created {}", kind.name()));
                    }
                    Err(e) => {
                        tracing::warn!("Failed to create {}: {}", kind.name(), e);
                        state.set_error(format!("Failed to create {}: {}", kind.name(), e));
                    }
                }
            }
            AppAction::ImportObj(path) => match load_obj(&path) {
                Ok(mesh) => {
                    let triangles = mesh.num_triangles();
                    let index = viewport.renderer.append(mesh);
                    state.select_mesh(index);
                    state.set_info(format!(
                        "Imported {} ({} triangles)",
                        path.display(),
                        triangles
                    ));
                }
                Err(e) => {
                    tracing::warn!("Failed to import {}: {}", path.display(), e);
                    state.set_error(format!("Failed to import {}: {}", path.display(), e));
                }
            },
            AppAction::AddMesh(mesh) => {
                let name = mesh.name.clone();
                let index = viewport.renderer.append(mesh);
                state.select_mesh(index);
                state.set_info(format!("Loaded '{}'", name));
            }
            AppAction::DeleteMesh(index) => {
                if let Some(mesh) = viewport.renderer.remove(index) {
                    state.on_mesh_removed(index);
                    state.set_info(format!("Deleted '{}'", mesh.name));
                }
            }
            AppAction::ResetTransform(index) => {
                if let Some(mesh) = viewport.renderer.mesh_mut(index) {
                    mesh.reset_transform();
                }
            }
            AppAction::SetOriginToBottom(index) => {
                if let Some(mesh) = viewport.renderer.mesh_mut(index) {
                    mesh.set_origin_to_bounds_bottom();
                }
            }
            AppAction::ResetCameraView => {
                viewport.renderer.camera_mut().reset_view();
            }
            AppAction::ClearScene => {
                viewport.renderer.clear();
                state.active_mesh = None;
                state.set_info("Scene cleared");
            }
            AppAction::SaveConfig | AppAction::ResetConfig => {}
        }
    }

    /// Push theme, zoom and renderer settings to egui and the renderer.
    fn apply_config(&mut self, ctx: &egui::Context) {
        let manager = self.config.read();
        let config = manager.config();

        let ui = (config.ui.theme, config.ui.font_scale);
        if self.applied_ui != Some(ui) {
            ctx.set_visuals(match ui.0 {
                UiTheme::Dark => egui::Visuals::dark(),
                UiTheme::Light => egui::Visuals::light(),
            });
            ctx.set_zoom_factor(ui.1.clamp(0.5, 3.0));
            self.applied_ui = Some(ui);
        }

        if let Some(viewport) = &self.viewport {
            let mut viewport = viewport.lock();
            viewport.renderer.set_config(config.renderer.clone());
            viewport.renderer.show_grid = config.editor.show_grid;
            viewport.renderer.show_axes = config.editor.show_axes;
        }
    }

    fn viewport_ui(&mut self, ui: &mut egui::Ui, frame: &eframe::Frame) {
        let (Some(viewport), Some(render_state)) = (&self.viewport, frame.wgpu_render_state()) else {
            ui.centered_and_justified(|ui| {
                ui.colored_label(
                    ui.visuals().error_fg_color,
                    self.init_error.as_deref().unwrap_or("Renderer unavailable"),
                );
            });
            return;
        };

        let available = ui.available_size();
        let pixels_per_point = ui.ctx().pixels_per_point();
        let width = (available.x * pixels_per_point).round() as u32;
        let height = (available.y * pixels_per_point).round() as u32;

        let mut viewport = viewport.lock();
        let texture_id = {
            let mut egui_renderer = render_state.renderer.write();
            viewport.ensure_texture(width, height, &mut egui_renderer)
        };
        let texture_id = match texture_id {
            Ok(id) => id,
            Err(e) => {
                tracing::error!("Viewport resize failed: {}", e);
                ui.colored_label(ui.visuals().error_fg_color, e.to_string());
                return;
            }
        };

        let response = ui.add(
            egui::Image::new(egui::load::SizedTexture::new(texture_id, available))
                .sense(egui::Sense::click_and_drag()),
        );

        if let Some(Some((mesh, _))) = viewport.handle_input(ui, &response) {
            self.app_state.lock().select_mesh(mesh);
        }
        viewport.render();
        drop(viewport);

        if self.config.read().config().editor.show_performance {
            overlays::render_performance_overlay(ui.ctx(), &self.stats, response.rect);
        }
    }
}

impl eframe::App for FacetApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        let (now, dt) = ctx.input(|i| (i.time, i.unstable_dt));
        self.stats.tick(now, dt);

        self.process_actions();
        self.apply_config(ctx);

        menu::render_menu_bar(ctx, &self.app_state, &self.config);
        overlays::render_status_line(ctx, &self.app_state);

        let camera_scene_selected = self.app_state.lock().camera_scene_selected;
        let (show_inspector, show_performance) = {
            let config = self.config.read();
            let editor = &config.config().editor;
            (editor.show_scene_inspector, editor.show_performance)
        };

        if let Some(viewport) = &self.viewport {
            let panel_ctx = PanelContext {
                app_state: &self.app_state,
                viewport,
                config: &self.config,
            };

            egui::SidePanel::left("scene_panel")
                .default_width(220.0)
                .show(ctx, |ui| {
                    ui.heading(self.scene_collection.name());
                    ui.separator();
                    self.scene_collection.ui(ui, &panel_ctx);

                    if show_inspector {
                        ui.add_space(12.0);
                        ui.heading(self.inspector.name());
                        ui.separator();
                        self.inspector.ui(ui, &panel_ctx);
                    }
                });

            egui::SidePanel::right("object_panel")
                .default_width(300.0)
                .show(ctx, |ui| {
                    let panel: &mut dyn Panel = if camera_scene_selected {
                        &mut self.camera_scene
                    } else {
                        &mut self.object_editor
                    };
                    ui.heading(panel.name());
                    ui.separator();
                    egui::ScrollArea::vertical()
                        .id_salt("object_editor")
                        .show(ui, |ui| panel.ui(ui, &panel_ctx));
                });

            egui::TopBottomPanel::bottom("content_panel")
                .resizable(true)
                .default_height(180.0)
                .show(ctx, |ui| {
                    ui.heading(self.content_browser.name());
                    self.content_browser.ui(ui, &panel_ctx);
                });
        }

        show_mesh_creator(ctx, &self.app_state);
        show_object_preview(ctx, &self.app_state);

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.viewport_ui(ui, frame));

        if show_performance {
            ctx.request_repaint();
        }
    }
}

impl Drop for FacetApp {
    fn drop(&mut self) {
        let mut config = self.config.write();
        if config.is_dirty()
            && let Err(e) = config.save()
        {
            tracing::warn!("Failed to save settings on exit: {}", e);
        }
    }
}
