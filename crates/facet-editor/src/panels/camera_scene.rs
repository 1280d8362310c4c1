//! Camera & Scene panel: projection and grid settings

use egui::{Slider, Ui};

use super::{Panel, PanelContext};
use crate::state::AppAction;

#[derive(Default)]
pub struct CameraScenePanel;

impl CameraScenePanel {
    pub fn new() -> Self {
        Self
    }
}

impl Panel for CameraScenePanel {
    fn name(&self) -> &str {
        "Camera & Scene"
    }

    fn ui(&mut self, ui: &mut Ui, ctx: &PanelContext<'_>) {
        let mut reset_view = false;

        {
            let mut manager = ctx.config.write();
            let mut renderer = manager.config().renderer.clone();

            egui::CollapsingHeader::new("Camera")
                .default_open(true)
                .show(ui, |ui| {
                    egui::Grid::new("camera_settings")
                        .num_columns(2)
                        .show(ui, |ui| {
                            ui.label("Field of view:");
                            ui.add(Slider::new(&mut renderer.fov_degrees, 15.0..=120.0).suffix("°"));
                            ui.end_row();

                            ui.label("Near plane:");
                            ui.add(Slider::new(&mut renderer.near_plane, 0.01..=1.0).logarithmic(true));
                            ui.end_row();

                            ui.label("Far plane:");
                            ui.add(Slider::new(&mut renderer.far_plane, 100.0..=10000.0).logarithmic(true));
                            ui.end_row();
                        });
                    if ui.button("Reset Camera").clicked() {
                        renderer.reset_camera();
                        reset_view = true;
                    }
                });

            egui::CollapsingHeader::new("Scene")
                .default_open(true)
                .show(ui, |ui| {
                    egui::Grid::new("scene_settings")
                        .num_columns(2)
                        .show(ui, |ui| {
                            ui.label("Grid size:");
                            ui.add(Slider::new(&mut renderer.grid_size, 10.0..=500.0));
                            ui.end_row();

                            ui.label("Divisions:");
                            ui.add(Slider::new(&mut renderer.grid_divisions, 10..=500));
                            ui.end_row();
                        });
                    ui.label(format!("Grid step: {:.2}", renderer.grid_step()));
                    if ui.button("Reset Scene").clicked() {
                        renderer.reset_grid();
                    }
                });

            if renderer != manager.config().renderer {
                manager.config_mut().renderer = renderer;
            }
        }

        if reset_view {
            ctx.app_state.lock().queue_action(AppAction::ResetCameraView);
        }
    }
}
