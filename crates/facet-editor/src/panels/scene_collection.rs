//! Scene collection panel: the meshes of the scene by name

use super::{Panel, PanelContext};

#[derive(Default)]
pub struct SceneCollectionPanel;

impl SceneCollectionPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Panel for SceneCollectionPanel {
    fn name(&self) -> &str {
        "Scene Collection"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &PanelContext<'_>) {
        let (active, camera_scene) = {
            let state = ctx.app_state.lock();
            (state.active_mesh, state.camera_scene_selected)
        };
        let mut clicked = None;

        if ui.selectable_label(camera_scene, "📷 Camera & Scene").clicked() {
            ctx.app_state.lock().select_camera_scene();
        }
        ui.separator();

        {
            let viewport = ctx.viewport.lock();
            let meshes = viewport.renderer.meshes();
            if meshes.is_empty() {
                ui.weak("Scene is empty");
                return;
            }

            egui::ScrollArea::vertical()
                .id_salt("scene_collection")
                .show(ui, |ui| {
                    for (index, mesh) in meshes.meshes().enumerate() {
                        let label = if mesh.visible {
                            egui::RichText::new(&mesh.name)
                        } else {
                            egui::RichText::new(&mesh.name).weak()
                        };
                        ui.push_id(mesh.id(), |ui| {
                            if ui.selectable_label(active == Some(index), label).clicked() {
                                clicked = Some(index);
                            }
                        });
                    }
                });
        }

        if let Some(index) = clicked {
            ctx.app_state.lock().select_mesh(index);
        }
    }
}
