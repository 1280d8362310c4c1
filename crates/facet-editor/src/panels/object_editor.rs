//! Object editor: transform, geometry info and actions for the active mesh

use facet_core::{Selection, Transform};
use glam::Vec3;

use super::{Panel, PanelContext};
use crate::state::AppAction;

const AXES: [&str; 3] = ["X", "Y", "Z"];

#[derive(Default)]
pub struct ObjectEditorPanel;

impl ObjectEditorPanel {
    pub fn new() -> Self {
        Self
    }
}

/// One row of three drag values with a reset button per axis.
///
/// Returns whether `value` changed.
fn vec3_row(ui: &mut egui::Ui, label: &str, value: &mut Vec3, reset: f32, speed: f64) -> bool {
    let mut changed = false;
    ui.label(label);
    ui.horizontal(|ui| {
        let components = [&mut value.x, &mut value.y, &mut value.z];
        for (axis, component) in AXES.iter().zip(components) {
            ui.label(*axis);
            changed |= ui
                .add(egui::DragValue::new(component).speed(speed).max_decimals(3))
                .changed();
            if ui
                .small_button("⟲")
                .on_hover_text(format!("Reset {} {}", label, axis))
                .clicked()
            {
                *component = reset;
                changed = true;
            }
        }
    });
    ui.end_row();
    changed
}

impl Panel for ObjectEditorPanel {
    fn name(&self) -> &str {
        "Object Editor"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &PanelContext<'_>) {
        let Some(index) = ctx.app_state.lock().active_mesh else {
            ui.weak("No mesh selected");
            return;
        };

        let mut pending_actions = Vec::new();
        {
            let mut viewport = ctx.viewport.lock();
            let selection = viewport.renderer.selection();
            let Some(mesh) = viewport.renderer.mesh_mut(index) else {
                ui.weak("Selected mesh not found");
                return;
            };

            ui.horizontal(|ui| {
                ui.label("Name:");
                ui.strong(&mesh.name);
            });
            ui.checkbox(&mut mesh.visible, "Visible");
            ui.separator();

            ui.heading("Transform");
            let mut transform: Transform = *mesh.transform();
            let mut changed = false;
            egui::Grid::new("object_transform")
                .num_columns(2)
                .show(ui, |ui| {
                    changed |= vec3_row(ui, "Position", &mut transform.position, 0.0, 0.05);
                    changed |= vec3_row(ui, "Rotation", &mut transform.rotation, 0.0, 0.5);
                    changed |= vec3_row(ui, "Scale", &mut transform.scale, 1.0, 0.01);
                });
            if changed {
                mesh.set_transform(transform);
            }

            ui.horizontal(|ui| {
                if ui.button("Reset Transform").clicked() {
                    pending_actions.push(AppAction::ResetTransform(index));
                }
                if ui
                    .button("Set Geometry to Origin")
                    .on_hover_text("Center on X/Z and rest the lowest point on the ground")
                    .clicked()
                {
                    pending_actions.push(AppAction::SetOriginToBottom(index));
                }
            });
            ui.separator();

            ui.heading("Geometry");
            let dimensions = mesh.dimensions();
            egui::Grid::new("object_geometry")
                .num_columns(2)
                .show(ui, |ui| {
                    ui.label("Length:");
                    ui.label(format!("{:.3}", dimensions.length));
                    ui.end_row();
                    ui.label("Height:");
                    ui.label(format!("{:.3}", dimensions.height));
                    ui.end_row();
                    ui.label("Triangles:");
                    ui.label(mesh.num_triangles().to_string());
                    ui.end_row();
                    ui.label("Memory:");
                    ui.label(format!("{:.3} MB", mesh.memory_footprint_mb()));
                    ui.end_row();
                    ui.label("Picked triangle:");
                    match selection {
                        Selection::Selected { mesh: m, triangle } if m == index => {
                            ui.label(triangle.to_string())
                        }
                        _ => ui.weak("none"),
                    };
                    ui.end_row();
                });
            ui.separator();

            if ui
                .add(egui::Button::new("Delete").fill(egui::Color32::from_rgb(120, 40, 40)))
                .clicked()
            {
                pending_actions.push(AppAction::DeleteMesh(index));
            }
        }

        if !pending_actions.is_empty() {
            let mut state = ctx.app_state.lock();
            for action in pending_actions {
                state.queue_action(action);
            }
        }
    }
}
