//! Mesh creator window: parameters of a new primitive

use facet_core::{Axis, PrimitiveKind, PrimitiveParams};
use glam::Vec3;

use crate::state::SharedAppState;

fn vec3_edit(ui: &mut egui::Ui, value: &mut Vec3, speed: f64) {
    ui.horizontal(|ui| {
        ui.add(egui::DragValue::new(&mut value.x).speed(speed).prefix("x: "));
        ui.add(egui::DragValue::new(&mut value.y).speed(speed).prefix("y: "));
        ui.add(egui::DragValue::new(&mut value.z).speed(speed).prefix("z: "));
    });
}

fn range_edit(ui: &mut egui::Ui, value: &mut (f32, f32)) {
    ui.horizontal(|ui| {
        ui.add(egui::DragValue::new(&mut value.0).speed(0.1).prefix("min: "));
        ui.add(egui::DragValue::new(&mut value.1).speed(0.1).prefix("max: "));
    });
}

fn params_ui(ui: &mut egui::Ui, kind: PrimitiveKind, params: &mut PrimitiveParams) {
    egui::Grid::new("mesh_creator_params")
        .num_columns(2)
        .show(ui, |ui| {
            ui.label("Center:");
            vec3_edit(ui, &mut params.center, 0.05);
            ui.end_row();

            match kind {
                PrimitiveKind::Plane => {
                    ui.label("Axis:");
                    egui::ComboBox::from_id_salt("plane_axis")
                        .selected_text(params.axis.label())
                        .show_ui(ui, |ui| {
                            for axis in Axis::ALL {
                                ui.selectable_value(&mut params.axis, axis, axis.label());
                            }
                        });
                    ui.end_row();
                    ui.label("U range:");
                    range_edit(ui, &mut params.plane_u);
                    ui.end_row();
                    ui.label("V range:");
                    range_edit(ui, &mut params.plane_v);
                    ui.end_row();
                }
                PrimitiveKind::Cube => {
                    ui.label("Dimensions:");
                    vec3_edit(ui, &mut params.dimensions, 0.05);
                    ui.end_row();
                }
                PrimitiveKind::Sphere => {
                    ui.label("Radius:");
                    ui.add(egui::DragValue::new(&mut params.radius).speed(0.05).range(0.001..=f32::MAX));
                    ui.end_row();
                }
                PrimitiveKind::Cylinder => {
                    ui.label("Radius:");
                    ui.add(egui::DragValue::new(&mut params.radius).speed(0.05).range(0.001..=f32::MAX));
                    ui.end_row();
                    ui.label("Height:");
                    ui.add(egui::DragValue::new(&mut params.height).speed(0.05).range(0.001..=f32::MAX));
                    ui.end_row();
                }
                PrimitiveKind::Disk => {
                    ui.label("Axis:");
                    egui::ComboBox::from_id_salt("disk_axis")
                        .selected_text(params.axis.label())
                        .show_ui(ui, |ui| {
                            for axis in Axis::ALL {
                                ui.selectable_value(&mut params.axis, axis, axis.label());
                            }
                        });
                    ui.end_row();
                    ui.label("Radius:");
                    ui.add(egui::DragValue::new(&mut params.radius).speed(0.05).range(0.001..=f32::MAX));
                    ui.end_row();
                }
                PrimitiveKind::Trihedral | PrimitiveKind::Dihedral => {
                    ui.label("Size:");
                    ui.add(egui::DragValue::new(&mut params.size).speed(0.05).range(0.001..=f32::MAX));
                    ui.end_row();
                }
            }

            if kind.uses_lod() {
                ui.label("Level of detail:");
                ui.add(egui::Slider::new(&mut params.lod, 1..=128));
                ui.end_row();
            }
        });
}

/// Show the mesh creator window while one is open.
pub fn show_mesh_creator(ctx: &egui::Context, app_state: &SharedAppState) {
    let mut state = app_state.lock();
    let Some(creator) = state.mesh_creator.as_mut() else {
        return;
    };

    let mut open = true;
    let mut create = false;
    let mut cancel = false;
    egui::Window::new(format!("Create {}", creator.kind.name()))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Name:");
                ui.text_edit_singleline(&mut creator.name);
            });
            ui.separator();
            params_ui(ui, creator.kind, &mut creator.params);
            ui.separator();
            ui.horizontal(|ui| {
                create = ui.button("Create").clicked();
                cancel = ui.button("Cancel").clicked();
            });
        });

    if create {
        let action = creator.to_action();
        state.queue_action(action);
        state.mesh_creator = None;
    } else if cancel || !open {
        state.mesh_creator = None;
    }
}
