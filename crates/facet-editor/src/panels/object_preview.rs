//! Object preview popup: confirm an OBJ file before adding it

use crate::state::SharedAppState;

/// Show the preview window while an OBJ file is waiting for confirmation.
pub fn show_object_preview(ctx: &egui::Context, app_state: &SharedAppState) {
    let mut state = app_state.lock();
    let Some(preview) = state.object_preview.as_ref() else {
        return;
    };

    let mut open = true;
    let mut load = false;
    let mut cancel = false;
    egui::Window::new("Object Preview")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.strong(&preview.file_name)
                .on_hover_text(preview.path.display().to_string());
            ui.separator();
            match &preview.mesh {
                Ok(mesh) => {
                    egui::Grid::new("object_preview_stats")
                        .num_columns(2)
                        .show(ui, |ui| {
                            ui.label("Triangles:");
                            ui.label(mesh.num_triangles().to_string());
                            ui.end_row();

                            ui.label("Size:");
                            ui.label(format!("{:.3} MB", mesh.memory_footprint_mb()));
                            ui.end_row();
                        });
                }
                Err(e) => {
                    ui.colored_label(ui.visuals().error_fg_color, e);
                }
            }
            ui.separator();
            ui.horizontal(|ui| {
                load = ui
                    .add_enabled(preview.mesh.is_ok(), egui::Button::new("Load"))
                    .clicked();
                cancel = ui.button("Cancel").clicked();
            });
        });

    if load {
        if let Some(action) = state.object_preview.take().and_then(|p| p.into_action()) {
            state.queue_action(action);
        }
    } else if cancel || !open {
        state.object_preview = None;
    }
}
