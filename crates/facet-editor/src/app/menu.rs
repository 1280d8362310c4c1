//! Menu bar rendering

use facet_core::PrimitiveKind;

use crate::config::{SharedConfig, UiTheme};
use crate::state::{AppAction, SharedAppState};

/// Render the menu bar
pub fn render_menu_bar(ctx: &egui::Context, app_state: &SharedAppState, config: &SharedConfig) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Import OBJ...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("OBJ files", &["obj", "OBJ"])
                        .pick_file()
                    {
                        app_state.lock().queue_action(AppAction::ImportObj(path));
                    }
                    ui.close_menu();
                }
                if ui.button("Clear Scene").clicked() {
                    app_state.lock().queue_action(AppAction::ClearScene);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Exit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Create", |ui| {
                let default_lod = config.read().config().editor.default_lod;
                for kind in PrimitiveKind::ALL {
                    if ui.button(kind.name()).clicked() {
                        app_state.lock().open_mesh_creator(kind, default_lod);
                        ui.close_menu();
                    }
                }
            });

            ui.menu_button("View", |ui| {
                let mut manager = config.write();
                let mut editor = manager.config().editor.clone();
                let mut changed = false;
                changed |= ui.checkbox(&mut editor.show_grid, "Grid").changed();
                changed |= ui.checkbox(&mut editor.show_axes, "Axes").changed();
                changed |= ui
                    .checkbox(&mut editor.show_scene_inspector, "Scene Inspector")
                    .changed();
                changed |= ui
                    .checkbox(&mut editor.show_performance, "Performance")
                    .changed();
                ui.separator();
                let mut theme = manager.config().ui.theme;
                ui.horizontal(|ui| {
                    ui.label("Theme:");
                    changed |= ui.radio_value(&mut theme, UiTheme::Dark, "Dark").changed();
                    changed |= ui.radio_value(&mut theme, UiTheme::Light, "Light").changed();
                });
                if changed {
                    let config = manager.config_mut();
                    config.editor = editor;
                    config.ui.theme = theme;
                }
            });

            ui.menu_button("Settings", |ui| {
                let path = config.read().config_file_path().display().to_string();
                if ui.button("Save Settings").on_hover_text(path).clicked() {
                    app_state.lock().queue_action(AppAction::SaveConfig);
                    ui.close_menu();
                }
                if ui.button("Reset to Defaults").clicked() {
                    app_state.lock().queue_action(AppAction::ResetConfig);
                    ui.close_menu();
                }
            });
        });
    });
}
