//! Content browser: folders of the content library and their OBJ files

use std::path::{Path, PathBuf};

use facet_core::{ContentLibrary, LibraryEntry};

use super::{Panel, PanelContext};
use crate::state::ObjectPreview;

/// Listings are cached per root and folder and refreshed on demand.
#[derive(Default)]
pub struct ContentBrowserPanel {
    root: Option<PathBuf>,
    folders: Vec<LibraryEntry>,
    open_folder: Option<PathBuf>,
    files: Vec<LibraryEntry>,
}

impl ContentBrowserPanel {
    pub fn new() -> Self {
        Self::default()
    }

    fn refresh_folders(&mut self, library: &ContentLibrary) {
        self.root = Some(library.root().to_path_buf());
        self.folders = if library.exists() {
            library.folders().unwrap_or_else(|e| {
                tracing::warn!("{}", e);
                Vec::new()
            })
        } else {
            tracing::warn!("Content library {:?} does not exist", library.root());
            Vec::new()
        };
        self.open_folder = None;
        self.files.clear();
    }

    fn refresh_files(&mut self, library: &ContentLibrary, folder: &Path) {
        self.open_folder = Some(folder.to_path_buf());
        self.files = library.obj_files(folder).unwrap_or_else(|e| {
            tracing::warn!("{}", e);
            Vec::new()
        });
    }
}

impl Panel for ContentBrowserPanel {
    fn name(&self) -> &str {
        "Content Browser"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &PanelContext<'_>) {
        let library = ContentLibrary::new(ctx.config.read().config().editor.content_root.clone());
        if self.root.as_deref() != Some(library.root()) {
            self.refresh_folders(&library);
        }

        let requested = ctx.app_state.lock().browser_folder.clone();
        if let Some(folder) = requested
            && self.open_folder.as_ref() != Some(&folder)
        {
            self.refresh_files(&library, &folder);
        }

        ui.horizontal(|ui| {
            ui.label(library.root().display().to_string());
            if ui.small_button("Refresh").clicked() {
                self.refresh_folders(&library);
                ctx.app_state.lock().browser_folder = None;
            }
        });
        ui.separator();

        if self.folders.is_empty() {
            ui.weak("No folders");
            return;
        }

        let mut open_folder = None;
        let mut preview = None;
        ui.columns(2, |columns| {
            egui::ScrollArea::vertical()
                .id_salt("content_folders")
                .show(&mut columns[0], |ui| {
                    for folder in &self.folders {
                        let selected = self.open_folder.as_ref() == Some(&folder.path);
                        if ui.selectable_label(selected, format!("📁 {}", folder.name)).clicked() {
                            open_folder = Some(folder.path.clone());
                        }
                    }
                });

            egui::ScrollArea::vertical()
                .id_salt("content_files")
                .show(&mut columns[1], |ui| {
                    if self.open_folder.is_none() {
                        ui.weak("Select a folder");
                    } else if self.files.is_empty() {
                        ui.weak("No OBJ files");
                    }
                    for file in &self.files {
                        if ui
                            .button(&file.name)
                            .on_hover_text("Click to preview")
                            .clicked()
                        {
                            preview = Some(file.path.clone());
                        }
                    }
                });
        });

        if let Some(folder) = open_folder {
            self.refresh_files(&library, &folder);
            ctx.app_state.lock().browser_folder = Some(folder);
        }
        if let Some(path) = preview {
            let preview = ObjectPreview::load(&path);
            ctx.app_state.lock().object_preview = Some(preview);
        }
    }
}
