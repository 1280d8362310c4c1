//! Application state shared between panels

use std::path::{Path, PathBuf};
use std::sync::Arc;

use facet_core::{Mesh, PrimitiveKind, PrimitiveParams, load_obj};
use parking_lot::Mutex;

/// Actions queued by panels and applied once per frame by the app.
#[derive(Debug, Clone)]
pub enum AppAction {
    CreatePrimitive {
        kind: PrimitiveKind,
        params: PrimitiveParams,
        name: String,
    },
    ImportObj(PathBuf),
    /// Append an already loaded mesh.
    AddMesh(Mesh),
    DeleteMesh(usize),
    ResetTransform(usize),
    SetOriginToBottom(usize),
    ClearScene,
    /// Put the orbit camera back at its starting view.
    ResetCameraView,
    SaveConfig,
    ResetConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

/// Mesh creator window
#[derive(Debug, Clone)]
pub struct MeshCreatorState {
    pub kind: PrimitiveKind,
    pub params: PrimitiveParams,
    pub name: String,
}

impl MeshCreatorState {
    pub fn new(kind: PrimitiveKind, default_lod: u32) -> Self {
        Self {
            kind,
            params: PrimitiveParams {
                lod: default_lod,
                ..Default::default()
            },
            name: kind.default_mesh_name().to_string(),
        }
    }

    /// Action creating the configured primitive.
    pub fn to_action(&self) -> AppAction {
        let name = if self.name.trim().is_empty() {
            self.kind.default_mesh_name().to_string()
        } else {
            self.name.trim().to_string()
        };
        AppAction::CreatePrimitive {
            kind: self.kind,
            params: self.params.clone(),
            name,
        }
    }
}

/// OBJ file loaded from the content browser, waiting for confirmation.
#[derive(Debug)]
pub struct ObjectPreview {
    pub path: PathBuf,
    pub file_name: String,
    pub mesh: Result<Mesh, String>,
}

impl ObjectPreview {
    pub fn load(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mesh = load_obj(path).map_err(|e| {
            tracing::warn!("Failed to preview {}: {}", path.display(), e);
            e.to_string()
        });
        Self {
            path: path.to_path_buf(),
            file_name,
            mesh,
        }
    }

    /// Action adding the previewed mesh, if it loaded.
    pub fn into_action(self) -> Option<AppAction> {
        self.mesh.ok().map(AppAction::AddMesh)
    }
}

#[derive(Default)]
pub struct AppState {
    pending_actions: Vec<AppAction>,
    /// Mesh shown in the object editor.
    pub active_mesh: Option<usize>,
    /// The Camera & Scene entry is selected instead of a mesh.
    pub camera_scene_selected: bool,
    /// Open object preview popup, if any.
    pub object_preview: Option<ObjectPreview>,
    /// Open mesh creator window, if any.
    pub mesh_creator: Option<MeshCreatorState>,
    /// Folder opened in the content browser.
    pub browser_folder: Option<PathBuf>,
    status: Option<StatusMessage>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_action(&mut self, action: AppAction) {
        self.pending_actions.push(action);
    }

    pub fn take_actions(&mut self) -> Vec<AppAction> {
        std::mem::take(&mut self.pending_actions)
    }

    pub fn select_mesh(&mut self, index: usize) {
        self.active_mesh = Some(index);
        self.camera_scene_selected = false;
    }

    pub fn select_camera_scene(&mut self) {
        self.active_mesh = None;
        self.camera_scene_selected = true;
    }

    pub fn open_mesh_creator(&mut self, kind: PrimitiveKind, default_lod: u32) {
        self.mesh_creator = Some(MeshCreatorState::new(kind, default_lod));
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            level: StatusLevel::Info,
            text: text.into(),
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            level: StatusLevel::Error,
            text: text.into(),
        });
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Keep `active_mesh` pointing at the same mesh after `removed` was deleted.
    pub fn on_mesh_removed(&mut self, removed: usize) {
        self.active_mesh = match self.active_mesh {
            Some(index) if index == removed => None,
            Some(index) if index > removed => Some(index - 1),
            other => other,
        };
    }
}

pub type SharedAppState = Arc<Mutex<AppState>>;

pub fn create_shared_state() -> SharedAppState {
    Arc::new(Mutex::new(AppState::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_are_drained_in_order() {
        let mut state = AppState::new();
        state.queue_action(AppAction::DeleteMesh(2));
        state.queue_action(AppAction::ClearScene);

        let actions = state.take_actions();
        assert!(matches!(
            actions.as_slice(),
            [AppAction::DeleteMesh(2), AppAction::ClearScene]
        ));
        assert!(state.take_actions().is_empty());
    }

    #[test]
    fn test_active_mesh_follows_removal() {
        let mut state = AppState::new();
        state.active_mesh = Some(3);
        state.on_mesh_removed(1);
        assert_eq!(state.active_mesh, Some(2));

        state.on_mesh_removed(2);
        assert_eq!(state.active_mesh, None);

        state.active_mesh = Some(0);
        state.on_mesh_removed(4);
        assert_eq!(state.active_mesh, Some(0));
    }

    #[test]
    fn test_selection_switches_between_mesh_and_camera_scene() {
        let mut state = AppState::new();
        state.select_mesh(1);
        assert_eq!(state.active_mesh, Some(1));
        assert!(!state.camera_scene_selected);

        state.select_camera_scene();
        assert_eq!(state.active_mesh, None);
        assert!(state.camera_scene_selected);

        state.select_mesh(0);
        assert!(!state.camera_scene_selected);
    }

    #[test]
    fn test_object_preview_loads_obj() {
        let path = std::env::temp_dir().join(format!("facet-preview-{}.obj", uuid::Uuid::new_v4()));
        std::fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2 3\nf 2 4 3\n").unwrap();

        let preview = ObjectPreview::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(preview.file_name.starts_with("facet-preview-"));
        assert_eq!(preview.mesh.as_ref().map(|m| m.num_triangles()), Ok(2));
        match preview.into_action() {
            Some(AppAction::AddMesh(mesh)) => assert_eq!(mesh.num_triangles(), 2),
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_object_preview_missing_file() {
        let path = std::env::temp_dir().join("facet-preview-missing.obj");
        let preview = ObjectPreview::load(&path);
        assert_eq!(preview.file_name, "facet-preview-missing.obj");
        assert!(preview.mesh.is_err());
        assert!(preview.into_action().is_none());
    }

    #[test]
    fn test_mesh_creator_action() {
        let mut creator = MeshCreatorState::new(PrimitiveKind::Sphere, 16);
        assert_eq!(creator.params.lod, 16);

        creator.name = "   ".to_string();
        match creator.to_action() {
            AppAction::CreatePrimitive { kind, params, name } => {
                assert_eq!(kind, PrimitiveKind::Sphere);
                assert_eq!(params.lod, 16);
                assert_eq!(name, PrimitiveKind::Sphere.default_mesh_name());
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_status_message() {
        let mut state = AppState::new();
        assert!(state.status().is_none());
        state.set_error("Failed to import");
        assert_eq!(state.status().map(|s| s.level), Some(StatusLevel::Error));
        state.set_info("Imported");
        assert_eq!(state.status().map(|s| s.text.as_str()), Some("Imported"));
    }
}
