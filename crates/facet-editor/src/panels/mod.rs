//! Editor panels

mod camera_scene;
mod content_browser;
mod inspector;
mod mesh_creator;
mod object_editor;
mod object_preview;
mod scene_collection;

pub use camera_scene::CameraScenePanel;
pub use content_browser::ContentBrowserPanel;
pub use inspector::SceneInspectorPanel;
pub use mesh_creator::show_mesh_creator;
pub use object_editor::ObjectEditorPanel;
pub use object_preview::show_object_preview;
pub use scene_collection::SceneCollectionPanel;

use crate::config::SharedConfig;
use crate::state::SharedAppState;
use crate::viewport_state::SharedViewportState;

/// Handles a panel needs to draw itself.
pub struct PanelContext<'a> {
    pub app_state: &'a SharedAppState,
    pub viewport: &'a SharedViewportState,
    pub config: &'a SharedConfig,
}

/// A dockable section of the editor window.
pub trait Panel {
    fn name(&self) -> &str;

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &PanelContext<'_>);
}
