//! Scene inspector: totals over the whole collection

use facet_renderer::PrimitiveSource;

use super::{Panel, PanelContext};

#[derive(Default)]
pub struct SceneInspectorPanel;

impl SceneInspectorPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Panel for SceneInspectorPanel {
    fn name(&self) -> &str {
        "Scene Inspector"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &PanelContext<'_>) {
        let viewport = ctx.viewport.lock();
        let meshes = viewport.renderer.meshes();
        let grid_step = viewport.renderer.config().grid_step();
        let picking = match viewport.renderer.primitive_source() {
            PrimitiveSource::Rasterizer => "primitive index",
            PrimitiveSource::ExpandedVertices => "expanded vertices",
        };

        egui::Grid::new("scene_inspector")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                ui.label("Objects:");
                ui.label(meshes.len().to_string());
                ui.end_row();

                ui.label("Triangles:");
                ui.label(meshes.total_triangles().to_string());
                ui.end_row();

                ui.label("Memory:");
                ui.label(format!("{:.3} MB", meshes.total_memory_mb()));
                ui.end_row();

                ui.label("Grid step:");
                ui.label(format!("{:.2}", grid_step));
                ui.end_row();

                ui.label("Picking:");
                ui.label(picking);
                ui.end_row();
            });
    }
}
