//! Scene: mesh collection plus pick selection

use crate::collection::{MeshCollection, MeshEntry};
use crate::mesh::Mesh;
use crate::selection::{IdentityPixel, PickOutcome, Selection};

/// Meshes and the current triangle selection, kept consistent with each other.
#[derive(Debug)]
pub struct Scene<G = ()> {
    meshes: MeshCollection<G>,
    selection: Selection,
}

impl<G> Default for Scene<G> {
    fn default() -> Self {
        Self {
            meshes: MeshCollection::default(),
            selection: Selection::Idle,
        }
    }
}

impl<G> Scene<G> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meshes(&self) -> &MeshCollection<G> {
        &self.meshes
    }

    /// Mutable access to the meshes. Structural changes go through
    /// [`Scene::append`] and [`Scene::remove`].
    pub fn mesh_mut(&mut self, index: usize) -> Option<&mut Mesh> {
        self.meshes.get_mut(index)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn append(&mut self, mesh: Mesh, gpu: G) -> usize {
        let index = self.meshes.push(mesh, gpu);
        if let Some(mesh) = self.meshes.get(index) {
            tracing::info!(
                "Added mesh '{}' ({} triangles) at index {}",
                mesh.name,
                mesh.num_triangles(),
                index
            );
        }
        index
    }

    /// Remove the mesh at `index`, keeping the selection pointing at the same triangle.
    pub fn remove(&mut self, index: usize) -> Option<MeshEntry<G>> {
        let mut entry = self.meshes.remove(index)?;
        if let Selection::Selected { mesh, triangle } = self.selection
            && mesh == index
        {
            entry.mesh.set_triangle_selected(triangle, false);
        }
        self.selection.on_mesh_removed(index);
        tracing::info!("Removed mesh '{}'", entry.mesh.name);
        Some(entry)
    }

    pub fn clear(&mut self) {
        self.selection = Selection::Idle;
        self.meshes.clear();
    }

    /// Apply a read-back identity pixel. Returns the selection afterwards.
    pub fn apply_pick(&mut self, pixel: IdentityPixel) -> Option<(usize, usize)> {
        let outcome = PickOutcome::resolve(pixel, &self.meshes);
        tracing::debug!(?pixel, ?outcome, "Resolved pick");
        self.selection.apply(outcome, &mut self.meshes);
        self.selection.picked()
    }

    /// Recompute model matrices changed since the last call.
    pub fn update_model_matrices(&mut self) {
        for entry in self.meshes.iter_mut() {
            if entry.mesh.is_matrix_dirty() {
                entry.mesh.update_model_matrix();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn strip(name: &str, triangles: u32) -> Mesh {
        let positions = (0..triangles + 2)
            .map(|i| Vec3::new(i as f32, (i % 2) as f32, 0.0))
            .collect();
        let indices = (0..triangles).flat_map(|i| [i, i + 1, i + 2]).collect();
        Mesh::from_geometry(name, positions, indices).unwrap()
    }

    #[test]
    fn test_pick_then_remove_selected() {
        let mut scene = Scene::new();
        scene.append(strip("a", 2), ());
        scene.append(strip("b", 5), ());

        assert_eq!(scene.apply_pick(IdentityPixel::for_mesh(1, 3)), Some((1, 3)));
        let removed = scene.remove(1).unwrap();
        assert_eq!(scene.selection(), Selection::Idle);
        assert_eq!(removed.mesh.selected_triangle_count(), 0);
        assert_eq!(removed.mesh.selected_triangle(), None);
    }

    #[test]
    fn test_remove_before_selected_shifts() {
        let mut scene = Scene::new();
        scene.append(strip("a", 2), ());
        scene.append(strip("b", 5), ());
        scene.append(strip("c", 4), ());

        scene.apply_pick(IdentityPixel::for_mesh(2, 1));
        scene.remove(0);

        assert_eq!(scene.selection().picked(), Some((1, 1)));
        let mesh = scene.meshes().get(1).unwrap();
        assert_eq!(mesh.name, "c");
        assert_eq!(mesh.selected_triangle(), Some(1));

        // The flag can still be cleared through the shifted index.
        scene.apply_pick(IdentityPixel::BACKGROUND);
        assert_eq!(scene.meshes().get(1).unwrap().selected_triangle(), None);
    }

    #[test]
    fn test_update_model_matrices() {
        let mut scene = Scene::new();
        scene.append(strip("a", 1), ());
        scene.mesh_mut(0).unwrap().set_position(Vec3::Y);
        scene.update_model_matrices();
        assert!(!scene.meshes().get(0).unwrap().is_matrix_dirty());
    }
}
