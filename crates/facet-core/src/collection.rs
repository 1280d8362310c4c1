//! Ordered, uniquely named mesh storage

use crate::mesh::Mesh;

/// Suffix appended to a name until it is unique in the collection.
pub const COPY_SUFFIX: &str = "_cp";

/// A mesh paired with its per-mesh GPU payload.
#[derive(Debug)]
pub struct MeshEntry<G> {
    pub mesh: Mesh,
    pub gpu: G,
}

/// Insertion-ordered list of meshes.
///
/// `G` holds whatever the owner attaches to each mesh (GPU buffers in the
/// renderer, `()` in GPU-free code). Dropping an entry drops its payload.
#[derive(Debug)]
pub struct MeshCollection<G = ()> {
    entries: Vec<MeshEntry<G>>,
}

impl<G> Default for MeshCollection<G> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<G> MeshCollection<G> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a mesh, renaming it if its name is taken. Returns its index.
    pub fn push(&mut self, mut mesh: Mesh, gpu: G) -> usize {
        mesh.name = self.unique_name(&mesh.name);
        mesh.update_model_matrix();
        self.entries.push(MeshEntry { mesh, gpu });
        self.entries.len() - 1
    }

    /// Remove and return the entry at `index`.
    pub fn remove(&mut self, index: usize) -> Option<MeshEntry<G>> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, index: usize) -> Option<&Mesh> {
        self.entries.get(index).map(|e| &e.mesh)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Mesh> {
        self.entries.get_mut(index).map(|e| &mut e.mesh)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MeshEntry<G>> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut MeshEntry<G>> {
        self.entries.iter_mut()
    }

    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.entries.iter().map(|e| &e.mesh)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.mesh.name == name)
    }

    /// `name` itself if free, otherwise `name` with `_cp` appended until free.
    pub fn unique_name(&self, name: &str) -> String {
        let mut candidate = name.to_string();
        while self.contains_name(&candidate) {
            candidate.push_str(COPY_SUFFIX);
        }
        candidate
    }

    pub fn total_triangles(&self) -> usize {
        self.meshes().map(Mesh::num_triangles).sum()
    }

    pub fn total_memory_mb(&self) -> f32 {
        self.meshes().map(Mesh::memory_footprint_mb).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn triangle(name: &str) -> Mesh {
        Mesh::from_geometry(name, vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 2]).unwrap()
    }

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut collection = MeshCollection::new();
        assert_eq!(collection.push(triangle("a"), ()), 0);
        assert_eq!(collection.push(triangle("b"), ()), 1);
        let names: Vec<_> = collection.meshes().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_unique_naming() {
        let mut collection = MeshCollection::new();
        collection.push(triangle("Cube"), ());
        collection.push(triangle("Cube"), ());
        collection.push(triangle("Cube"), ());
        let names: Vec<_> = collection.meshes().map(|m| m.name.clone()).collect();
        assert_eq!(names, ["Cube", "Cube_cp", "Cube_cp_cp"]);
    }

    #[test]
    fn test_remove_and_lookup() {
        let mut collection = MeshCollection::new();
        collection.push(triangle("a"), 1u32);
        collection.push(triangle("b"), 2u32);
        let id_b = collection.get(1).unwrap().id();

        let removed = collection.remove(0).unwrap();
        assert_eq!(removed.gpu, 1);
        let first = collection.iter().next().unwrap();
        assert_eq!(first.mesh.id(), id_b);
        assert_eq!(first.gpu, 2);
        assert!(collection.remove(5).is_none());
    }

    #[test]
    fn test_totals() {
        let mut collection = MeshCollection::new();
        collection.push(triangle("a"), ());
        collection.push(triangle("b"), ());
        assert_eq!(collection.total_triangles(), 2);
        assert!(collection.total_memory_mb() > 0.0);
        collection.clear();
        assert!(collection.is_empty());
    }
}
