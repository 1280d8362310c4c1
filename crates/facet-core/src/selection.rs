//! Identity pixel decoding and the triangle selection state machine

use crate::collection::MeshCollection;

/// One texel of the identity target.
///
/// `object_id` 0 is the background; `object_id` N refers to collection index N-1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdentityPixel {
    pub object_id: u32,
    pub draw_id: u32,
    pub primitive_id: u32,
}

impl IdentityPixel {
    /// Value of pixels not covered by any mesh.
    pub const BACKGROUND: Self = Self {
        object_id: 0,
        draw_id: 0,
        primitive_id: 0,
    };

    /// Decode an `Rgba32Uint` texel.
    pub fn from_texel(texel: [u32; 4]) -> Self {
        Self {
            object_id: texel[0],
            draw_id: texel[1],
            primitive_id: texel[2],
        }
    }

    /// Pixel written for triangle `primitive` of the mesh at `index`.
    pub fn for_mesh(index: usize, primitive: u32) -> Self {
        let id = object_id_for_index(index);
        Self {
            object_id: id,
            draw_id: id,
            primitive_id: primitive,
        }
    }

    pub fn is_background(&self) -> bool {
        self.object_id == 0
    }
}

/// Object id written by the identity pass for the mesh at `index`.
pub fn object_id_for_index(index: usize) -> u32 {
    index as u32 + 1
}

/// Result of interpreting an identity pixel against the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    Background,
    Hit { mesh: usize, triangle: usize },
    /// Object or primitive id does not match a live mesh / triangle.
    OutOfRange,
}

impl PickOutcome {
    pub fn resolve<G>(pixel: IdentityPixel, meshes: &MeshCollection<G>) -> Self {
        if pixel.is_background() {
            return Self::Background;
        }
        let mesh = (pixel.object_id - 1) as usize;
        let triangle = pixel.primitive_id as usize;
        match meshes.get(mesh) {
            Some(m) if triangle < m.num_triangles() => Self::Hit { mesh, triangle },
            _ => Self::OutOfRange,
        }
    }
}

/// The currently picked triangle, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Selected { mesh: usize, triangle: usize },
}

impl Selection {
    pub fn picked(&self) -> Option<(usize, usize)> {
        match *self {
            Self::Idle => None,
            Self::Selected { mesh, triangle } => Some((mesh, triangle)),
        }
    }

    /// Apply a pick outcome, updating the triangle flags in `meshes`.
    pub fn apply<G>(&mut self, outcome: PickOutcome, meshes: &mut MeshCollection<G>) {
        match outcome {
            PickOutcome::OutOfRange => {
                tracing::trace!("Ignoring out-of-range pick");
            }
            PickOutcome::Background => {
                self.clear(meshes);
            }
            PickOutcome::Hit { mesh, triangle } => {
                self.clear(meshes);
                if let Some(m) = meshes.get_mut(mesh) {
                    m.set_triangle_selected(triangle, true);
                    *self = Self::Selected { mesh, triangle };
                }
            }
        }
    }

    /// Clear the flag of the selected triangle and go idle.
    pub fn clear<G>(&mut self, meshes: &mut MeshCollection<G>) {
        if let Self::Selected { mesh, triangle } = *self
            && let Some(m) = meshes.get_mut(mesh)
        {
            m.set_triangle_selected(triangle, false);
        }
        *self = Self::Idle;
    }

    /// Keep the selection consistent after the mesh at `removed` left the collection.
    pub fn on_mesh_removed(&mut self, removed: usize) {
        if let Self::Selected { mesh, triangle } = *self {
            if mesh == removed {
                *self = Self::Idle;
            } else if mesh > removed {
                *self = Self::Selected {
                    mesh: mesh - 1,
                    triangle,
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;
    use glam::Vec3;

    /// A fan mesh with `n` triangles.
    fn fan(name: &str, n: u32) -> Mesh {
        let mut positions = vec![Vec3::ZERO];
        for i in 0..=n {
            let a = i as f32 * 0.3;
            positions.push(Vec3::new(a.cos(), a.sin(), 0.0));
        }
        let indices = (0..n).flat_map(|i| [0, i + 1, i + 2]).collect();
        Mesh::from_geometry(name, positions, indices).unwrap()
    }

    fn flagged(meshes: &MeshCollection) -> Vec<(usize, usize)> {
        meshes
            .meshes()
            .enumerate()
            .flat_map(|(i, m)| {
                m.triangles()
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.selected)
                    .map(move |(t, _)| (i, t))
            })
            .collect()
    }

    fn two_meshes() -> MeshCollection {
        let mut meshes = MeshCollection::new();
        meshes.push(fan("MeshA", 2), ());
        meshes.push(fan("MeshB", 5), ());
        meshes
    }

    #[test]
    fn test_object_ids_round_trip() {
        for n in 0..8 {
            let mut meshes = MeshCollection::new();
            for i in 0..n {
                meshes.push(fan(&format!("m{i}"), 3), ());
            }
            for i in 0..n {
                assert_eq!(object_id_for_index(i), i as u32 + 1);
                let pixel = IdentityPixel::for_mesh(i, 2);
                assert_eq!(
                    PickOutcome::resolve(pixel, &meshes),
                    PickOutcome::Hit { mesh: i, triangle: 2 }
                );
            }
        }
    }

    #[test]
    fn test_from_texel() {
        let pixel = IdentityPixel::from_texel([2, 2, 3, 0]);
        assert_eq!(pixel, IdentityPixel::for_mesh(1, 3));
        assert!(IdentityPixel::from_texel([0; 4]).is_background());
    }

    #[test]
    fn test_hit_selects_triangle() {
        let mut meshes = two_meshes();
        let mut selection = Selection::default();

        let outcome = PickOutcome::resolve(IdentityPixel::from_texel([2, 2, 3, 0]), &meshes);
        selection.apply(outcome, &mut meshes);

        assert_eq!(selection, Selection::Selected { mesh: 1, triangle: 3 });
        assert_eq!(flagged(&meshes), [(1, 3)]);
        assert_eq!(meshes.get(0).unwrap().selected_triangle(), None);
    }

    #[test]
    fn test_background_clears_selection() {
        let mut meshes = two_meshes();
        let mut selection = Selection::default();
        selection.apply(PickOutcome::Hit { mesh: 0, triangle: 1 }, &mut meshes);

        let outcome = PickOutcome::resolve(IdentityPixel::BACKGROUND, &meshes);
        assert_eq!(outcome, PickOutcome::Background);
        selection.apply(outcome, &mut meshes);

        assert_eq!(selection, Selection::Idle);
        assert!(flagged(&meshes).is_empty());
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut meshes = two_meshes();
        let mut selection = Selection::default();
        selection.apply(PickOutcome::Hit { mesh: 1, triangle: 0 }, &mut meshes);

        for texel in [[3, 3, 0, 0], [1, 1, 2, 0], [2, 2, 99, 0]] {
            let outcome = PickOutcome::resolve(IdentityPixel::from_texel(texel), &meshes);
            assert_eq!(outcome, PickOutcome::OutOfRange);
            selection.apply(outcome, &mut meshes);
        }

        assert_eq!(selection, Selection::Selected { mesh: 1, triangle: 0 });
        assert_eq!(flagged(&meshes), [(1, 0)]);
    }

    #[test]
    fn test_at_most_one_flag_after_pick_sequence() {
        let mut meshes = two_meshes();
        let mut selection = Selection::default();
        let texels = [
            [1, 1, 0, 0],
            [2, 2, 4, 0],
            [2, 2, 4, 0],
            [0, 0, 0, 0],
            [1, 1, 1, 0],
            [9, 9, 0, 0],
            [2, 2, 2, 0],
        ];
        for texel in texels {
            let outcome = PickOutcome::resolve(IdentityPixel::from_texel(texel), &meshes);
            selection.apply(outcome, &mut meshes);
            assert!(flagged(&meshes).len() <= 1);
        }
        assert_eq!(flagged(&meshes), [(1, 2)]);
    }

    #[test]
    fn test_on_mesh_removed() {
        let mut selection = Selection::Selected { mesh: 2, triangle: 4 };
        selection.on_mesh_removed(0);
        assert_eq!(selection, Selection::Selected { mesh: 1, triangle: 4 });

        selection.on_mesh_removed(3);
        assert_eq!(selection, Selection::Selected { mesh: 1, triangle: 4 });

        selection.on_mesh_removed(1);
        assert_eq!(selection, Selection::Idle);
    }
}
