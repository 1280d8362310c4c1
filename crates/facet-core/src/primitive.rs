//! Procedural primitive generation

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::mesh::{Mesh, MeshError};

/// Lowest segment count giving a closed circular primitive.
const MIN_ROUND_SEGMENTS: u32 = 3;

/// Primitive shapes that can be generated from the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Plane,
    Cube,
    Sphere,
    Cylinder,
    Disk,
    /// Three right triangles sharing a corner.
    Trihedral,
    /// Two square plates meeting along the X axis.
    Dihedral,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 7] = [
        PrimitiveKind::Plane,
        PrimitiveKind::Cube,
        PrimitiveKind::Sphere,
        PrimitiveKind::Cylinder,
        PrimitiveKind::Disk,
        PrimitiveKind::Trihedral,
        PrimitiveKind::Dihedral,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Plane => "Plane",
            PrimitiveKind::Cube => "Cube",
            PrimitiveKind::Sphere => "Sphere",
            PrimitiveKind::Cylinder => "Cylinder",
            PrimitiveKind::Disk => "Disk",
            PrimitiveKind::Trihedral => "Trihedral Reflector",
            PrimitiveKind::Dihedral => "Dihedral Reflector",
        }
    }

    /// Name proposed for a new mesh of this kind.
    pub fn default_mesh_name(&self) -> &'static str {
        match self {
            PrimitiveKind::Plane => "NewPlane",
            PrimitiveKind::Cube => "NewCube",
            PrimitiveKind::Sphere => "NewSphere",
            PrimitiveKind::Cylinder => "NewCylinder",
            PrimitiveKind::Disk => "NewDisk",
            PrimitiveKind::Trihedral => "NewTrihedral",
            PrimitiveKind::Dihedral => "NewDihedral",
        }
    }

    /// Whether the level of detail changes the generated geometry.
    pub fn uses_lod(&self) -> bool {
        !matches!(self, PrimitiveKind::Trihedral | PrimitiveKind::Dihedral)
    }
}

/// Normal axis of a flat primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Axis {
    /// Lies in the YZ plane.
    X,
    /// Lies in the XZ plane.
    #[default]
    Y,
    /// Lies in the XY plane.
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn label(&self) -> &'static str {
        match self {
            Axis::X => "X-Axis (YZ Plane)",
            Axis::Y => "Y-Axis (XZ Plane)",
            Axis::Z => "Z-Axis (XY Plane)",
        }
    }

    /// Place in-plane coordinates `(u, v)` on the plane through `origin`.
    fn place(&self, origin: Vec3, u: f32, v: f32) -> Vec3 {
        origin
            + match self {
                Axis::X => Vec3::new(0.0, u, v),
                Axis::Y => Vec3::new(u, 0.0, v),
                Axis::Z => Vec3::new(u, v, 0.0),
            }
    }
}

/// Parameters shared by all generators. Each kind reads the fields it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveParams {
    pub center: Vec3,
    /// Cube width, height and depth.
    pub dimensions: Vec3,
    /// Sphere, cylinder and disk radius.
    pub radius: f32,
    /// Cylinder height.
    pub height: f32,
    /// Reflector edge length.
    pub size: f32,
    pub axis: Axis,
    /// Plane extent along the first in-plane axis.
    pub plane_u: (f32, f32),
    /// Plane extent along the second in-plane axis.
    pub plane_v: (f32, f32),
    /// Subdivisions per edge, or segments around for round shapes.
    pub lod: u32,
}

impl Default for PrimitiveParams {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            dimensions: Vec3::ONE,
            radius: 1.0,
            height: 1.0,
            size: 1.0,
            axis: Axis::default(),
            plane_u: (-5.0, 5.0),
            plane_v: (-5.0, 5.0),
            lod: 10,
        }
    }
}

/// Generate a primitive mesh named `name`.
pub fn generate(kind: PrimitiveKind, params: &PrimitiveParams, name: &str) -> Result<Mesh, MeshError> {
    let (positions, indices) = match kind {
        PrimitiveKind::Plane => plane(params),
        PrimitiveKind::Cube => cube(params),
        PrimitiveKind::Sphere => sphere(params),
        PrimitiveKind::Cylinder => cylinder(params),
        PrimitiveKind::Disk => disk(params),
        PrimitiveKind::Trihedral => trihedral(params),
        PrimitiveKind::Dihedral => dihedral(params),
    };
    tracing::debug!(
        "Generated {} '{}': {} vertices, {} triangles",
        kind.name(),
        name,
        positions.len(),
        indices.len() / 3
    );
    Mesh::from_geometry(name, positions, indices)
}

type Geometry = (Vec<Vec3>, Vec<u32>);

/// Two triangles per cell of a `(segments + 1)²` vertex grid starting at `base`.
fn grid_indices(indices: &mut Vec<u32>, base: u32, segments: u32) {
    let row = segments + 1;
    for i in 0..segments {
        for j in 0..segments {
            let top_left = base + i * row + j;
            let top_right = top_left + 1;
            let bottom_left = base + (i + 1) * row + j;
            let bottom_right = bottom_left + 1;
            indices.extend_from_slice(&[top_left, bottom_left, bottom_right]);
            indices.extend_from_slice(&[top_left, bottom_right, top_right]);
        }
    }
}

fn plane(params: &PrimitiveParams) -> Geometry {
    let segments = params.lod.max(1);
    let (u0, u1) = params.plane_u;
    let (v0, v1) = params.plane_v;
    let du = (u1 - u0) / segments as f32;
    let dv = (v1 - v0) / segments as f32;

    let mut positions = Vec::with_capacity(((segments + 1) * (segments + 1)) as usize);
    for i in 0..=segments {
        for j in 0..=segments {
            let u = u0 + i as f32 * du;
            let v = v0 + j as f32 * dv;
            positions.push(params.axis.place(params.center, u, v));
        }
    }

    let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
    grid_indices(&mut indices, 0, segments);
    (positions, indices)
}

fn cube(params: &PrimitiveParams) -> Geometry {
    let lod = params.lod.max(1);
    let dims = params.dimensions;
    let half = dims * 0.5;
    let step = 1.0 / lod as f32;

    let face_point = |face: u32, i: f32, j: f32| -> Vec3 {
        let a = step * i;
        let b = step * j;
        match face {
            0 => Vec3::new(-half.x + a * dims.x, -half.y + b * dims.y, half.z),
            1 => Vec3::new(-half.x + a * dims.x, -half.y + b * dims.y, -half.z),
            2 => Vec3::new(-half.x, -half.y + a * dims.y, -half.z + b * dims.z),
            3 => Vec3::new(half.x, -half.y + a * dims.y, -half.z + b * dims.z),
            4 => Vec3::new(-half.x + a * dims.x, -half.y, -half.z + b * dims.z),
            _ => Vec3::new(-half.x + a * dims.x, half.y, -half.z + b * dims.z),
        }
    };

    let per_face = (lod + 1) * (lod + 1);
    let mut positions = Vec::with_capacity((6 * per_face) as usize);
    let mut indices = Vec::with_capacity((6 * lod * lod * 6) as usize);
    for face in 0..6 {
        for i in 0..=lod {
            for j in 0..=lod {
                positions.push(face_point(face, i as f32, j as f32) + params.center);
            }
        }
        grid_indices(&mut indices, face * per_face, lod);
    }
    (positions, indices)
}

fn sphere(params: &PrimitiveParams) -> Geometry {
    let segments = params.lod.max(MIN_ROUND_SEGMENTS);
    let phi_step = PI / segments as f32;
    let theta_step = TAU / segments as f32;
    let r = params.radius;

    let mut positions = Vec::with_capacity(((segments + 1) * (segments + 1)) as usize);
    for i in 0..=segments {
        let phi = i as f32 * phi_step;
        for j in 0..=segments {
            let theta = j as f32 * theta_step;
            positions.push(
                params.center
                    + Vec3::new(
                        r * phi.sin() * theta.cos(),
                        r * phi.cos(),
                        r * phi.sin() * theta.sin(),
                    ),
            );
        }
    }

    let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
    for i in 0..segments {
        for j in 0..segments {
            let first = i * (segments + 1) + j;
            let second = first + segments + 1;
            indices.extend_from_slice(&[first, second, first + 1]);
            indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }
    (positions, indices)
}

fn cylinder(params: &PrimitiveParams) -> Geometry {
    let segments = params.lod.max(MIN_ROUND_SEGMENTS);
    let angle_step = TAU / segments as f32;
    let half_height = params.height * 0.5;

    // Rim vertices alternate top, bottom; the two cap centers come last.
    let mut positions = Vec::with_capacity((2 * segments + 2) as usize);
    for i in 0..segments {
        let angle = i as f32 * angle_step;
        let x = params.radius * angle.cos();
        let z = params.radius * angle.sin();
        positions.push(params.center + Vec3::new(x, half_height, z));
        positions.push(params.center + Vec3::new(x, -half_height, z));
    }
    positions.push(params.center + Vec3::new(0.0, half_height, 0.0));
    positions.push(params.center + Vec3::new(0.0, -half_height, 0.0));

    let top_center = 2 * segments;
    let bottom_center = top_center + 1;
    let mut indices = Vec::with_capacity((segments * 12) as usize);
    for i in 0..segments {
        let next = (i + 1) % segments;
        indices.extend_from_slice(&[i * 2, next * 2, i * 2 + 1]);
        indices.extend_from_slice(&[next * 2, next * 2 + 1, i * 2 + 1]);
    }
    for i in 0..segments {
        let next = (i + 1) % segments;
        indices.extend_from_slice(&[top_center, i * 2, next * 2]);
        indices.extend_from_slice(&[bottom_center, next * 2 + 1, i * 2 + 1]);
    }
    (positions, indices)
}

fn disk(params: &PrimitiveParams) -> Geometry {
    let segments = params.lod.max(MIN_ROUND_SEGMENTS);
    let angle_step = TAU / segments as f32;

    let mut positions = Vec::with_capacity((segments + 1) as usize);
    positions.push(params.center);
    for i in 0..segments {
        let angle = i as f32 * angle_step;
        let u = params.radius * angle.cos();
        let v = params.radius * angle.sin();
        positions.push(params.axis.place(params.center, u, v));
    }

    let mut indices = Vec::with_capacity((segments * 3) as usize);
    for i in 1..segments {
        indices.extend_from_slice(&[0, i, i + 1]);
    }
    indices.extend_from_slice(&[0, segments, 1]);
    (positions, indices)
}

fn trihedral(params: &PrimitiveParams) -> Geometry {
    let c = params.center;
    let h = params.size;
    let positions = vec![
        c,
        c + Vec3::new(h, 0.0, 0.0),
        c + Vec3::new(0.0, h, 0.0),
        c + Vec3::new(0.0, 0.0, h),
        c + Vec3::new(h, h, 0.0),
        c + Vec3::new(h, 0.0, h),
        c + Vec3::new(0.0, h, h),
    ];
    let indices = vec![0, 1, 2, 0, 1, 3, 0, 2, 3];
    (positions, indices)
}

fn dihedral(params: &PrimitiveParams) -> Geometry {
    let c = params.center;
    let h = params.size;
    let positions = vec![
        c,
        c + Vec3::new(h, 0.0, 0.0),
        c + Vec3::new(0.0, h, 0.0),
        c + Vec3::new(h, h, 0.0),
        c + Vec3::new(0.0, 0.0, h),
        c + Vec3::new(h, 0.0, h),
    ];
    // XY plate, then XZ plate
    let indices = vec![0, 1, 2, 2, 1, 3, 0, 1, 4, 4, 1, 5];
    (positions, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params(lod: u32) -> PrimitiveParams {
        PrimitiveParams {
            lod,
            ..Default::default()
        }
    }

    fn count(kind: PrimitiveKind, lod: u32) -> usize {
        generate(kind, &params(lod), "t").unwrap().num_triangles()
    }

    #[test]
    fn test_triangle_counts() {
        for lod in [3, 4, 10] {
            let n = lod as usize;
            assert_eq!(count(PrimitiveKind::Plane, lod), 2 * n * n);
            assert_eq!(count(PrimitiveKind::Cube, lod), 12 * n * n);
            assert_eq!(count(PrimitiveKind::Sphere, lod), 2 * n * n);
            assert_eq!(count(PrimitiveKind::Cylinder, lod), 4 * n);
            assert_eq!(count(PrimitiveKind::Disk, lod), n);
        }
        assert_eq!(count(PrimitiveKind::Trihedral, 10), 3);
        assert_eq!(count(PrimitiveKind::Dihedral, 10), 4);
    }

    #[test]
    fn test_lod_is_clamped() {
        assert_eq!(count(PrimitiveKind::Plane, 0), 2);
        assert_eq!(count(PrimitiveKind::Disk, 1), 3);
    }

    #[test]
    fn test_plane_lies_on_axis_plane() {
        let p = PrimitiveParams {
            axis: Axis::Z,
            lod: 2,
            ..Default::default()
        };
        let mesh = generate(PrimitiveKind::Plane, &p, "plane").unwrap();
        assert_eq!(mesh.vertices().len(), 9);
        assert!(mesh.vertices().iter().all(|v| v.position.z == 0.0));
        assert_relative_eq!(mesh.dimensions().height, 10.0);
    }

    #[test]
    fn test_cube_dimensions() {
        let p = PrimitiveParams {
            dimensions: Vec3::new(2.0, 3.0, 1.0),
            lod: 1,
            ..Default::default()
        };
        let mesh = generate(PrimitiveKind::Cube, &p, "cube").unwrap();
        assert_eq!(mesh.vertices().len(), 24);
        assert_relative_eq!(mesh.dimensions().height, 3.0);
        assert_relative_eq!(mesh.dimensions().length, 2.0);
    }

    #[test]
    fn test_generated_vertices_are_white() {
        for kind in PrimitiveKind::ALL {
            let mesh = generate(kind, &params(4), kind.default_mesh_name()).unwrap();
            assert!(mesh.vertices().iter().all(|v| v.color == Vec3::ONE));
        }
    }
}
