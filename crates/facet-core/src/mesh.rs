//! Mesh data model

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Size in bytes of one vertex once uploaded to the GPU (position + color).
pub const GPU_VERTEX_SIZE: usize = 6 * std::mem::size_of::<f32>();

/// Color given to generated and imported vertices.
pub const DEFAULT_VERTEX_COLOR: Vec3 = Vec3::ONE;

const BYTES_PER_MB: f32 = 1024.0 * 1024.0;

/// A mesh vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub color: Vec3,
    /// Set while the vertex belongs to the selected triangle.
    pub selected: bool,
}

impl Vertex {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            color: DEFAULT_VERTEX_COLOR,
            selected: false,
        }
    }
}

/// A triangle of the mesh, derived from the index buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub indices: [u32; 3],
    /// Face normal in model space (zero for degenerate triangles).
    pub normal: Vec3,
    pub selected: bool,
}

/// Axis-aligned bounds in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }
}

/// Position, rotation (Euler degrees) and non-uniform scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Rotation around X, Y and Z in degrees.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Rotation as a quaternion, X applied first, then Y, then Z.
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::ZYX,
            self.rotation.z.to_radians(),
            self.rotation.y.to_radians(),
            self.rotation.x.to_radians(),
        )
    }

    /// translate * rotate * scale
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Extents of a mesh after scaling.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    /// Largest extent in the XZ plane.
    pub length: f32,
    /// Extent along Y.
    pub height: f32,
}

/// Errors raised when building a mesh from raw geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("index count {0} is not a multiple of three")]
    IndexCountNotMultipleOfThree(usize),
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

/// A triangle mesh with its transform and per-triangle selection flags.
#[derive(Debug, Clone)]
pub struct Mesh {
    id: Uuid,
    /// Display name, unique within a collection.
    pub name: String,
    /// Hidden meshes are neither drawn nor pickable.
    pub visible: bool,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    triangles: Vec<Triangle>,
    bounds: Option<Aabb>,
    transform: Transform,
    model_matrix: Mat4,
    matrix_dirty: bool,
    dimensions: Dimensions,
}

impl Mesh {
    /// Create an empty mesh.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            visible: true,
            vertices: Vec::new(),
            indices: Vec::new(),
            triangles: Vec::new(),
            bounds: None,
            transform: Transform::IDENTITY,
            model_matrix: Mat4::IDENTITY,
            matrix_dirty: false,
            dimensions: Dimensions::default(),
        }
    }

    /// Build a mesh from vertex positions and triangle indices.
    pub fn from_geometry(
        name: impl Into<String>,
        positions: Vec<Vec3>,
        indices: Vec<u32>,
    ) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCountNotMultipleOfThree(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count: positions.len(),
            });
        }

        let mut mesh = Self::new(name);
        mesh.bounds = Aabb::from_points(positions.iter().copied());
        mesh.vertices = positions.into_iter().map(Vertex::new).collect();
        mesh.indices = indices;
        mesh.triangles = build_triangles(&mesh.vertices, &mesh.indices);
        mesh.update_model_matrix();
        Ok(mesh)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Approximate GPU memory taken by the vertex and index buffers, in MB.
    pub fn memory_footprint_mb(&self) -> f32 {
        let bytes = self.vertices.len() * GPU_VERTEX_SIZE
            + self.indices.len() * std::mem::size_of::<u32>();
        bytes as f32 / BYTES_PER_MB
    }

    // ---- transform ----

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.matrix_dirty = true;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
        self.matrix_dirty = true;
    }

    pub fn set_rotation(&mut self, rotation_degrees: Vec3) {
        self.transform.rotation = rotation_degrees;
        self.matrix_dirty = true;
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.transform.scale = scale;
        self.matrix_dirty = true;
    }

    pub fn reset_transform(&mut self) {
        self.set_transform(Transform::IDENTITY);
    }

    /// Whether a transform field changed since the last matrix update.
    pub fn is_matrix_dirty(&self) -> bool {
        self.matrix_dirty
    }

    /// Recompute the model matrix and the scaled dimensions.
    pub fn update_model_matrix(&mut self) {
        self.model_matrix = self.transform.to_matrix();
        self.dimensions = self.compute_dimensions();
        self.matrix_dirty = false;
    }

    /// Current model matrix, reflecting pending transform edits.
    pub fn model_matrix(&self) -> Mat4 {
        if self.matrix_dirty {
            self.transform.to_matrix()
        } else {
            self.model_matrix
        }
    }

    fn compute_dimensions(&self) -> Dimensions {
        let Some(bounds) = self.bounds else {
            return Dimensions::default();
        };
        let size = bounds.size() * self.transform.scale;
        Dimensions {
            length: size.x.max(size.z),
            height: size.y,
        }
    }

    /// Move the mesh so its scaled bounds are centered on X/Z and its
    /// lowest point rests on the ground plane.
    pub fn set_origin_to_bounds_bottom(&mut self) {
        let Some(bounds) = self.bounds else {
            return;
        };
        let scale = self.transform.scale;
        let scaled = Aabb::from_points([bounds.min * scale, bounds.max * scale]).unwrap_or(bounds);

        let anchor = Vec3::new(
            (scaled.min.x + scaled.max.x) * 0.5,
            scaled.min.y,
            (scaled.min.z + scaled.max.z) * 0.5,
        );
        let rotated = self.transform.rotation_quat() * anchor;
        self.set_position(-rotated);
        self.update_model_matrix();
    }

    // ---- selection ----

    /// Set the selection flag of one triangle.
    ///
    /// Returns `false` and leaves the mesh untouched when `index` is out of range.
    pub fn set_triangle_selected(&mut self, index: usize, selected: bool) -> bool {
        let Some(triangle) = self.triangles.get_mut(index) else {
            return false;
        };
        triangle.selected = selected;
        for &vertex in &triangle.indices {
            if let Some(v) = self.vertices.get_mut(vertex as usize) {
                v.selected = selected;
            }
        }
        true
    }

    /// Index of the first triangle whose selection flag is set.
    pub fn selected_triangle(&self) -> Option<usize> {
        self.triangles.iter().position(|t| t.selected)
    }

    pub fn selected_triangle_count(&self) -> usize {
        self.triangles.iter().filter(|t| t.selected).count()
    }
}

fn build_triangles(vertices: &[Vertex], indices: &[u32]) -> Vec<Triangle> {
    indices
        .chunks_exact(3)
        .map(|chunk| {
            let a = vertices[chunk[0] as usize].position;
            let b = vertices[chunk[1] as usize].position;
            let c = vertices[chunk[2] as usize].position;
            Triangle {
                indices: [chunk[0], chunk[1], chunk[2]],
                normal: (b - a).cross(c - a).normalize_or_zero(),
                selected: false,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad() -> Mesh {
        Mesh::from_geometry(
            "quad",
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(2.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
        .unwrap()
    }

    #[test]
    fn test_triangle_list_matches_indices() {
        let mesh = quad();
        assert_eq!(mesh.num_triangles(), mesh.indices().len() / 3);
        assert_eq!(mesh.triangles()[1].indices, [0, 2, 3]);
        assert_relative_eq!(mesh.triangles()[0].normal.z, 1.0);
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let result = Mesh::from_geometry("bad", vec![Vec3::ZERO], vec![0, 0]);
        assert_eq!(result.unwrap_err(), MeshError::IndexCountNotMultipleOfThree(2));

        let result = Mesh::from_geometry("bad", vec![Vec3::ZERO], vec![0, 0, 4]);
        assert!(matches!(result, Err(MeshError::IndexOutOfRange { index: 4, .. })));
    }

    #[test]
    fn test_model_matrix_composition() {
        let mut mesh = quad();
        mesh.set_position(Vec3::new(1.0, 2.0, 3.0));
        mesh.set_rotation(Vec3::new(0.0, 90.0, 0.0));
        mesh.set_scale(Vec3::new(2.0, 1.0, 1.0));
        mesh.update_model_matrix();

        let expected = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))
            * Mat4::from_quat(Quat::from_rotation_y(90f32.to_radians()))
            * Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let p = mesh.model_matrix().transform_point3(Vec3::X);
        let q = expected.transform_point3(Vec3::X);
        assert_relative_eq!(p.x, q.x, epsilon = 1e-5);
        assert_relative_eq!(p.y, q.y, epsilon = 1e-5);
        assert_relative_eq!(p.z, q.z, epsilon = 1e-5);
    }

    #[test]
    fn test_model_matrix_update_is_idempotent() {
        let mut mesh = quad();
        mesh.set_position(Vec3::new(0.3, -1.7, 4.1));
        mesh.set_rotation(Vec3::new(12.5, 33.0, -71.0));
        mesh.set_scale(Vec3::new(0.5, 3.0, 1.25));

        mesh.update_model_matrix();
        let first = mesh.model_matrix().to_cols_array();
        mesh.update_model_matrix();
        let second = mesh.model_matrix().to_cols_array();

        let first_bits: Vec<u32> = first.iter().map(|f| f.to_bits()).collect();
        let second_bits: Vec<u32> = second.iter().map(|f| f.to_bits()).collect();
        assert_eq!(first_bits, second_bits);
    }

    #[test]
    fn test_dirty_matrix_reflects_pending_edit() {
        let mut mesh = quad();
        mesh.set_position(Vec3::new(5.0, 0.0, 0.0));
        assert!(mesh.is_matrix_dirty());
        assert_relative_eq!(mesh.model_matrix().w_axis.x, 5.0);
        mesh.update_model_matrix();
        assert!(!mesh.is_matrix_dirty());
    }

    #[test]
    fn test_dimensions_follow_scale() {
        let mut mesh = quad();
        assert_relative_eq!(mesh.dimensions().length, 2.0);
        assert_relative_eq!(mesh.dimensions().height, 1.0);

        mesh.set_scale(Vec3::new(1.0, 3.0, 1.0));
        mesh.update_model_matrix();
        assert_relative_eq!(mesh.dimensions().height, 3.0);
    }

    #[test]
    fn test_set_triangle_selected() {
        let mut mesh = quad();
        assert!(mesh.set_triangle_selected(1, true));
        assert_eq!(mesh.selected_triangle(), Some(1));
        assert!(mesh.vertices()[3].selected);
        assert!(!mesh.vertices()[1].selected);

        assert!(!mesh.set_triangle_selected(2, true));
        assert_eq!(mesh.selected_triangle_count(), 1);

        mesh.set_triangle_selected(1, false);
        assert_eq!(mesh.selected_triangle(), None);
    }

    #[test]
    fn test_set_origin_to_bounds_bottom() {
        let mut mesh = Mesh::from_geometry(
            "raised",
            vec![
                Vec3::new(1.0, 2.0, 1.0),
                Vec3::new(3.0, 2.0, 1.0),
                Vec3::new(3.0, 4.0, 3.0),
            ],
            vec![0, 1, 2],
        )
        .unwrap();
        mesh.set_origin_to_bounds_bottom();

        let world: Vec<Vec3> = mesh
            .vertices()
            .iter()
            .map(|v| mesh.model_matrix().transform_point3(v.position))
            .collect();
        let bounds = Aabb::from_points(world).unwrap();
        assert_relative_eq!(bounds.min.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(bounds.min.x + bounds.max.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(bounds.min.z + bounds.max.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_memory_footprint() {
        let mesh = quad();
        let expected = (4 * GPU_VERTEX_SIZE + 6 * 4) as f32 / BYTES_PER_MB;
        assert_relative_eq!(mesh.memory_footprint_mb(), expected);
    }
}
