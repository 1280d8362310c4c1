//! GPU vertex layouts

use bytemuck::{Pod, Zeroable};
use facet_core::{GPU_VERTEX_SIZE, Mesh};

/// Position and color, used by meshes, the grid and the axes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PositionColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

const _: () = assert!(std::mem::size_of::<PositionColorVertex>() == GPU_VERTEX_SIZE);

impl PositionColorVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Indexed vertex data of a mesh.
pub fn mesh_vertices(mesh: &Mesh) -> Vec<PositionColorVertex> {
    mesh.vertices()
        .iter()
        .map(|v| PositionColorVertex::new(v.position.to_array(), v.color.to_array()))
        .collect()
}

/// One vertex per index, so `vertex_index / 3` is the triangle index.
pub fn expanded_mesh_vertices(mesh: &Mesh) -> Vec<PositionColorVertex> {
    let vertices = mesh.vertices();
    mesh.indices()
        .iter()
        .filter_map(|&i| vertices.get(i as usize))
        .map(|v| PositionColorVertex::new(v.position.to_array(), v.color.to_array()))
        .collect()
}
