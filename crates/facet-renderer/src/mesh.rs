//! GPU resources of a mesh

use bytemuck::{Pod, Zeroable};
use facet_core::{Mesh, object_id_for_index};
use glam::Mat4;

use crate::context::RenderContext;
use crate::vertex::{expanded_mesh_vertices, mesh_vertices};

/// Per-mesh uniform (group 1).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub object_id: u32,
    pub draw_id: u32,
    pub _pad: [u32; 2],
}

impl ObjectUniform {
    /// Uniform for the mesh at collection `index`.
    pub fn new(model: Mat4, color: [f32; 4], index: usize) -> Self {
        let id = object_id_for_index(index);
        Self {
            model: model.to_cols_array_2d(),
            color,
            object_id: id,
            draw_id: id,
            _pad: [0; 2],
        }
    }
}

/// Buffers of one mesh. Destroyed when dropped.
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    /// De-indexed copy for the identity pass when `primitive_index` is unavailable.
    expanded_buffer: Option<wgpu::Buffer>,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
}

impl GpuMesh {
    pub fn upload(ctx: &RenderContext, mesh: &Mesh) -> Self {
        let vertices = mesh_vertices(mesh);
        let vertex_buffer = ctx.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = ctx.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: bytemuck::cast_slice(mesh.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });

        let expanded_buffer = (!ctx.supports_primitive_index()).then(|| {
            let expanded = expanded_mesh_vertices(mesh);
            ctx.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Expanded Vertex Buffer"),
                contents: bytemuck::cast_slice(&expanded),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });

        let uniform = ObjectUniform::new(
            mesh.model_matrix(),
            crate::constants::mesh::DEFAULT_COLOR,
            0,
        );
        let object_buffer = ctx.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Object Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let object_bind_group = ctx.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object Bind Group"),
            layout: ctx.object_bind_group_layout(),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: object_buffer.as_entire_binding(),
            }],
        });

        tracing::debug!(
            "Uploaded mesh '{}' ({} vertices, {} indices)",
            mesh.name,
            vertices.len(),
            mesh.indices().len()
        );

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices().len() as u32,
            expanded_buffer,
            object_buffer,
            object_bind_group,
        }
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    pub fn index_buffer(&self) -> &wgpu::Buffer {
        &self.index_buffer
    }

    pub fn expanded_buffer(&self) -> Option<&wgpu::Buffer> {
        self.expanded_buffer.as_ref()
    }

    pub fn object_bind_group(&self) -> &wgpu::BindGroup {
        &self.object_bind_group
    }

    pub fn write_uniform(&self, queue: &wgpu::Queue, uniform: &ObjectUniform) {
        queue.write_buffer(&self.object_buffer, 0, bytemuck::cast_slice(&[*uniform]));
    }
}

impl Drop for GpuMesh {
    fn drop(&mut self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
        if let Some(buffer) = &self.expanded_buffer {
            buffer.destroy();
        }
        self.object_buffer.destroy();
    }
}

/// Index ranges drawn for a mesh whose triangle `picked` is highlighted:
/// the triangles before it, the triangles after it, and the picked one alone.
pub fn split_draw_ranges(
    index_count: u32,
    picked: Option<usize>,
) -> (Vec<std::ops::Range<u32>>, Option<std::ops::Range<u32>>) {
    let triangles = index_count / 3;
    match picked.map(|t| t as u32).filter(|&t| t < triangles) {
        Some(t) => {
            let start = t * 3;
            let end = start + 3;
            let normal = [0..start, end..index_count]
                .into_iter()
                .filter(|r| !r.is_empty())
                .collect();
            (normal, Some(start..end))
        }
        None => (vec![0..index_count], None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_uniform_layout() {
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 96);
        let uniform = ObjectUniform::new(Mat4::IDENTITY, [1.0; 4], 4);
        assert_eq!(uniform.object_id, 5);
        assert_eq!(uniform.draw_id, 5);
    }

    #[test]
    fn test_split_draw_ranges() {
        let (normal, highlight) = split_draw_ranges(15, Some(2));
        assert_eq!(normal, vec![0..6, 9..15]);
        assert_eq!(highlight, Some(6..9));

        let (normal, highlight) = split_draw_ranges(15, Some(0));
        assert_eq!(normal, vec![3..15]);
        assert_eq!(highlight, Some(0..3));

        let (normal, highlight) = split_draw_ranges(15, Some(4));
        assert_eq!(normal, vec![0..12]);
        assert_eq!(highlight, Some(12..15));
    }

    #[test]
    fn test_split_draw_ranges_without_pick() {
        assert_eq!(split_draw_ranges(9, None), (vec![0..9], None));
        assert_eq!(split_draw_ranges(9, Some(3)), (vec![0..9], None));
    }
}
