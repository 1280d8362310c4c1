//! Wavefront OBJ import

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use glam::Vec3;

use crate::mesh::{Mesh, MeshError};

/// OBJ import errors
#[derive(Debug, thiserror::Error)]
pub enum ObjError {
    #[error("Failed to load OBJ: {0}")]
    Load(#[from] tobj::LoadError),
    #[error("Empty mesh: no triangles found")]
    EmptyMesh,
    #[error("Invalid geometry: {0}")]
    Geometry(#[from] MeshError),
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Load an OBJ file as a single mesh named after the file.
///
/// All models in the file are merged and identical positions share one vertex.
pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh, ObjError> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(path, &load_options())?;
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");
    let mesh = merge_models(name, &models)?;
    tracing::info!(
        "Loaded OBJ '{}': {} vertices, {} triangles",
        path.display(),
        mesh.vertices().len(),
        mesh.num_triangles()
    );
    Ok(mesh)
}

/// Parse OBJ text from a reader. Material libraries are not loaded.
pub fn parse_obj(name: &str, reader: &mut impl BufRead) -> Result<Mesh, ObjError> {
    let (models, _materials) = tobj::load_obj_buf(reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })?;
    merge_models(name, &models)
}

fn merge_models(name: &str, models: &[tobj::Model]) -> Result<Mesh, ObjError> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut unique: HashMap<[u32; 3], u32> = HashMap::new();

    for model in models {
        let source = &model.mesh.positions;
        indices.reserve(model.mesh.indices.len());
        for &index in &model.mesh.indices {
            let base = index as usize * 3;
            let Some(p) = source.get(base..base + 3) else {
                return Err(MeshError::IndexOutOfRange {
                    index,
                    vertex_count: source.len() / 3,
                }
                .into());
            };
            // Exact bit match, so -0.0 and 0.0 stay distinct.
            let key = [p[0].to_bits(), p[1].to_bits(), p[2].to_bits()];
            let vertex = *unique.entry(key).or_insert_with(|| {
                positions.push(Vec3::new(p[0], p[1], p[2]));
                (positions.len() - 1) as u32
            });
            indices.push(vertex);
        }
    }

    if indices.is_empty() {
        return Err(ObjError::EmptyMesh);
    }
    Ok(Mesh::from_geometry(name, positions, indices)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const QUAD: &str = "\
o quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";

    #[test]
    fn test_parse_triangulates_quads() {
        let mesh = parse_obj("quad.obj", &mut Cursor::new(QUAD)).unwrap();
        assert_eq!(mesh.name, "quad.obj");
        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.num_triangles(), 2);
        assert!(mesh.vertices().iter().all(|v| v.color == Vec3::ONE));
    }

    #[test]
    fn test_duplicate_positions_are_merged() {
        let src = "\
o a
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o b
v 0 0 0
v 1 0 0
v 0 0 1
f 4 5 6
";
        let mesh = parse_obj("two.obj", &mut Cursor::new(src)).unwrap();
        assert_eq!(mesh.num_triangles(), 2);
        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.triangles()[1].indices[0], 0);
    }

    #[test]
    fn test_empty_file() {
        let result = parse_obj("empty.obj", &mut Cursor::new("# nothing\n"));
        assert!(matches!(result, Err(ObjError::EmptyMesh)));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("facet-obj-{}.obj", uuid::Uuid::new_v4()));
        std::fs::write(&path, QUAD).unwrap();
        let mesh = load_obj(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(mesh.num_triangles(), 2);
        assert!(mesh.name.ends_with(".obj"));
    }

    #[test]
    fn test_missing_file() {
        let result = load_obj("/nonexistent/facet/missing.obj");
        assert!(matches!(result, Err(ObjError::Load(_))));
    }
}
