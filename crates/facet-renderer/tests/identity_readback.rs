//! Picks through the real identity target on a headless device.

mod common;

use facet_core::Mesh;
use facet_renderer::{PrimitiveSource, RendererConfig, SceneRenderer};
use glam::Vec3;

const WIDTH: u32 = 400;
const HEIGHT: u32 = 200;

/// Quad in the XY plane at depth `z`, split into triangles [0, 1, 2] and [0, 2, 3].
fn quad(name: &str, x: (f32, f32), y: (f32, f32), z: f32) -> Mesh {
    let positions = vec![
        Vec3::new(x.0, y.0, z),
        Vec3::new(x.1, y.0, z),
        Vec3::new(x.1, y.1, z),
        Vec3::new(x.0, y.1, z),
    ];
    Mesh::from_geometry(name, positions, vec![0, 1, 2, 0, 2, 3]).unwrap()
}

fn centroid(mesh: &Mesh, triangle: usize) -> Vec3 {
    let indices = mesh.triangles()[triangle].indices;
    let sum: Vec3 = indices.iter().map(|&i| mesh.vertices()[i as usize].position).sum();
    sum / 3.0
}

/// Viewport pixel (origin top-left) of a world position.
fn to_cursor(renderer: &SceneRenderer, world: Vec3) -> (f32, f32) {
    let ndc = renderer.camera().view_projection().project_point3(world);
    let (width, height) = renderer.size();
    (
        (ndc.x + 1.0) * 0.5 * width as f32,
        (1.0 - ndc.y) * 0.5 * height as f32,
    )
}

/// Renderer looking down -Z at four quads:
/// 0: A at z=0 on the left, 1: B at z=1 on the right,
/// 2: C at z=-1 behind both and wider, 3: D hidden in front of everything.
fn build_scene(config: RendererConfig) -> Option<SceneRenderer> {
    let (device, queue) = common::headless_device()?;
    let mut renderer = SceneRenderer::new(device, queue, config, WIDTH, HEIGHT).unwrap();

    let camera = renderer.camera_mut();
    camera.target = Vec3::ZERO;
    camera.yaw = 0.0;
    camera.pitch = 0.0;

    renderer.append(quad("A", (-2.0, 0.0), (-1.0, 1.0), 0.0));
    renderer.append(quad("B", (0.0, 2.0), (-1.0, 1.0), 1.0));
    renderer.append(quad("C", (-3.0, 3.0), (-1.0, 1.0), -1.0));
    let mut hidden = quad("D", (-3.0, 3.0), (-1.0, 1.0), 2.0);
    hidden.visible = false;
    renderer.append(hidden);
    Some(renderer)
}

fn pick_centroid(renderer: &mut SceneRenderer, mesh: usize, triangle: usize) -> Option<(usize, usize)> {
    let world = centroid(renderer.meshes().get(mesh).unwrap(), triangle);
    let cursor = to_cursor(renderer, world);
    renderer.request_pick(cursor)
}

fn check_readback(renderer: &mut SceneRenderer) {
    // Each triangle of the front quads reads back its own mesh and index.
    for mesh in 0..2 {
        for triangle in 0..2 {
            assert_eq!(pick_centroid(renderer, mesh, triangle), Some((mesh, triangle)));
            let flagged = renderer.meshes().get(mesh).unwrap().selected_triangle();
            assert_eq!(flagged, Some(triangle));
        }
    }

    // Only C covers this point; the hidden quad in front never wins.
    let cursor = to_cursor(renderer, Vec3::new(2.5, 0.0, -1.0));
    let picked = renderer.request_pick(cursor);
    assert!(matches!(picked, Some((2, _))), "picked {picked:?}");

    // Corner pixel shows the background and clears the selection.
    assert_eq!(renderer.request_pick((1.0, 1.0)), None);
    assert!(renderer.meshes().meshes().all(|m| m.selected_triangle().is_none()));

    // Outside the target behaves like the background.
    assert_eq!(renderer.request_pick((WIDTH as f32 + 5.0, 10.0)), None);

    // After removing A the ids shift and C shows through where A was.
    let a_center = to_cursor(renderer, centroid(renderer.meshes().get(0).unwrap(), 0));
    renderer.remove(0);
    let picked = renderer.request_pick(a_center);
    assert!(matches!(picked, Some((1, _))), "picked {picked:?}");
    assert_eq!(renderer.meshes().get(1).unwrap().name, "C");
}

#[test]
fn test_readback_default_path() {
    let Some(mut renderer) = build_scene(RendererConfig::default()) else {
        return;
    };
    check_readback(&mut renderer);
}

#[test]
fn test_readback_expanded_vertices() {
    let config = RendererConfig {
        picking_fallback: true,
        ..Default::default()
    };
    let Some(mut renderer) = build_scene(config) else {
        return;
    };
    assert_eq!(renderer.primitive_source(), PrimitiveSource::ExpandedVertices);
    check_readback(&mut renderer);
}

#[test]
fn test_pick_survives_resize() {
    let Some(mut renderer) = build_scene(RendererConfig::default()) else {
        return;
    };
    renderer.resize(WIDTH / 2, HEIGHT / 2).unwrap();
    assert_eq!(pick_centroid(&mut renderer, 1, 0), Some((1, 0)));
}
