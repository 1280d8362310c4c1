//! Facet Renderer
//!
//! WGPU rendering for the Facet scene editor.
//!
//! - [`context::RenderContext`] - device handles and shared uniforms
//! - [`renderer::SceneRenderer`] - mesh collection, viewport pass and picking
//! - [`identity::IdentityFramebuffer`] - off-screen id target and pixel readback
//! - [`identity_pass::IdentityPass`] - draws object and triangle ids
//! - [`grid::GridRenderer`], [`axis::AxisRenderer`] - reference lines

pub mod axis;
pub mod camera;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod grid;
pub mod identity;
pub mod identity_pass;
pub mod mesh;
pub mod pipeline;
pub mod renderer;
pub mod vertex;

pub use camera::{OrbitCamera, SceneUniform};
pub use config::RendererConfig;
pub use context::RenderContext;
pub use error::RendererError;
pub use identity::IdentityFramebuffer;
pub use identity_pass::{IdentityPass, PrimitiveSource};
pub use mesh::{GpuMesh, ObjectUniform};
pub use renderer::SceneRenderer;
pub use vertex::PositionColorVertex;
