//! Facet Core Data Structures
//!
//! This crate contains the GPU-free model of the scene editor:
//! - Mesh: geometry, per-triangle selection flags and transform
//! - MeshCollection: insertion-ordered, uniquely named meshes
//! - Scene: collection plus the pick selection state machine
//! - IdentityPixel / PickOutcome: decoding of the picking buffer
//! - Primitive generators and OBJ import

pub mod collection;
pub mod input;
pub mod library;
pub mod mesh;
pub mod obj;
pub mod primitive;
pub mod scene;
pub mod selection;

pub use collection::*;
pub use input::*;
pub use library::*;
pub use mesh::*;
pub use obj::*;
pub use primitive::*;
pub use scene::*;
pub use selection::*;
