//! # Scene Data
//!
//! Geometry and per-draw state: the shared vertex format, meshes with their
//! textures, OBJ models, placed objects and the fixed primitives the lessons
//! draw.

pub mod mesh;
pub mod model;
pub mod object;
pub mod primitives;
pub mod vertex;

// Re-export main types
pub use mesh::{DrawMesh, Mesh, MeshTexture, TextureKind};
pub use model::{DrawModel, ImportedScene, Model};
pub use object::{ObjectUniform, SceneObject};
pub use vertex::Vertex3D;
