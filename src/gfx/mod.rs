//! # Graphics Module
//!
//! Everything between the window surface and the lessons:
//!
//! - **Camera** ([`camera`]) - Euler-angle fly camera and its input controller
//! - **Lighting** ([`lighting`]) - light descriptions, the Phong accumulation
//!   model and the GPU light block
//! - **Rendering** ([`rendering`]) - surface and frame management, shader programs
//! - **Resources** ([`resources`]) - textures, materials and shared bind groups
//! - **Scene** ([`scene`]) - vertices, meshes, primitives, objects and OBJ models
//!
//! Bind groups follow one layout across every pipeline: group 0 carries the
//! camera, group 1 the object transform, group 2 the material and group 3 the
//! lights.

pub mod camera;
pub mod lighting;
pub mod rendering;
pub mod resources;
pub mod scene;

pub use camera::FlyCamera;
pub use rendering::{FrameContext, RenderEngine};
