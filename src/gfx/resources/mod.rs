//! GPU resource management
//!
//! Handles textures, materials and the global bind group for rendering.

pub mod global_bindings;
pub mod material;
pub mod texture_cache;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO};
pub use material::{Material, MaterialBindings, MaterialUniform};
pub use texture_cache::TextureCache;
pub use texture_resource::{SamplerConfig, TextureResource};
