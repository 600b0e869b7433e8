//! Lantern
//!
//! Incremental real-time rendering lessons built on wgpu and winit: a free-fly
//! camera, Phong lighting with directional, point and spot lights, textures and
//! OBJ model loading.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod input;
pub mod lessons;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::LanternApp;
pub use config::AppConfig;
pub use error::{LanternError, Result};
pub use lessons::{Lesson, LessonKind};
