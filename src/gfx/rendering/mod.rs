//! Core rendering functionality
//!
//! Surface and frame management plus shader program compilation and linking.

pub mod render_engine;
pub mod shader_program;

pub use render_engine::{FrameContext, RenderEngine};
pub use shader_program::{PipelineConfig, ShaderProgram};
