//! Error types for the lantern renderer
//!
//! Every fallible boundary (window and device creation, shader compilation and
//! linking, asset I/O, image decoding and model import) reports through
//! [`LanternError`]. Nothing below the binary terminates the process.

use std::{fmt, path::PathBuf};

use thiserror::Error;

/// Result type for lantern operations
pub type Result<T> = std::result::Result<T, LanternError>;

/// Pipeline stage a shader source was compiled for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Entry point every lantern shader exposes for this stage
    pub fn entry_point(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vs_main",
            ShaderStage::Fragment => "fs_main",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Errors that can occur while bootstrapping or running a lesson
#[derive(Error, Debug)]
pub enum LanternError {
    /// The platform event loop could not be created or failed while running
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// The OS refused to create the window
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    /// No presentable surface could be created for the window
    #[error("failed to create surface: {0}")]
    SurfaceCreate(#[from] wgpu::CreateSurfaceError),

    /// No GPU adapter is compatible with the surface
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    /// The adapter refused to open a device
    #[error("failed to open GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// The next swap-chain image could not be acquired
    #[error("failed to acquire surface texture: {0}")]
    SurfaceAcquire(#[from] wgpu::SurfaceError),

    /// A shader stage failed to parse or validate
    #[error("failed to compile {stage} shader '{label}':\n{log}")]
    ShaderCompile {
        label: String,
        stage: ShaderStage,
        log: String,
    },

    /// The stages of a program do not fit together, or the pipeline was rejected
    #[error("failed to link shader program '{label}':\n{log}")]
    ShaderLink { label: String, log: String },

    /// An asset file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An image file could not be decoded
    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A decoded image is larger than the device can hold in one texture
    #[error("image {} is {width}x{height}, larger than the {max}x{max} textures this device supports", path.display())]
    TextureTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max: u32,
    },

    /// The model importer rejected a file
    #[error("failed to import model {}: {source}", path.display())]
    Import {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    /// The importer produced a scene that cannot be drawn
    #[error("model {} is incomplete: {reason}", path.display())]
    IncompleteScene { path: PathBuf, reason: String },

    /// A configuration value could not be understood
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A spot light whose outer cone is narrower than its inner cone
    #[error("invalid spot light cone: outer angle {outer_deg}° is smaller than inner angle {inner_deg}°")]
    InvalidSpotCone { inner_deg: f32, outer_deg: f32 },
}

impl LanternError {
    /// Wraps an I/O error with the path that caused it
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LanternError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_compile_message_carries_log() {
        let err = LanternError::ShaderCompile {
            label: "lit".to_string(),
            stage: ShaderStage::Fragment,
            log: "expected ';'".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("fragment"));
        assert!(message.contains("'lit'"));
        assert!(message.ends_with("expected ';'"));
    }

    #[test]
    fn test_io_error_names_path() {
        let err = LanternError::io(
            "assets/missing.png",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().contains("assets/missing.png"));
    }

    #[test]
    fn test_stage_entry_points() {
        assert_eq!(ShaderStage::Vertex.entry_point(), "vs_main");
        assert_eq!(ShaderStage::Fragment.entry_point(), "fs_main");
    }
}
