//! Application configuration
//!
//! Settings start from [`AppConfig::default`] and are overridden by
//! `LANTERN_*` environment variables. Parsing goes through a lookup closure so
//! it can be exercised without touching the process environment.

use std::path::PathBuf;

use log::debug;

use crate::{
    error::{LanternError, Result},
    lessons::LessonKind,
};

pub const ENV_LESSON: &str = "LANTERN_LESSON";
pub const ENV_ASSETS: &str = "LANTERN_ASSETS";
pub const ENV_WINDOW: &str = "LANTERN_WINDOW";
pub const ENV_VSYNC: &str = "LANTERN_VSYNC";
pub const ENV_CAPTURE_CURSOR: &str = "LANTERN_CAPTURE_CURSOR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "lantern".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub lesson: LessonKind,
    /// Directory holding `shaders/` and `assets/`
    pub asset_root: PathBuf,
    pub vsync: bool,
    /// Hide and confine the cursor so mouse movement steers the camera
    pub capture_cursor: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            lesson: LessonKind::MultipleLights,
            asset_root: PathBuf::from("."),
            vsync: true,
            capture_cursor: true,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `LANTERN_*` key
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(lesson) = lookup(ENV_LESSON) {
            config.lesson = lesson.parse()?;
        }
        if let Some(root) = lookup(ENV_ASSETS) {
            config.asset_root = PathBuf::from(root);
        }
        if let Some(size) = lookup(ENV_WINDOW) {
            let (width, height) = parse_window_size(&size)?;
            config.window.width = width;
            config.window.height = height;
        }
        if let Some(vsync) = lookup(ENV_VSYNC) {
            config.vsync = parse_flag(ENV_VSYNC, &vsync)?;
        }
        if let Some(capture) = lookup(ENV_CAPTURE_CURSOR) {
            config.capture_cursor = parse_flag(ENV_CAPTURE_CURSOR, &capture)?;
        }

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    pub fn shader_path(&self, file_name: &str) -> PathBuf {
        self.asset_root.join("shaders").join(file_name)
    }

    pub fn asset_path(&self, file_name: &str) -> PathBuf {
        self.asset_root.join("assets").join(file_name)
    }
}

/// Parses `<width>x<height>`, both non-zero
fn parse_window_size(value: &str) -> Result<(u32, u32)> {
    let invalid = || {
        LanternError::Config(format!(
            "{ENV_WINDOW} must look like 800x600, got '{value}'"
        ))
    };

    let (width, height) = value
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(invalid)?;
    let width: u32 = width.trim().parse().map_err(|_| invalid())?;
    let height: u32 = height.trim().parse().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok((width, height))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(LanternError::Config(format!(
            "{key} must be a boolean, got '{other}'"
        ))),
    }
}
