//! # Lessons
//!
//! Each lesson is a self-contained scene: it acquires its GPU resources when it
//! is constructed, draws itself once per frame and reacts to input. One lesson
//! is selected at startup through [`LessonKind`].

use std::{fmt, str::FromStr};

use winit::event::MouseScrollDelta;

use crate::{
    config::AppConfig,
    error::{LanternError, Result},
    gfx::{
        rendering::{FrameContext, PipelineConfig, ShaderProgram},
        resources::{SamplerConfig, TextureResource},
    },
    input::KeyboardState,
};

pub mod basic_lighting;
pub mod camera;
pub mod colors;
pub mod coordinate_systems;
pub mod hello_triangle;
pub mod hello_window;
pub mod light_casters;
pub mod lighting_maps;
pub mod lit_scene;
pub mod materials;
pub mod model_loading;
pub mod multiple_lights;
pub mod shaders;
pub mod textures;
pub mod transformations;

/// A scene the application can run
///
/// Input hooks default to doing nothing so lessons without a camera only
/// implement [`Lesson::draw`].
pub trait Lesson {
    fn name(&self) -> &'static str;

    /// Records this frame's draw calls
    fn draw(&mut self, frame: &mut FrameContext<'_>) -> Result<()>;

    /// Polled once per frame with the keys currently held
    fn on_keys(&mut self, _keys: &KeyboardState, _delta_time: f32) {}

    /// Absolute cursor position in window pixels
    fn on_mouse_move(&mut self, _x: f64, _y: f64) {}

    fn on_scroll(&mut self, _delta: &MouseScrollDelta) {}

    /// The window lost focus, so the next cursor position is not a continuation
    fn on_focus_lost(&mut self) {}
}

/// What a lesson may use while it sets itself up
pub struct LessonContext<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub config: &'a AppConfig,
}

impl LessonContext<'_> {
    /// Compiles `shaders/<name>.vert.wgsl` and `shaders/<name>.frag.wgsl`
    pub fn program(&self, name: &str) -> Result<ShaderProgram> {
        ShaderProgram::from_files(
            self.device,
            name,
            self.config.shader_path(&format!("{name}.vert.wgsl")),
            self.config.shader_path(&format!("{name}.frag.wgsl")),
        )
    }

    /// Pipeline state targeting the window surface with depth testing
    pub fn pipeline_config(&self, label: &str) -> PipelineConfig {
        PipelineConfig::new(label, self.surface_format)
    }

    /// Loads `assets/<file>` with repeat wrapping and linear filtering
    pub fn texture(&self, file: &str) -> Result<TextureResource> {
        TextureResource::from_path(
            self.device,
            self.queue,
            self.config.asset_path(file),
            SamplerConfig::default(),
        )
    }
}

/// Every lesson, in teaching order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LessonKind {
    HelloWindow,
    HelloTriangle,
    Shaders,
    Textures,
    Transformations,
    CoordinateSystems,
    Camera,
    Colors,
    BasicLighting,
    Materials,
    LightingMaps,
    DirectionalLight,
    PointLight,
    Spotlight,
    MultipleLights,
    ModelLoading,
}

impl LessonKind {
    pub const ALL: [LessonKind; 16] = [
        LessonKind::HelloWindow,
        LessonKind::HelloTriangle,
        LessonKind::Shaders,
        LessonKind::Textures,
        LessonKind::Transformations,
        LessonKind::CoordinateSystems,
        LessonKind::Camera,
        LessonKind::Colors,
        LessonKind::BasicLighting,
        LessonKind::Materials,
        LessonKind::LightingMaps,
        LessonKind::DirectionalLight,
        LessonKind::PointLight,
        LessonKind::Spotlight,
        LessonKind::MultipleLights,
        LessonKind::ModelLoading,
    ];

    /// Kebab-case name accepted by `LANTERN_LESSON`
    pub fn name(self) -> &'static str {
        match self {
            LessonKind::HelloWindow => "hello-window",
            LessonKind::HelloTriangle => "hello-triangle",
            LessonKind::Shaders => "shaders",
            LessonKind::Textures => "textures",
            LessonKind::Transformations => "transformations",
            LessonKind::CoordinateSystems => "coordinate-systems",
            LessonKind::Camera => "camera",
            LessonKind::Colors => "colors",
            LessonKind::BasicLighting => "basic-lighting",
            LessonKind::Materials => "materials",
            LessonKind::LightingMaps => "lighting-maps",
            LessonKind::DirectionalLight => "directional-light",
            LessonKind::PointLight => "point-light",
            LessonKind::Spotlight => "spotlight",
            LessonKind::MultipleLights => "multiple-lights",
            LessonKind::ModelLoading => "model-loading",
        }
    }

    /// Whether the lesson steers a fly camera with the mouse
    pub fn uses_camera(self) -> bool {
        !matches!(
            self,
            LessonKind::HelloWindow
                | LessonKind::HelloTriangle
                | LessonKind::Shaders
                | LessonKind::Textures
                | LessonKind::Transformations
                | LessonKind::CoordinateSystems
        )
    }

    /// Builds the lesson. Nothing is returned unless every resource was created.
    pub fn init(self, ctx: &LessonContext<'_>) -> Result<Box<dyn Lesson>> {
        let lesson: Box<dyn Lesson> = match self {
            LessonKind::HelloWindow => Box::new(hello_window::HelloWindow::new()),
            LessonKind::HelloTriangle => Box::new(hello_triangle::HelloTriangle::new(ctx)?),
            LessonKind::Shaders => Box::new(shaders::Shaders::new(ctx)?),
            LessonKind::Textures => Box::new(textures::Textures::new(ctx)?),
            LessonKind::Transformations => {
                Box::new(transformations::Transformations::new(ctx)?)
            }
            LessonKind::CoordinateSystems => {
                Box::new(coordinate_systems::CoordinateSystems::new(ctx)?)
            }
            LessonKind::Camera => Box::new(camera::CameraLesson::new(ctx)?),
            LessonKind::Colors => Box::new(colors::Colors::new(ctx)?),
            LessonKind::BasicLighting => Box::new(basic_lighting::BasicLighting::new(ctx)?),
            LessonKind::Materials => Box::new(materials::Materials::new(ctx)?),
            LessonKind::LightingMaps => Box::new(lighting_maps::LightingMaps::new(ctx)?),
            LessonKind::DirectionalLight => {
                Box::new(light_casters::DirectionalLightLesson::new(ctx)?)
            }
            LessonKind::PointLight => Box::new(light_casters::PointLightLesson::new(ctx)?),
            LessonKind::Spotlight => Box::new(light_casters::SpotlightLesson::new(ctx)?),
            LessonKind::MultipleLights => Box::new(multiple_lights::MultipleLights::new(ctx)?),
            LessonKind::ModelLoading => Box::new(model_loading::ModelLoading::new(ctx)?),
        };
        Ok(lesson)
    }
}

impl fmt::Display for LessonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LessonKind {
    type Err = LanternError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        LessonKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = LessonKind::ALL.iter().map(|k| k.name()).collect();
                LanternError::Config(format!(
                    "unknown lesson '{}', expected one of: {}",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// Opaque clear colour
pub(crate) fn clear_color(r: f64, g: f64, b: f64) -> wgpu::Color {
    wgpu::Color { r, g, b, a: 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in LessonKind::ALL {
            assert_eq!(kind.name().parse::<LessonKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_underscores() {
        assert_eq!(
            " Multiple_Lights ".parse::<LessonKind>().unwrap(),
            LessonKind::MultipleLights
        );
    }

    #[test]
    fn test_unknown_lesson_lists_choices() {
        let err = "deferred-shading".parse::<LessonKind>().unwrap_err();
        match err {
            LanternError::Config(message) => {
                assert!(message.contains("deferred-shading"));
                assert!(message.contains("model-loading"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_camera_lessons() {
        assert!(!LessonKind::HelloTriangle.uses_camera());
        assert!(!LessonKind::Textures.uses_camera());
        assert!(!LessonKind::CoordinateSystems.uses_camera());
        assert!(LessonKind::Camera.uses_camera());
        assert!(LessonKind::Colors.uses_camera());
        assert!(LessonKind::ModelLoading.uses_camera());
    }
}
