//! The three light casters, one lesson each, over the field of textured crates
//!
//! - a directional light with no position, like the sun
//! - a point light that fades with distance
//! - a spot light held by the camera, a flashlight

use cgmath::{Point3, Vector3};

use super::{
    lighting_maps::{DIFFUSE_MAP, SPECULAR_MAP},
    lit_scene::{delegate_camera_input, LitScene, SurfaceMaps},
    Lesson, LessonContext,
};
use crate::{
    error::Result,
    gfx::{
        lighting::{Attenuation, DirectionalLight, LightColors, PointLight, SpotCone, SpotLight},
        rendering::FrameContext,
        resources::MaterialUniform,
    },
};

pub const SUN_DIRECTION: Vector3<f32> = Vector3::new(-0.2, -1.0, -0.3);
pub const LIGHT_POSITION: Point3<f32> = Point3::new(1.2, 1.0, 2.0);
pub const FLASHLIGHT_INNER_DEG: f32 = 12.5;
pub const FLASHLIGHT_OUTER_DEG: f32 = 17.5;

fn crate_field(ctx: &LessonContext<'_>, name: &str) -> Result<LitScene> {
    let maps = SurfaceMaps::Files {
        diffuse: DIFFUSE_MAP,
        specular: SPECULAR_MAP,
    };
    let material = MaterialUniform::textured().with_shininess(32.0);
    let mut scene = LitScene::new(ctx, name, material, maps)?;
    scene.add_cube_field(ctx.device);
    Ok(scene)
}

pub struct DirectionalLightLesson {
    scene: LitScene,
}

impl DirectionalLightLesson {
    pub fn new(ctx: &LessonContext<'_>) -> Result<Self> {
        let mut scene = crate_field(ctx, "Directional Light")?;
        scene.lights.directional = Some(DirectionalLight::new(
            SUN_DIRECTION,
            LightColors::grey(0.2, 0.5, 1.0),
        ));
        Ok(Self { scene })
    }
}

impl Lesson for DirectionalLightLesson {
    fn name(&self) -> &'static str {
        "directional-light"
    }

    fn draw(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        self.scene.draw(frame)
    }

    delegate_camera_input!();
}

pub struct PointLightLesson {
    scene: LitScene,
}

impl PointLightLesson {
    pub fn new(ctx: &LessonContext<'_>) -> Result<Self> {
        let mut scene = crate_field(ctx, "Point Light")?;
        scene.add_lamp(ctx.device, LIGHT_POSITION);
        scene.lights.points.push(PointLight::new(
            LIGHT_POSITION,
            LightColors::grey(0.2, 0.5, 1.0),
            Attenuation::RANGE_50,
        ));
        Ok(Self { scene })
    }
}

impl Lesson for PointLightLesson {
    fn name(&self) -> &'static str {
        "point-light"
    }

    fn draw(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        self.scene.draw(frame)
    }

    delegate_camera_input!();
}

pub struct SpotlightLesson {
    scene: LitScene,
}

impl SpotlightLesson {
    pub fn new(ctx: &LessonContext<'_>) -> Result<Self> {
        let mut scene = crate_field(ctx, "Spotlight")?;
        let camera = &scene.camera.camera;
        let flashlight = SpotLight::new(
            camera.position,
            camera.front(),
            SpotCone::from_degrees(FLASHLIGHT_INNER_DEG, FLASHLIGHT_OUTER_DEG)?,
            LightColors::grey(0.2, 0.5, 1.0),
            Attenuation::RANGE_50,
        );
        scene.lights.spot = Some(flashlight);
        Ok(Self { scene })
    }
}

impl Lesson for SpotlightLesson {
    fn name(&self) -> &'static str {
        "spotlight"
    }

    fn draw(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        let camera = self.scene.camera.camera;
        if let Some(spot) = &mut self.scene.lights.spot {
            spot.follow(camera.position, camera.front());
        }
        self.scene.draw(frame)
    }

    delegate_camera_input!();
}
