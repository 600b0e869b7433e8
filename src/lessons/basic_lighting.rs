//! A coral cube lit by one white point light with Phong shading

use cgmath::{Matrix4, Point3};

use super::{
    lit_scene::{delegate_camera_input, LitScene, SurfaceMaps},
    Lesson, LessonContext,
};
use crate::{
    error::Result,
    gfx::{
        lighting::{Attenuation, LightColors, PointLight},
        rendering::FrameContext,
        resources::MaterialUniform,
    },
};

pub const OBJECT_COLOR: [f32; 3] = [1.0, 0.5, 0.31];
pub const LIGHT_POSITION: Point3<f32> = Point3::new(1.2, 1.0, 2.0);
const AMBIENT_STRENGTH: f32 = 0.1;
const SPECULAR_STRENGTH: f32 = 0.5;

pub struct BasicLighting {
    scene: LitScene,
}

impl BasicLighting {
    pub fn new(ctx: &LessonContext<'_>) -> Result<Self> {
        let material = MaterialUniform::new(OBJECT_COLOR);
        let mut scene = LitScene::new(ctx, "Basic Lighting", material, SurfaceMaps::Solid)?;

        scene.add_object(ctx.device, Matrix4::from_scale(3.0));
        scene.add_lamp(ctx.device, LIGHT_POSITION);
        scene.lights.points.push(PointLight::new(
            LIGHT_POSITION,
            LightColors::grey(AMBIENT_STRENGTH, 1.0, SPECULAR_STRENGTH),
            Attenuation::NONE,
        ));

        Ok(Self { scene })
    }
}

impl Lesson for BasicLighting {
    fn name(&self) -> &'static str {
        "basic-lighting"
    }

    fn draw(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        self.scene.draw(frame)
    }

    delegate_camera_input!();
}
