//! A material with its own ambient, diffuse and specular response under a
//! light whose colour drifts over time

use cgmath::{Matrix4, Vector3};

use super::{
    lit_scene::{delegate_camera_input, wandering_light, LitScene, SurfaceMaps},
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

const LAMP: usize = 0;

/// Light colour at `time` seconds; each channel oscillates at its own rate
pub fn light_colors(time: f32) -> LightColors {
    let color = Vector3::new((time * 2.0).sin(), (time * 0.7).sin(), (time * 1.3).sin());
    LightColors::new(color * 0.2, color * 0.5, Vector3::new(1.0, 1.0, 1.0))
}

pub struct Materials {
    scene: LitScene,
}

impl Materials {
    pub fn new(ctx: &LessonContext<'_>) -> Result<Self> {
        let material = MaterialUniform::new([1.0, 0.5, 0.31])
            .with_specular([0.5, 0.5, 0.5])
            .with_shininess(32.0);
        let mut scene = LitScene::new(ctx, "Materials", material, SurfaceMaps::Solid)?;

        scene.add_object(ctx.device, Matrix4::from_scale(3.0));
        let start = wandering_light(0.0);
        scene.add_lamp(ctx.device, start);
        scene
            .lights
            .points
            .push(PointLight::new(start, light_colors(0.0), Attenuation::NONE));

        Ok(Self { scene })
    }
}

impl Lesson for Materials {
    fn name(&self) -> &'static str {
        "materials"
    }

    fn draw(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        let position = wandering_light(frame.elapsed);
        if let Some(light) = self.scene.lights.points.first_mut() {
            light.position = position;
            light.colors = light_colors(frame.elapsed);
        }
        self.scene.move_lamp(LAMP, position);
        self.scene.draw(frame)
    }

    delegate_camera_input!();
}
