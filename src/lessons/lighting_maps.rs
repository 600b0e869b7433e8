//! Diffuse and specular maps: the wooden crate with a steel rim

use cgmath::{Matrix4, SquareMatrix};

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

pub const DIFFUSE_MAP: &str = "container2.png";
pub const SPECULAR_MAP: &str = "container2_specular.png";

const LAMP: usize = 0;

pub struct LightingMaps {
    scene: LitScene,
}

impl LightingMaps {
    pub fn new(ctx: &LessonContext<'_>) -> Result<Self> {
        let material = MaterialUniform::textured().with_shininess(64.0);
        let maps = SurfaceMaps::Files {
            diffuse: DIFFUSE_MAP,
            specular: SPECULAR_MAP,
        };
        let mut scene = LitScene::new(ctx, "Lighting Maps", material, maps)?;

        scene.add_object(ctx.device, Matrix4::identity());
        let start = wandering_light(0.0);
        scene.add_lamp(ctx.device, start);
        scene.lights.points.push(PointLight::new(
            start,
            LightColors::grey(0.2, 0.5, 1.0),
            Attenuation::NONE,
        ));

        Ok(Self { scene })
    }
}

impl Lesson for LightingMaps {
    fn name(&self) -> &'static str {
        "lighting-maps"
    }

    fn draw(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        let position = wandering_light(frame.elapsed);
        if let Some(light) = self.scene.lights.points.first_mut() {
            light.position = position;
        }
        self.scene.move_lamp(LAMP, position);
        self.scene.draw(frame)
    }

    delegate_camera_input!();
}
