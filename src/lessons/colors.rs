//! A coral cube under white light: the object colour multiplied by the light
//! colour, with no shading yet

use cgmath::{Matrix4, Point3, SquareMatrix};

use super::{
    basic_lighting::{LIGHT_POSITION, OBJECT_COLOR},
    lit_scene::{delegate_camera_input, LitScene, SurfaceMaps},
    Lesson, LessonContext,
};
use crate::{
    error::Result,
    gfx::{
        camera::CameraManager,
        lighting::{Attenuation, LightColors, PointLight},
        rendering::FrameContext,
        resources::MaterialUniform,
    },
};

/// A light with only an ambient term reduces the lit shader to `object * light`
pub fn flat_white() -> LightColors {
    LightColors::grey(1.0, 0.0, 0.0)
}

pub struct Colors {
    scene: LitScene,
}

impl Colors {
    pub fn new(ctx: &LessonContext<'_>) -> Result<Self> {
        let material = MaterialUniform::new(OBJECT_COLOR);
        let mut scene = LitScene::new(ctx, "Colors", material, SurfaceMaps::Solid)?;
        scene.camera = CameraManager::at(Point3::new(0.0, 0.0, 3.0));

        scene.add_object(ctx.device, Matrix4::identity());
        scene.add_lamp(ctx.device, LIGHT_POSITION);
        scene
            .lights
            .points
            .push(PointLight::new(LIGHT_POSITION, flat_white(), Attenuation::NONE));

        Ok(Self { scene })
    }
}

impl Lesson for Colors {
    fn name(&self) -> &'static str {
        "colors"
    }

    fn draw(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        self.scene.draw(frame)
    }

    delegate_camera_input!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::lighting::{LightSet, SurfaceSample};
    use cgmath::{InnerSpace, Vector3};

    #[test]
    fn test_surface_shows_its_own_colour_from_any_angle() {
        let lights = LightSet {
            points: vec![PointLight::new(LIGHT_POSITION, flat_white(), Attenuation::NONE)],
            ..Default::default()
        };
        let coral = Vector3::from(OBJECT_COLOR);

        for normal in [Vector3::unit_x(), -Vector3::unit_y(), Vector3::unit_z()] {
            let sample = SurfaceSample {
                position: Point3::new(0.0, 0.0, 0.0),
                normal,
                view_dir: Vector3::unit_z(),
                diffuse: coral,
                specular: Vector3::new(1.0, 1.0, 1.0),
                shininess: 32.0,
            };
            assert!((lights.shade(&sample) - coral).magnitude() < 1e-6);
        }
    }
}
