//! Every light caster at once: a dim sun, four point lights and the flashlight

use cgmath::{Point3, Vector3};

use super::{
    lighting_maps::{DIFFUSE_MAP, SPECULAR_MAP},
    lit_scene::{delegate_camera_input, LitScene, SurfaceMaps},
    Lesson, LessonContext,
};
use crate::{
    error::Result,
    gfx::{
        lighting::{
            Attenuation, DirectionalLight, LightColors, LightSet, PointLight, SpotCone, SpotLight,
        },
        rendering::FrameContext,
        resources::MaterialUniform,
    },
};

pub const POINT_LIGHT_POSITIONS: [Point3<f32>; 4] = [
    Point3::new(0.7, 0.2, 2.0),
    Point3::new(2.3, -3.3, -4.0),
    Point3::new(-4.0, 2.0, -12.0),
    Point3::new(0.0, 0.0, -3.0),
];

/// The light set for a camera at `eye` looking along `front`
pub fn scene_lights(eye: Point3<f32>, front: Vector3<f32>) -> Result<LightSet> {
    Ok(LightSet {
        directional: Some(DirectionalLight::new(
            Vector3::new(-0.2, -1.0, -0.3),
            LightColors::grey(0.05, 0.4, 0.5),
        )),
        points: POINT_LIGHT_POSITIONS
            .iter()
            .map(|&position| {
                PointLight::new(
                    position,
                    LightColors::grey(0.05, 0.8, 1.0),
                    Attenuation::RANGE_50,
                )
            })
            .collect(),
        spot: Some(SpotLight::new(
            eye,
            front,
            SpotCone::from_degrees(12.5, 15.0)?,
            LightColors::grey(0.2, 1.0, 1.0),
            Attenuation::RANGE_50,
        )),
    })
}

pub struct MultipleLights {
    scene: LitScene,
}

impl MultipleLights {
    pub fn new(ctx: &LessonContext<'_>) -> Result<Self> {
        let maps = SurfaceMaps::Files {
            diffuse: DIFFUSE_MAP,
            specular: SPECULAR_MAP,
        };
        let material = MaterialUniform::textured().with_shininess(32.0);
        let mut scene = LitScene::new(ctx, "Multiple Lights", material, maps)?;

        scene.add_cube_field(ctx.device);
        for position in POINT_LIGHT_POSITIONS {
            scene.add_lamp(ctx.device, position);
        }
        let camera = scene.camera.camera;
        scene.lights = scene_lights(camera.position, camera.front())?;

        Ok(Self { scene })
    }
}

impl Lesson for MultipleLights {
    fn name(&self) -> &'static str {
        "multiple-lights"
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::lighting::{SurfaceSample, MAX_POINT_LIGHTS};
    use cgmath::InnerSpace;

    #[test]
    fn test_every_light_fits_the_uniform() {
        let lights = scene_lights(Point3::new(0.5, 1.0, 4.0), -Vector3::unit_z()).unwrap();
        assert_eq!(lights.points.len(), MAX_POINT_LIGHTS);
        assert_eq!(lights.to_uniform().counts, [1, 4, 1, 0]);
    }

    #[test]
    fn test_flashlight_brightens_what_the_camera_faces() {
        let eye = Point3::new(0.0, 0.0, 3.0);
        let lights = scene_lights(eye, -Vector3::unit_z()).unwrap();

        let sample_at = |position: Point3<f32>| SurfaceSample {
            position,
            normal: Vector3::unit_z(),
            view_dir: (eye - position).normalize(),
            diffuse: Vector3::new(1.0, 1.0, 1.0),
            specular: Vector3::new(1.0, 1.0, 1.0),
            shininess: 32.0,
        };

        let spot = lights.spot.unwrap();
        let centre = spot.shade(&sample_at(Point3::new(0.0, 0.0, 0.0)));
        let outside = spot.shade(&sample_at(Point3::new(2.0, 0.0, 0.0)));
        assert!(centre.x > outside.x);
    }
}
