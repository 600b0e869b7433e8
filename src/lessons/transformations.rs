//! The blended-texture quad moved to the lower right and spun about Z

use cgmath::{Matrix4, Rad, SquareMatrix, Vector3};

use super::{clear_color, textures::MixedTextures, Lesson, LessonContext};
use crate::{
    error::Result,
    gfx::{
        camera::CameraUniform,
        rendering::FrameContext,
        resources::{global_bindings::GLOBAL_GROUP, material::MATERIAL_GROUP},
        scene::{object::OBJECT_GROUP, primitives, DrawMesh, Mesh, SceneObject},
    },
};

/// Quad transform at `time` seconds: one radian per second, offset by (0.5, -0.5)
pub fn spinning_quad(time: f32) -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(0.5, -0.5, 0.0)) * Matrix4::from_angle_z(Rad(time))
}

pub struct Transformations {
    shared: MixedTextures,
    quad: Mesh,
    placement: SceneObject,
}

impl Transformations {
    pub fn new(ctx: &LessonContext<'_>) -> Result<Self> {
        let shared = MixedTextures::new(ctx, "Transformed Quad Pipeline")?;

        let (vertices, indices) = primitives::quad();
        let mut quad = Mesh::new("quad", vertices, indices, Vec::new());
        quad.upload(ctx.device);

        let placement = SceneObject::new(ctx.device, &shared.object_layout, Matrix4::identity());

        Ok(Self {
            shared,
            quad,
            placement,
        })
    }
}

impl Lesson for Transformations {
    fn name(&self) -> &'static str {
        "transformations"
    }

    fn draw(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        self.shared.globals.update(frame.queue, CameraUniform::default());
        self.placement.transform = spinning_quad(frame.elapsed);
        self.placement.update(frame.queue);

        let mut pass = frame.begin_pass(clear_color(0.2, 0.3, 0.3));
        pass.set_pipeline(&self.shared.pipeline);
        pass.set_bind_group(GLOBAL_GROUP, self.shared.globals.bind_group(), &[]);
        pass.set_bind_group(OBJECT_GROUP, self.placement.bind_group(), &[]);
        pass.set_bind_group(MATERIAL_GROUP, self.shared.material.bind_group(), &[]);
        pass.draw_mesh(&self.quad);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Point3, Transform};

    #[test]
    fn test_quad_centre_stays_put_while_spinning() {
        for time in [0.0, 0.5, 2.0] {
            let centre = spinning_quad(time).transform_point(Point3::new(0.0, 0.0, 0.0));
            assert!((centre - Point3::new(0.5, -0.5, 0.0)).magnitude() < 1e-6);
        }
    }

    #[test]
    fn test_quarter_turn() {
        let corner = spinning_quad(std::f32::consts::FRAC_PI_2)
            .transform_point(Point3::new(0.5, 0.0, 0.0));
        assert!((corner - Point3::new(0.5, 0.0, 0.0)).magnitude() < 1e-6);
    }
}
