//! The ten textured cubes seen through a fixed perspective camera, before the
//! camera learns to move

use cgmath::{perspective, Deg, Matrix4, Point3, Vector3};

use super::{clear_color, lit_scene::cube_field, textures::MixedTextures, Lesson, LessonContext};
use crate::{
    error::Result,
    gfx::{
        camera::{camera_utils::OPENGL_TO_WGPU_MATRIX, CameraUniform},
        rendering::FrameContext,
        resources::{global_bindings::GLOBAL_GROUP, material::MATERIAL_GROUP},
        scene::{object::OBJECT_GROUP, primitives, DrawMesh, Mesh, SceneObject},
    },
};

/// World pushed 3 units away with a 45 degree perspective
pub fn fixed_camera(aspect: f32) -> CameraUniform {
    let view = Matrix4::from_translation(Vector3::new(0.0, 0.0, -3.0));
    let projection = OPENGL_TO_WGPU_MATRIX * perspective(Deg(45.0), aspect, 0.1, 100.0);
    CameraUniform::from_matrices(view, projection, Point3::new(0.0, 0.0, 3.0))
}

pub struct CoordinateSystems {
    shared: MixedTextures,
    cube: Mesh,
    cubes: Vec<SceneObject>,
}

impl CoordinateSystems {
    pub fn new(ctx: &LessonContext<'_>) -> Result<Self> {
        let shared = MixedTextures::new(ctx, "Coordinate Systems Pipeline")?;

        let (vertices, indices) = primitives::cube();
        let mut cube = Mesh::new("cube", vertices, indices, Vec::new());
        cube.upload(ctx.device);

        let cubes = cube_field()
            .into_iter()
            .map(|transform| SceneObject::new(ctx.device, &shared.object_layout, transform))
            .collect();

        Ok(Self {
            shared,
            cube,
            cubes,
        })
    }
}

impl Lesson for CoordinateSystems {
    fn name(&self) -> &'static str {
        "coordinate-systems"
    }

    fn draw(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        self.shared
            .globals
            .update(frame.queue, fixed_camera(frame.aspect));

        let mut pass = frame.begin_pass(clear_color(0.2, 0.3, 0.3));
        pass.set_pipeline(&self.shared.pipeline);
        pass.set_bind_group(GLOBAL_GROUP, self.shared.globals.bind_group(), &[]);
        pass.set_bind_group(MATERIAL_GROUP, self.shared.material.bind_group(), &[]);
        for cube in &self.cubes {
            pass.set_bind_group(OBJECT_GROUP, cube.bind_group(), &[]);
            pass.draw_mesh(&self.cube);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    #[test]
    fn test_origin_lands_in_the_middle_of_the_depth_range() {
        let uniform = fixed_camera(800.0 / 600.0);
        let view = Matrix4::from(uniform.view);
        let projection = Matrix4::from(uniform.projection);

        let clip = projection * view * Vector4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
