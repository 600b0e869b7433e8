//! Ten textured cubes explored with the fly camera

use cgmath::{Matrix4, Point3};
use winit::event::MouseScrollDelta;

use super::{clear_color, lit_scene::cube_field, textures::MixedTextures, Lesson, LessonContext};
use crate::{
    error::Result,
    gfx::{
        camera::CameraManager,
        rendering::FrameContext,
        resources::{global_bindings::GLOBAL_GROUP, material::MATERIAL_GROUP},
        scene::{object::OBJECT_GROUP, primitives, DrawMesh, Mesh, SceneObject},
    },
    input::KeyboardState,
};

pub struct CameraLesson {
    camera: CameraManager,
    shared: MixedTextures,
    cube: Mesh,
    cubes: Vec<SceneObject>,
}

impl CameraLesson {
    pub fn new(ctx: &LessonContext<'_>) -> Result<Self> {
        let shared = MixedTextures::new(ctx, "Textured Cube Pipeline")?;

        let (vertices, indices) = primitives::cube();
        let mut cube = Mesh::new("cube", vertices, indices, Vec::new());
        cube.upload(ctx.device);

        let cubes = cube_field()
            .into_iter()
            .map(|transform: Matrix4<f32>| {
                SceneObject::new(ctx.device, &shared.object_layout, transform)
            })
            .collect();

        Ok(Self {
            camera: CameraManager::at(Point3::new(0.0, 0.0, 3.0)),
            shared,
            cube,
            cubes,
        })
    }
}

impl Lesson for CameraLesson {
    fn name(&self) -> &'static str {
        "camera"
    }

    fn draw(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        self.shared
            .globals
            .update(frame.queue, self.camera.uniform(frame.aspect));

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

    fn on_keys(&mut self, keys: &KeyboardState, delta_time: f32) {
        self.camera.process_keys(keys, delta_time);
    }

    fn on_mouse_move(&mut self, x: f64, y: f64) {
        self.camera.process_cursor(x, y);
    }

    fn on_scroll(&mut self, delta: &MouseScrollDelta) {
        self.camera.process_scroll(delta);
    }

    fn on_focus_lost(&mut self) {
        self.camera.reset_cursor();
    }
}
