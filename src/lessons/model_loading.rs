//! An OBJ model with its own textures, viewed with the fly camera

use cgmath::{Matrix4, Point3, SquareMatrix};
use winit::event::MouseScrollDelta;

use super::{clear_color, Lesson, LessonContext};
use crate::{
    error::Result,
    gfx::{
        camera::CameraManager,
        rendering::FrameContext,
        resources::{
            global_bindings::GLOBAL_GROUP, material::MATERIAL_GROUP, GlobalBindings,
            MaterialBindings,
        },
        scene::{
            object::{object_layout, OBJECT_GROUP},
            DrawModel, Model, SceneObject,
        },
    },
    input::KeyboardState,
};

pub const MODEL_FILE: &str = "backpack/backpack.obj";

pub struct ModelLoading {
    camera: CameraManager,
    globals: GlobalBindings,
    pipeline: wgpu::RenderPipeline,
    model: Model,
    placement: SceneObject,
}

impl ModelLoading {
    pub fn new(ctx: &LessonContext<'_>) -> Result<Self> {
        let globals = GlobalBindings::new(ctx.device);
        let object_layout = object_layout(ctx.device);
        let material_bindings = MaterialBindings::new(ctx.device);

        let pipeline = ctx.program("model")?.link(
            ctx.device,
            &ctx.pipeline_config("Model Pipeline")
                .with_bind_group_layouts(vec![
                    globals.bind_group_layout().clone(),
                    object_layout.layout.clone(),
                    material_bindings.bind_group_layout().clone(),
                ]),
        )?;

        let model = Model::load(
            ctx.device,
            ctx.queue,
            &material_bindings,
            ctx.config.asset_path(MODEL_FILE),
        )?;
        let placement = SceneObject::new(ctx.device, &object_layout, Matrix4::identity());

        Ok(Self {
            camera: CameraManager::at(Point3::new(0.0, 0.0, 3.0)),
            globals,
            pipeline,
            model,
            placement,
        })
    }
}

impl Lesson for ModelLoading {
    fn name(&self) -> &'static str {
        "model-loading"
    }

    fn draw(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        self.globals.update(frame.queue, self.camera.uniform(frame.aspect));

        let mut pass = frame.begin_pass(clear_color(0.05, 0.05, 0.05));
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(GLOBAL_GROUP, self.globals.bind_group(), &[]);
        pass.set_bind_group(OBJECT_GROUP, self.placement.bind_group(), &[]);
        pass.draw_model(&self.model, MATERIAL_GROUP);
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
