//! The hello triangle again, its colour now fed from a uniform that pulses
//! green over time

use cgmath::{Matrix4, SquareMatrix};

use super::{clear_color, Lesson, LessonContext};
use crate::{
    error::Result,
    gfx::{
        camera::CameraUniform,
        rendering::FrameContext,
        resources::{global_bindings::GLOBAL_GROUP, GlobalBindings},
        scene::{
            object::{object_layout, OBJECT_GROUP},
            primitives, DrawMesh, Mesh, SceneObject,
        },
    },
};

/// Green channel at `time` seconds, swinging between 0 and 1
pub fn pulse_green(time: f32) -> f32 {
    time.sin() / 2.0 + 0.5
}

pub struct Shaders {
    globals: GlobalBindings,
    pipeline: wgpu::RenderPipeline,
    triangle: Mesh,
    placement: SceneObject,
}

impl Shaders {
    pub fn new(ctx: &LessonContext<'_>) -> Result<Self> {
        let globals = GlobalBindings::new(ctx.device);
        let object_layout = object_layout(ctx.device);

        // the lamp program already outputs the object tint unlit
        let pipeline = ctx.program("lamp")?.link(
            ctx.device,
            &ctx.pipeline_config("Uniform Colour Pipeline")
                .with_bind_group_layouts(vec![
                    globals.bind_group_layout().clone(),
                    object_layout.layout.clone(),
                ]),
        )?;

        let (vertices, indices) = primitives::triangle();
        let mut triangle = Mesh::new("triangle", vertices, indices, Vec::new());
        triangle.upload(ctx.device);

        let mut placement = SceneObject::new(ctx.device, &object_layout, Matrix4::identity());
        placement.tint = [0.0, pulse_green(0.0), 0.0, 1.0];

        Ok(Self {
            globals,
            pipeline,
            triangle,
            placement,
        })
    }
}

impl Lesson for Shaders {
    fn name(&self) -> &'static str {
        "shaders"
    }

    fn draw(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        self.globals.update(frame.queue, CameraUniform::default());
        self.placement.tint = [0.0, pulse_green(frame.elapsed), 0.0, 1.0];
        self.placement.update(frame.queue);

        let mut pass = frame.begin_pass(clear_color(0.2, 0.3, 0.3));
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(GLOBAL_GROUP, self.globals.bind_group(), &[]);
        pass.set_bind_group(OBJECT_GROUP, self.placement.bind_group(), &[]);
        pass.draw_mesh(&self.triangle);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_stays_in_unit_range() {
        assert_eq!(pulse_green(0.0), 0.5);
        assert!((pulse_green(std::f32::consts::FRAC_PI_2) - 1.0).abs() < 1e-6);
        for step in 0..100 {
            let green = pulse_green(step as f32 * 0.37);
            assert!((0.0..=1.0).contains(&green));
        }
    }
}
