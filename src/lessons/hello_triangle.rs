//! A single triangle given directly in clip space

use super::{clear_color, Lesson, LessonContext};
use crate::{
    error::Result,
    gfx::{
        rendering::FrameContext,
        scene::{primitives, DrawMesh, Mesh},
    },
};

pub struct HelloTriangle {
    pipeline: wgpu::RenderPipeline,
    triangle: Mesh,
}

impl HelloTriangle {
    pub fn new(ctx: &LessonContext<'_>) -> Result<Self> {
        let program = ctx.program("triangle")?;
        let pipeline = program.link(ctx.device, &ctx.pipeline_config("Triangle Pipeline"))?;

        let (vertices, indices) = primitives::triangle();
        let mut triangle = Mesh::new("triangle", vertices, indices, Vec::new());
        triangle.upload(ctx.device);

        Ok(Self { pipeline, triangle })
    }
}

impl Lesson for HelloTriangle {
    fn name(&self) -> &'static str {
        "hello-triangle"
    }

    fn draw(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        let mut pass = frame.begin_pass(clear_color(0.5, 0.5, 0.3));
        pass.set_pipeline(&self.pipeline);
        pass.draw_mesh(&self.triangle);
        Ok(())
    }
}
