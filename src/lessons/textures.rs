//! Two images blended on a quad, no lighting
//!
//! The container image goes in the material's diffuse slot and the face in the
//! specular slot; `textured.frag.wgsl` mixes them 80/20.

use std::rc::Rc;

use cgmath::{Matrix4, SquareMatrix};

use super::{clear_color, Lesson, LessonContext};
use crate::{
    error::Result,
    gfx::{
        camera::CameraUniform,
        rendering::FrameContext,
        resources::{
            global_bindings::GLOBAL_GROUP, material::MATERIAL_GROUP, GlobalBindings, Material,
            MaterialBindings, MaterialUniform,
        },
        scene::{
            object::{object_layout, OBJECT_GROUP},
            primitives, DrawMesh, Mesh, SceneObject,
        },
    },
    wgpu_utils::BindGroupLayoutWithDesc,
};

const MIX: f32 = 0.2;

/// The pipeline and resources shared by the blended-texture lessons
pub(crate) struct MixedTextures {
    pub globals: GlobalBindings,
    pub object_layout: BindGroupLayoutWithDesc,
    pub pipeline: wgpu::RenderPipeline,
    pub material: Material,
}

impl MixedTextures {
    pub fn new(ctx: &LessonContext<'_>, label: &str) -> Result<Self> {
        let globals = GlobalBindings::new(ctx.device);
        let object_layout = object_layout(ctx.device);
        let material_bindings = MaterialBindings::new(ctx.device);

        let program = ctx.program("textured")?;
        let pipeline = program.link(
            ctx.device,
            &ctx.pipeline_config(label).with_bind_group_layouts(vec![
                globals.bind_group_layout().clone(),
                object_layout.layout.clone(),
                material_bindings.bind_group_layout().clone(),
            ]),
        )?;

        let container = Rc::new(ctx.texture("container.png")?);
        let face = Rc::new(ctx.texture("face.png")?);
        let material = Material::new(
            ctx.device,
            &material_bindings,
            "container and face",
            MaterialUniform::textured().with_mix(MIX),
            container,
            face,
        );

        Ok(Self {
            globals,
            object_layout,
            pipeline,
            material,
        })
    }
}

pub struct Textures {
    shared: MixedTextures,
    quad: Mesh,
    placement: SceneObject,
}

impl Textures {
    pub fn new(ctx: &LessonContext<'_>) -> Result<Self> {
        let shared = MixedTextures::new(ctx, "Textured Quad Pipeline")?;

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

impl Lesson for Textures {
    fn name(&self) -> &'static str {
        "textures"
    }

    fn draw(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        // no camera: positions are already in clip space
        self.shared.globals.update(frame.queue, CameraUniform::default());

        let mut pass = frame.begin_pass(clear_color(0.2, 0.3, 0.3));
        pass.set_pipeline(&self.shared.pipeline);
        pass.set_bind_group(GLOBAL_GROUP, self.shared.globals.bind_group(), &[]);
        pass.set_bind_group(OBJECT_GROUP, self.placement.bind_group(), &[]);
        pass.set_bind_group(MATERIAL_GROUP, self.shared.material.bind_group(), &[]);
        pass.draw_mesh(&self.quad);
        Ok(())
    }
}
