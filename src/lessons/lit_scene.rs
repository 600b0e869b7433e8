//! Shared scaffolding of the lighting lessons
//!
//! A [`LitScene`] owns the fly camera, the light block, a material and two
//! sets of cubes: lit objects drawn with `lit.*.wgsl` and small unlit lamps
//! marking the light positions. Lessons differ only in what they place and how
//! they animate the lights.

use std::rc::Rc;

use cgmath::{Deg, EuclideanSpace, InnerSpace, Matrix4, Point3, Vector3};
use winit::event::MouseScrollDelta;

use super::{clear_color, LessonContext};
use crate::{
    error::Result,
    gfx::{
        camera::CameraManager,
        lighting::{LightBindings, LightSet, LIGHTS_GROUP},
        rendering::FrameContext,
        resources::{
            global_bindings::GLOBAL_GROUP, material::MATERIAL_GROUP, GlobalBindings, Material,
            MaterialBindings, MaterialUniform, TextureResource,
        },
        scene::{
            object::{object_layout, OBJECT_GROUP},
            primitives::{self, CUBE_POSITIONS},
            DrawMesh, Mesh, SceneObject,
        },
    },
    input::KeyboardState,
    wgpu_utils::BindGroupLayoutWithDesc,
};

/// Camera start shared by the lighting lessons
pub const LIGHTING_CAMERA_START: Point3<f32> = Point3::new(0.5, 1.0, 4.0);

/// Lamp cubes are a fifth of the size of a lit cube
pub const LAMP_SCALE: f32 = 0.2;

/// Transforms of the ten scattered cubes, each tilted 20 degrees more than the last
pub fn cube_field() -> Vec<Matrix4<f32>> {
    let axis = Vector3::new(1.0, 0.3, 0.5).normalize();
    CUBE_POSITIONS
        .iter()
        .enumerate()
        .map(|(i, position)| {
            Matrix4::from_translation(*position)
                * Matrix4::from_axis_angle(axis, Deg(20.0 * i as f32))
        })
        .collect()
}

pub fn lamp_transform(position: Point3<f32>) -> Matrix4<f32> {
    Matrix4::from_translation(position.to_vec()) * Matrix4::from_scale(LAMP_SCALE)
}

/// Light path of the materials and lighting maps lessons at `time` seconds
pub fn wandering_light(time: f32) -> Point3<f32> {
    Point3::new(1.0 + time.sin() * 2.0, (time / 2.0).sin(), 2.0)
}

/// Where the surface colours of the lit cubes come from
pub enum SurfaceMaps<'a> {
    /// White maps, so colour comes from the material tints alone
    Solid,
    /// Diffuse and specular images under `assets/`
    Files { diffuse: &'a str, specular: &'a str },
}

pub struct LitScene {
    pub camera: CameraManager,
    pub lights: LightSet,
    globals: GlobalBindings,
    light_bindings: LightBindings,
    object_layout: BindGroupLayoutWithDesc,
    lit_pipeline: wgpu::RenderPipeline,
    lamp_pipeline: wgpu::RenderPipeline,
    cube: Mesh,
    material: Material,
    objects: Vec<SceneObject>,
    lamps: Vec<SceneObject>,
    clear: wgpu::Color,
}

impl LitScene {
    pub fn new(
        ctx: &LessonContext<'_>,
        name: &str,
        material: MaterialUniform,
        maps: SurfaceMaps<'_>,
    ) -> Result<Self> {
        let globals = GlobalBindings::new(ctx.device);
        let light_bindings = LightBindings::new(ctx.device);
        let object_layout = object_layout(ctx.device);
        let material_bindings = MaterialBindings::new(ctx.device);

        let lit_pipeline = ctx.program("lit")?.link(
            ctx.device,
            &ctx.pipeline_config(&format!("{name} Lit Pipeline"))
                .with_bind_group_layouts(vec![
                    globals.bind_group_layout().clone(),
                    object_layout.layout.clone(),
                    material_bindings.bind_group_layout().clone(),
                    light_bindings.bind_group_layout().clone(),
                ]),
        )?;
        let lamp_pipeline = ctx.program("lamp")?.link(
            ctx.device,
            &ctx.pipeline_config(&format!("{name} Lamp Pipeline"))
                .with_bind_group_layouts(vec![
                    globals.bind_group_layout().clone(),
                    object_layout.layout.clone(),
                ]),
        )?;

        let (diffuse, specular) = match maps {
            SurfaceMaps::Solid => {
                let white = Rc::new(TextureResource::white(ctx.device, ctx.queue));
                (Rc::clone(&white), white)
            }
            SurfaceMaps::Files { diffuse, specular } => (
                Rc::new(ctx.texture(diffuse)?),
                Rc::new(ctx.texture(specular)?),
            ),
        };
        let material = Material::new(
            ctx.device,
            &material_bindings,
            name,
            material,
            diffuse,
            specular,
        );

        let (vertices, indices) = primitives::cube();
        let mut cube = Mesh::new("cube", vertices, indices, Vec::new());
        cube.upload(ctx.device);

        Ok(Self {
            camera: CameraManager::at(LIGHTING_CAMERA_START),
            lights: LightSet::default(),
            globals,
            light_bindings,
            object_layout,
            lit_pipeline,
            lamp_pipeline,
            cube,
            material,
            objects: Vec::new(),
            lamps: Vec::new(),
            clear: clear_color(0.1, 0.1, 0.1),
        })
    }

    /// Adds a lit cube
    pub fn add_object(&mut self, device: &wgpu::Device, transform: Matrix4<f32>) {
        self.objects
            .push(SceneObject::new(device, &self.object_layout, transform));
    }

    /// Adds the ten scattered cubes
    pub fn add_cube_field(&mut self, device: &wgpu::Device) {
        for transform in cube_field() {
            self.add_object(device, transform);
        }
    }

    /// Adds a lamp marker and returns its index
    pub fn add_lamp(&mut self, device: &wgpu::Device, position: Point3<f32>) -> usize {
        self.lamps.push(SceneObject::new(
            device,
            &self.object_layout,
            lamp_transform(position),
        ));
        self.lamps.len() - 1
    }

    /// Moves a lamp marker; unknown indices are ignored
    pub fn move_lamp(&mut self, index: usize, position: Point3<f32>) {
        if let Some(lamp) = self.lamps.get_mut(index) {
            lamp.transform = lamp_transform(position);
        }
    }

    pub fn set_material(&mut self, queue: &wgpu::Queue, uniform: MaterialUniform) {
        self.material.set_uniform(queue, uniform);
    }

    /// Uploads camera, light and lamp state, then draws lit cubes followed by lamps
    pub fn draw(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        self.globals.update(frame.queue, self.camera.uniform(frame.aspect));
        self.light_bindings.update(frame.queue, &self.lights);
        for lamp in &mut self.lamps {
            lamp.update(frame.queue);
        }

        let mut pass = frame.begin_pass(self.clear);
        pass.set_bind_group(GLOBAL_GROUP, self.globals.bind_group(), &[]);

        pass.set_pipeline(&self.lit_pipeline);
        pass.set_bind_group(MATERIAL_GROUP, self.material.bind_group(), &[]);
        pass.set_bind_group(LIGHTS_GROUP, self.light_bindings.bind_group(), &[]);
        for object in &self.objects {
            pass.set_bind_group(OBJECT_GROUP, object.bind_group(), &[]);
            pass.draw_mesh(&self.cube);
        }

        if !self.lamps.is_empty() {
            pass.set_pipeline(&self.lamp_pipeline);
            for lamp in &self.lamps {
                pass.set_bind_group(OBJECT_GROUP, lamp.bind_group(), &[]);
                pass.draw_mesh(&self.cube);
            }
        }
        Ok(())
    }

    pub fn on_keys(&mut self, keys: &KeyboardState, delta_time: f32) {
        self.camera.process_keys(keys, delta_time);
    }

    pub fn on_mouse_move(&mut self, x: f64, y: f64) {
        self.camera.process_cursor(x, y);
    }

    pub fn on_scroll(&mut self, delta: &MouseScrollDelta) {
        self.camera.process_scroll(delta);
    }

    pub fn on_focus_lost(&mut self) {
        self.camera.reset_cursor();
    }
}

/// Forwards the camera input hooks of a [`Lesson`](super::Lesson) to its `scene` field
macro_rules! delegate_camera_input {
    () => {
        fn on_keys(&mut self, keys: &$crate::input::KeyboardState, delta_time: f32) {
            self.scene.on_keys(keys, delta_time);
        }

        fn on_mouse_move(&mut self, x: f64, y: f64) {
            self.scene.on_mouse_move(x, y);
        }

        fn on_scroll(&mut self, delta: &::winit::event::MouseScrollDelta) {
            self.scene.on_scroll(delta);
        }

        fn on_focus_lost(&mut self) {
            self.scene.on_focus_lost();
        }
    };
}
pub(crate) use delegate_camera_input;
