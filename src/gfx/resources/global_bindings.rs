//! Global uniform bindings for camera data
//!
//! Holds the per-frame view, projection and eye position shared by every draw
//! in a lesson. Bound to group 0 in all render pipelines.

use crate::{
    gfx::camera::camera_utils::CameraUniform,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Bind group index of the global uniforms
pub const GLOBAL_GROUP: u32 = 0;

pub type GlobalUBO = UniformBuffer<CameraUniform>;

/// Uploads this frame's camera state
pub fn update_global_ubo(ubo: &mut GlobalUBO, queue: &wgpu::Queue, camera: CameraUniform) {
    ubo.update_content(queue, camera);
}

pub fn global_layout(device: &wgpu::Device) -> BindGroupLayoutWithDesc {
    BindGroupLayoutBuilder::new()
        .next_binding_rendering(binding_types::uniform())
        .create(device, "Globals Bind Group Layout")
}

/// The global uniform buffer together with its layout and bind group
pub struct GlobalBindings {
    ubo: GlobalUBO,
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let ubo = GlobalUBO::new_with_data(device, &CameraUniform::default());
        let bind_group_layout = global_layout(device);
        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Global Bind Group");

        GlobalBindings {
            ubo,
            bind_group_layout,
            bind_group,
        }
    }

    pub fn update(&mut self, queue: &wgpu::Queue, camera: CameraUniform) {
        update_global_ubo(&mut self.ubo, queue, camera);
    }

    /// Used when creating render pipelines that read the global uniforms
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
