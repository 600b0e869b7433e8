use cgmath::{Matrix, Matrix4, SquareMatrix};

use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

/// Bind group index of per-object data
pub const OBJECT_GROUP: u32 = 1;

/// Per-draw transform, normal matrix and flat tint
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of the model matrix, for transforming normals
    pub normal_matrix: [[f32; 4]; 4],
    pub tint: [f32; 4],
}

impl ObjectUniform {
    pub fn new(model: Matrix4<f32>, tint: [f32; 4]) -> Self {
        let normal_matrix = model
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix4::identity);
        Self {
            model: model.into(),
            normal_matrix: normal_matrix.into(),
            tint,
        }
    }
}

pub fn object_layout(device: &wgpu::Device) -> BindGroupLayoutWithDesc {
    BindGroupLayoutBuilder::new()
        .next_binding_rendering(binding_types::uniform())
        .create(device, "Object Bind Group Layout")
}

/// A drawable placement: transform and tint with their uniform buffer
pub struct SceneObject {
    pub transform: Matrix4<f32>,
    pub tint: [f32; 4],
    ubo: UniformBuffer<ObjectUniform>,
    bind_group: wgpu::BindGroup,
}

impl SceneObject {
    pub fn new(
        device: &wgpu::Device,
        layout: &BindGroupLayoutWithDesc,
        transform: Matrix4<f32>,
    ) -> Self {
        let tint = [1.0; 4];
        let ubo = UniformBuffer::new_with_data(device, &ObjectUniform::new(transform, tint));
        let bind_group = BindGroupBuilder::new(layout)
            .resource(ubo.binding_resource())
            .create(device, "Object Bind Group");
        Self {
            transform,
            tint,
            ubo,
            bind_group,
        }
    }

    pub fn uniform(&self) -> ObjectUniform {
        ObjectUniform::new(self.transform, self.tint)
    }

    /// Sync the transform and tint to the GPU
    pub fn update(&mut self, queue: &wgpu::Queue) {
        let uniform = self.uniform();
        self.ubo.update_content(queue, uniform);
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 144);
    }

    #[test]
    fn test_normal_matrix_undoes_nonuniform_scale() {
        let model = Matrix4::from_nonuniform_scale(2.0, 1.0, 1.0);
        let uniform = ObjectUniform::new(model, [1.0; 4]);
        assert_eq!(uniform.normal_matrix[0][0], 0.5);
        assert_eq!(uniform.normal_matrix[1][1], 1.0);
    }

    #[test]
    fn test_singular_model_falls_back_to_identity() {
        let uniform = ObjectUniform::new(Matrix4::from_scale(0.0), [1.0; 4]);
        let identity: [[f32; 4]; 4] = Matrix4::identity().into();
        assert_eq!(uniform.normal_matrix, identity);
    }
}
