//! Surface materials
//!
//! A material is a diffuse map, a specular map, a shared sampler and a small
//! uniform with tints and the Phong exponent. Constant-colour surfaces use
//! white 1x1 maps and carry their colour in the tints.

use std::rc::Rc;

use crate::{
    gfx::resources::texture_resource::TextureResource,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Bind group index of material data
pub const MATERIAL_GROUP: u32 = 2;

/// GPU uniform data for materials
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    /// Multiplied with the diffuse map sample
    pub diffuse_tint: [f32; 4],
    /// Multiplied with the specular map sample
    pub specular_tint: [f32; 4],
    /// x: shininess, y: blend factor between the two maps (unlit texture lesson)
    pub params: [f32; 4],
}

impl MaterialUniform {
    pub const DEFAULT_SHININESS: f32 = 32.0;

    pub fn new(diffuse: [f32; 3]) -> Self {
        Self {
            diffuse_tint: [diffuse[0], diffuse[1], diffuse[2], 1.0],
            specular_tint: [1.0; 4],
            params: [Self::DEFAULT_SHININESS, 0.0, 0.0, 0.0],
        }
    }

    /// Untinted material, colours come from the maps alone
    pub fn textured() -> Self {
        Self::new([1.0, 1.0, 1.0])
    }

    pub fn with_specular(mut self, specular: [f32; 3]) -> Self {
        self.specular_tint = [specular[0], specular[1], specular[2], 1.0];
        self
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.params[0] = shininess;
        self
    }

    pub fn with_mix(mut self, mix: f32) -> Self {
        self.params[1] = mix.clamp(0.0, 1.0);
        self
    }

    pub fn shininess(&self) -> f32 {
        self.params[0]
    }
}

impl Default for MaterialUniform {
    fn default() -> Self {
        Self::textured()
    }
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Bind group layout shared by every material
pub struct MaterialBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
}

impl MaterialBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::texture_2d()) // diffuse map
            .next_binding_fragment(binding_types::texture_2d()) // specular map
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
            .next_binding_fragment(binding_types::uniform())
            .create(device, "Material Bind Group Layout");

        MaterialBindings { bind_group_layout }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }
}

pub struct Material {
    pub name: String,
    uniform: MaterialUniform,
    ubo: MaterialUBO,
    bind_group: wgpu::BindGroup,
    diffuse: Rc<TextureResource>,
    specular: Rc<TextureResource>,
}

impl Material {
    /// Creates the material's uniform buffer and bind group. Both maps are
    /// sampled with the diffuse map's sampler.
    pub fn new(
        device: &wgpu::Device,
        bindings: &MaterialBindings,
        name: &str,
        uniform: MaterialUniform,
        diffuse: Rc<TextureResource>,
        specular: Rc<TextureResource>,
    ) -> Self {
        let ubo = MaterialUBO::new_with_data(device, &uniform);
        let bind_group = BindGroupBuilder::new(&bindings.bind_group_layout)
            .texture(&diffuse.view)
            .texture(&specular.view)
            .sampler(&diffuse.sampler)
            .resource(ubo.binding_resource())
            .create(device, &format!("Material Bind Group: {}", name));

        Self {
            name: name.to_string(),
            uniform,
            ubo,
            bind_group,
            diffuse,
            specular,
        }
    }

    pub fn uniform(&self) -> &MaterialUniform {
        &self.uniform
    }

    pub fn set_uniform(&mut self, queue: &wgpu::Queue, uniform: MaterialUniform) {
        self.uniform = uniform;
        self.ubo.update_content(queue, uniform);
    }

    pub fn diffuse_map(&self) -> &TextureResource {
        &self.diffuse
    }

    pub fn specular_map(&self) -> &TextureResource {
        &self.specular
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
        assert_eq!(std::mem::size_of::<MaterialUniform>(), 48);
    }

    #[test]
    fn test_builder() {
        let uniform = MaterialUniform::new([1.0, 0.5, 0.31])
            .with_specular([0.5, 0.5, 0.5])
            .with_shininess(64.0)
            .with_mix(1.5);
        assert_eq!(uniform.diffuse_tint, [1.0, 0.5, 0.31, 1.0]);
        assert_eq!(uniform.specular_tint, [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(uniform.shininess(), 64.0);
        assert_eq!(uniform.params[1], 1.0);
    }

    #[test]
    fn test_textured_default_is_untinted() {
        let uniform = MaterialUniform::default();
        assert_eq!(uniform.diffuse_tint, [1.0; 4]);
        assert_eq!(uniform.specular_tint, [1.0; 4]);
        assert_eq!(uniform.shininess(), MaterialUniform::DEFAULT_SHININESS);
    }
}
