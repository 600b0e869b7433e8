//! GPU layout of [`LightSet`], matching `struct Lights` in `lit.frag.wgsl`
//!
//! Every field is a `vec4` so the WGSL uniform layout rules add no hidden
//! padding.

use log::warn;

use super::{
    lights::{Attenuation, LightColors},
    LightSet,
};
use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

/// Point-light slots in the uniform
pub const MAX_POINT_LIGHTS: usize = 4;

/// Bind group index of the light block
pub const LIGHTS_GROUP: u32 = 3;

fn vec4(v: cgmath::Vector3<f32>, w: f32) -> [f32; 4] {
    [v.x, v.y, v.z, w]
}

fn attenuation4(attenuation: &Attenuation) -> [f32; 4] {
    [
        attenuation.constant,
        attenuation.linear,
        attenuation.quadratic,
        0.0,
    ]
}

fn colors4(colors: &LightColors) -> [[f32; 4]; 3] {
    [
        vec4(colors.ambient, 1.0),
        vec4(colors.diffuse, 1.0),
        vec4(colors.specular, 1.0),
    ]
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuDirectionalLight {
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuPointLight {
    pub position: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    /// constant, linear, quadratic
    pub attenuation: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuSpotLight {
    pub position: [f32; 4],
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub attenuation: [f32; 4],
    /// inner and outer cutoff cosines
    pub cutoff: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    /// has directional, point count, has spot, unused
    pub counts: [u32; 4],
    pub directional: GpuDirectionalLight,
    pub points: [GpuPointLight; MAX_POINT_LIGHTS],
    pub spot: GpuSpotLight,
}

impl LightSet {
    pub fn to_uniform(&self) -> LightsUniform {
        let mut uniform = LightsUniform::default();

        if let Some(light) = &self.directional {
            let [ambient, diffuse, specular] = colors4(&light.colors);
            uniform.counts[0] = 1;
            uniform.directional = GpuDirectionalLight {
                direction: vec4(light.direction, 0.0),
                ambient,
                diffuse,
                specular,
            };
        }

        if self.points.len() > MAX_POINT_LIGHTS {
            warn!(
                "{} point lights requested, only the first {} are uploaded",
                self.points.len(),
                MAX_POINT_LIGHTS
            );
        }
        let points = self.points.iter().take(MAX_POINT_LIGHTS);
        uniform.counts[1] = points.len() as u32;
        for (slot, light) in uniform.points.iter_mut().zip(points) {
            let [ambient, diffuse, specular] = colors4(&light.colors);
            *slot = GpuPointLight {
                position: [light.position.x, light.position.y, light.position.z, 1.0],
                ambient,
                diffuse,
                specular,
                attenuation: attenuation4(&light.attenuation),
            };
        }

        if let Some(light) = &self.spot {
            let [ambient, diffuse, specular] = colors4(&light.colors);
            uniform.counts[2] = 1;
            uniform.spot = GpuSpotLight {
                position: [light.position.x, light.position.y, light.position.z, 1.0],
                direction: vec4(light.direction, 0.0),
                ambient,
                diffuse,
                specular,
                attenuation: attenuation4(&light.attenuation),
                cutoff: [light.cone.inner_cos(), light.cone.outer_cos(), 0.0, 0.0],
            };
        }

        uniform
    }
}

/// The light block uniform with its layout and bind group
pub struct LightBindings {
    ubo: UniformBuffer<LightsUniform>,
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl LightBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let ubo = UniformBuffer::new_with_data(device, &LightsUniform::default());
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .create(device, "Lights Bind Group Layout");
        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Lights Bind Group");

        Self {
            ubo,
            bind_group_layout,
            bind_group,
        }
    }

    /// Packs and uploads `lights`; unchanged sets are not re-sent
    pub fn update(&mut self, queue: &wgpu::Queue, lights: &LightSet) {
        self.ubo.update_content(queue, lights.to_uniform());
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::lighting::{DirectionalLight, PointLight, SpotCone, SpotLight};
    use cgmath::{Point3, Vector3};

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<GpuDirectionalLight>(), 64);
        assert_eq!(std::mem::size_of::<GpuPointLight>(), 80);
        assert_eq!(std::mem::size_of::<GpuSpotLight>(), 112);
        assert_eq!(std::mem::size_of::<LightsUniform>(), 512);
        assert_eq!(std::mem::size_of::<LightsUniform>() % 16, 0);
    }

    #[test]
    fn test_empty_set_has_no_lights() {
        let uniform = LightSet::default().to_uniform();
        assert_eq!(uniform.counts, [0, 0, 0, 0]);
    }

    #[test]
    fn test_packs_every_light_kind() {
        let lights = LightSet {
            directional: Some(DirectionalLight::new(
                Vector3::new(-0.2, -1.0, -0.3),
                LightColors::grey(0.05, 0.4, 0.5),
            )),
            points: vec![PointLight::new(
                Point3::new(0.7, 0.2, 2.0),
                LightColors::grey(0.05, 0.8, 1.0),
                Attenuation::RANGE_50,
            )],
            spot: Some(SpotLight::new(
                Point3::new(0.0, 0.0, 3.0),
                -Vector3::unit_z(),
                SpotCone::from_degrees(12.5, 15.0).unwrap(),
                LightColors::grey(0.0, 1.0, 1.0),
                Attenuation::RANGE_50,
            )),
        };

        let uniform = lights.to_uniform();
        assert_eq!(uniform.counts, [1, 1, 1, 0]);
        assert_eq!(uniform.directional.direction, [-0.2, -1.0, -0.3, 0.0]);
        assert_eq!(uniform.points[0].position, [0.7, 0.2, 2.0, 1.0]);
        assert_eq!(uniform.points[0].attenuation, [1.0, 0.09, 0.032, 0.0]);
        assert_eq!(uniform.points[1].position, [0.0; 4]);
        assert_eq!(uniform.spot.direction, [0.0, 0.0, -1.0, 0.0]);
        assert!(uniform.spot.cutoff[0] > uniform.spot.cutoff[1]);
    }

    #[test]
    fn test_extra_point_lights_are_dropped() {
        let light = PointLight::new(
            Point3::new(1.0, 1.0, 1.0),
            LightColors::grey(0.1, 0.5, 1.0),
            Attenuation::NONE,
        );
        let lights = LightSet {
            points: vec![light; MAX_POINT_LIGHTS + 2],
            ..LightSet::default()
        };
        assert_eq!(lights.to_uniform().counts[1], MAX_POINT_LIGHTS as u32);
    }
}
