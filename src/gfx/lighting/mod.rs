//! # Lighting
//!
//! Light descriptors, the CPU reference of the lighting accumulation model and
//! the packed uniform that feeds the same model on the GPU.
//!
//! A fragment is lit by at most one directional light, up to
//! [`MAX_POINT_LIGHTS`] point lights and at most one spot light. Each light adds
//! ambient, diffuse and specular terms; point and spot lights are attenuated by
//! distance and the spot light fades across its cone edge.

pub mod lights;
pub mod lights_uniform;
pub mod shading;

pub use lights::{Attenuation, DirectionalLight, LightColors, PointLight, SpotCone, SpotLight};
pub use lights_uniform::{LightBindings, LightsUniform, LIGHTS_GROUP, MAX_POINT_LIGHTS};
pub use shading::SurfaceSample;

/// The lights affecting a scene
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightSet {
    pub directional: Option<DirectionalLight>,
    pub points: Vec<PointLight>,
    pub spot: Option<SpotLight>,
}
