//! CPU reference of the per-fragment Phong accumulation in `lit.frag.wgsl`

use cgmath::{ElementWise, InnerSpace, Point3, Vector3, Zero};

use super::lights::{DirectionalLight, LightColors, PointLight, SpotLight};
use super::LightSet;

/// Everything the lighting model needs to know about one fragment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    pub position: Point3<f32>,
    /// Unit surface normal
    pub normal: Vector3<f32>,
    /// Unit vector from the fragment toward the camera
    pub view_dir: Vector3<f32>,
    /// Diffuse map sample or constant colour
    pub diffuse: Vector3<f32>,
    /// Specular map sample or constant colour
    pub specular: Vector3<f32>,
    /// Phong exponent, must be positive
    pub shininess: f32,
}

pub fn reflect(incident: Vector3<f32>, normal: Vector3<f32>) -> Vector3<f32> {
    incident - normal * (2.0 * normal.dot(incident))
}

/// Lambert term for unit normal `n` and unit direction toward the light `l`
pub fn diffuse_factor(n: Vector3<f32>, l: Vector3<f32>) -> f32 {
    n.dot(l).max(0.0)
}

/// Phong specular term for unit view direction `v`
pub fn specular_factor(n: Vector3<f32>, l: Vector3<f32>, v: Vector3<f32>, shininess: f32) -> f32 {
    let reflect_dir = reflect(-l, n);
    v.dot(reflect_dir).max(0.0).powf(shininess)
}

/// Ambient, diffuse and specular terms of one light. `attenuation` scales all
/// three, `intensity` only the direct terms.
fn contribution(
    colors: &LightColors,
    light_dir: Vector3<f32>,
    attenuation: f32,
    intensity: f32,
    sample: &SurfaceSample,
) -> Vector3<f32> {
    let ambient = colors.ambient.mul_element_wise(sample.diffuse);
    let diffuse = colors.diffuse.mul_element_wise(sample.diffuse)
        * diffuse_factor(sample.normal, light_dir);
    let specular = colors.specular.mul_element_wise(sample.specular)
        * specular_factor(sample.normal, light_dir, sample.view_dir, sample.shininess);

    ambient * attenuation + (diffuse + specular) * (attenuation * intensity)
}

impl DirectionalLight {
    pub fn shade(&self, sample: &SurfaceSample) -> Vector3<f32> {
        let light_dir = (-self.direction).normalize();
        contribution(&self.colors, light_dir, 1.0, 1.0, sample)
    }
}

impl PointLight {
    pub fn shade(&self, sample: &SurfaceSample) -> Vector3<f32> {
        let to_light = self.position - sample.position;
        let attenuation = self.attenuation.factor(to_light.magnitude());
        contribution(&self.colors, to_light.normalize(), attenuation, 1.0, sample)
    }
}

impl SpotLight {
    pub fn shade(&self, sample: &SurfaceSample) -> Vector3<f32> {
        let to_light = self.position - sample.position;
        let light_dir = to_light.normalize();
        let theta = (-light_dir).dot(self.direction.normalize());
        let intensity = self.cone.intensity(theta);
        let attenuation = self.attenuation.factor(to_light.magnitude());
        contribution(&self.colors, light_dir, attenuation, intensity, sample)
    }
}

impl LightSet {
    /// Total outgoing colour of `sample` under every light in the set
    pub fn shade(&self, sample: &SurfaceSample) -> Vector3<f32> {
        let mut color = Vector3::zero();
        if let Some(directional) = &self.directional {
            color += directional.shade(sample);
        }
        for point in &self.points {
            color += point.shade(sample);
        }
        if let Some(spot) = &self.spot {
            color += spot.shade(sample);
        }
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::lighting::{Attenuation, SpotCone};

    const EPS: f32 = 1e-5;

    fn white_sample() -> SurfaceSample {
        SurfaceSample {
            position: Point3::new(0.0, 0.0, 0.0),
            normal: Vector3::unit_y(),
            view_dir: Vector3::unit_y(),
            diffuse: Vector3::new(1.0, 1.0, 1.0),
            specular: Vector3::new(1.0, 1.0, 1.0),
            shininess: 32.0,
        }
    }

    fn assert_color_eq(actual: Vector3<f32>, expected: Vector3<f32>) {
        assert!(
            (actual - expected).magnitude() < EPS,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_overhead_directional_light_is_full_diffuse() {
        let down = Vector3::new(0.0, -1.0, 0.0);
        let n = Vector3::unit_y();
        assert_eq!(diffuse_factor(n, -down), 1.0);

        let light = DirectionalLight::new(down, LightColors::grey(0.0, 1.0, 0.0));
        assert_color_eq(light.shade(&white_sample()), Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_light_behind_surface_leaves_ambient() {
        let light = DirectionalLight::new(Vector3::unit_y(), LightColors::grey(0.1, 1.0, 1.0));
        assert_color_eq(light.shade(&white_sample()), Vector3::new(0.1, 0.1, 0.1));
    }

    #[test]
    fn test_specular_peaks_on_mirror_direction() {
        let n = Vector3::unit_y();
        let l = Vector3::new(1.0, 1.0, 0.0).normalize();
        let mirror = Vector3::new(-1.0, 1.0, 0.0).normalize();
        assert!((specular_factor(n, l, mirror, 32.0) - 1.0).abs() < EPS);
        assert!(specular_factor(n, l, l, 32.0) < EPS);
    }

    #[test]
    fn test_reflect() {
        let reflected = reflect(Vector3::new(1.0, -1.0, 0.0), Vector3::unit_y());
        assert_color_eq(reflected, Vector3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_black_lights_contribute_nothing() {
        let cone = SpotCone::from_degrees(12.5, 17.5).unwrap();
        let black = LightColors::grey(0.0, 0.0, 0.0);
        let lights = LightSet {
            directional: Some(DirectionalLight::new(
                Vector3::new(-0.2, -1.0, -0.3),
                black,
            )),
            points: vec![PointLight::new(
                Point3::new(0.0, 1.0, 0.0),
                black,
                Attenuation::RANGE_50,
            )],
            spot: Some(SpotLight::new(
                Point3::new(0.0, 2.0, 0.0),
                -Vector3::unit_y(),
                cone,
                black,
                Attenuation::RANGE_50,
            )),
        };
        assert_eq!(lights.shade(&white_sample()), Vector3::zero());
    }

    #[test]
    fn test_point_light_is_attenuated() {
        let near = PointLight::new(
            Point3::new(0.0, 1.0, 0.0),
            LightColors::grey(0.0, 1.0, 0.0),
            Attenuation::RANGE_50,
        );
        let far = PointLight {
            position: Point3::new(0.0, 10.0, 0.0),
            ..near
        };
        let sample = white_sample();
        let expected = Attenuation::RANGE_50.factor(1.0);
        assert_color_eq(near.shade(&sample), Vector3::new(expected, expected, expected));
        assert!(far.shade(&sample).x < near.shade(&sample).x);
    }

    #[test]
    fn test_spot_cuts_off_outside_cone_but_keeps_ambient() {
        let cone = SpotCone::from_degrees(12.5, 17.5).unwrap();
        let mut spot = SpotLight::new(
            Point3::new(0.0, 2.0, 0.0),
            -Vector3::unit_y(),
            cone,
            LightColors::grey(0.2, 1.0, 1.0),
            Attenuation::NONE,
        );

        let lit = spot.shade(&white_sample());
        assert!(lit.x > 1.0);

        // aim 90 degrees away from the fragment
        spot.follow(spot.position, Vector3::unit_x());
        assert_color_eq(spot.shade(&white_sample()), Vector3::new(0.2, 0.2, 0.2));
    }

    #[test]
    fn test_accumulation_is_order_independent() {
        let colors = LightColors::grey(0.05, 0.8, 1.0);
        let points: Vec<PointLight> = [
            Point3::new(0.7, 0.2, 2.0),
            Point3::new(2.3, -3.3, -4.0),
            Point3::new(-4.0, 2.0, -12.0),
            Point3::new(0.0, 0.0, -3.0),
        ]
        .into_iter()
        .map(|position| PointLight::new(position, colors, Attenuation::RANGE_50))
        .collect();

        let sample = SurfaceSample {
            position: Point3::new(0.3, -0.5, -1.0),
            normal: Vector3::new(0.2, 1.0, 0.4).normalize(),
            view_dir: Vector3::new(0.0, 0.3, 1.0).normalize(),
            ..white_sample()
        };

        let forward = LightSet {
            points: points.clone(),
            ..LightSet::default()
        };
        let mut reversed_points = points;
        reversed_points.reverse();
        let reversed = LightSet {
            points: reversed_points,
            ..LightSet::default()
        };

        assert_color_eq(forward.shade(&sample), reversed.shade(&sample));
    }

    #[test]
    fn test_empty_set_is_black() {
        assert_eq!(LightSet::default().shade(&white_sample()), Vector3::zero());
    }
}
