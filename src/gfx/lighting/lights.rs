use cgmath::{InnerSpace, Point3, Vector3};

use crate::error::{LanternError, Result};

/// Ambient, diffuse and specular colour of a light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightColors {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
}

impl LightColors {
    pub fn new(ambient: Vector3<f32>, diffuse: Vector3<f32>, specular: Vector3<f32>) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
        }
    }

    /// Grey levels for each term, the usual way lessons describe white lights
    pub fn grey(ambient: f32, diffuse: f32, specular: f32) -> Self {
        Self::new(
            Vector3::new(ambient, ambient, ambient),
            Vector3::new(diffuse, diffuse, diffuse),
            Vector3::new(specular, specular, specular),
        )
    }
}

/// Distance falloff `1 / (constant + linear * d + quadratic * d^2)`
///
/// `constant` must be positive so the denominator never reaches zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Attenuation {
    /// No falloff at any distance
    pub const NONE: Self = Self::new(1.0, 0.0, 0.0);

    /// Falloff reaching roughly 50 units
    pub const RANGE_50: Self = Self::new(1.0, 0.09, 0.032);

    pub const fn new(constant: f32, linear: f32, quadratic: f32) -> Self {
        Self {
            constant,
            linear,
            quadratic,
        }
    }

    pub fn factor(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

impl Default for Attenuation {
    fn default() -> Self {
        Self::NONE
    }
}

/// Spot light cone, stored as cosines of the inner and outer half-angles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotCone {
    inner_cos: f32,
    outer_cos: f32,
}

impl SpotCone {
    /// Builds a cone from half-angles in degrees. The outer angle may not be
    /// smaller than the inner one.
    pub fn from_degrees(inner_deg: f32, outer_deg: f32) -> Result<Self> {
        if outer_deg < inner_deg {
            return Err(LanternError::InvalidSpotCone {
                inner_deg,
                outer_deg,
            });
        }
        Ok(Self {
            inner_cos: inner_deg.to_radians().cos(),
            outer_cos: outer_deg.to_radians().cos(),
        })
    }

    pub fn inner_cos(&self) -> f32 {
        self.inner_cos
    }

    pub fn outer_cos(&self) -> f32 {
        self.outer_cos
    }

    /// Edge fade for a fragment whose direction from the light has cosine
    /// `theta` with the spot axis: 1 inside the inner cone, 0 outside the outer
    /// cone and linear in between.
    pub fn intensity(&self, theta: f32) -> f32 {
        let epsilon = self.inner_cos - self.outer_cos;
        if epsilon <= 0.0 {
            // zero-width edge
            return if theta >= self.outer_cos { 1.0 } else { 0.0 };
        }
        ((theta - self.outer_cos) / epsilon).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels in
    pub direction: Vector3<f32>,
    pub colors: LightColors,
}

impl DirectionalLight {
    pub fn new(direction: Vector3<f32>, colors: LightColors) -> Self {
        Self { direction, colors }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Point3<f32>,
    pub colors: LightColors,
    pub attenuation: Attenuation,
}

impl PointLight {
    pub fn new(position: Point3<f32>, colors: LightColors, attenuation: Attenuation) -> Self {
        Self {
            position,
            colors,
            attenuation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub position: Point3<f32>,
    /// Axis of the cone, pointing away from the light
    pub direction: Vector3<f32>,
    pub cone: SpotCone,
    pub colors: LightColors,
    pub attenuation: Attenuation,
}

impl SpotLight {
    pub fn new(
        position: Point3<f32>,
        direction: Vector3<f32>,
        cone: SpotCone,
        colors: LightColors,
        attenuation: Attenuation,
    ) -> Self {
        Self {
            position,
            direction,
            cone,
            colors,
            attenuation,
        }
    }

    /// Moves the light to `position` facing `direction`, the flashlight case
    pub fn follow(&mut self, position: Point3<f32>, direction: Vector3<f32>) {
        self.position = position;
        self.direction = direction.normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_cone_is_rejected() {
        let err = SpotCone::from_degrees(17.5, 12.5).unwrap_err();
        assert!(matches!(
            err,
            LanternError::InvalidSpotCone { inner_deg, outer_deg } if inner_deg == 17.5 && outer_deg == 12.5
        ));
    }

    #[test]
    fn test_cone_cosines() {
        let cone = SpotCone::from_degrees(12.5, 17.5).unwrap();
        assert!(cone.outer_cos() <= cone.inner_cos());
        assert!((cone.inner_cos() - 12.5f32.to_radians().cos()).abs() < 1e-6);
    }

    #[test]
    fn test_intensity_on_axis_and_outside() {
        let cone = SpotCone::from_degrees(12.5, 17.5).unwrap();
        assert_eq!(cone.intensity(1.0), 1.0);
        assert_eq!(cone.intensity(20.0f32.to_radians().cos()), 0.0);
        assert_eq!(cone.intensity(-1.0), 0.0);
    }

    #[test]
    fn test_intensity_fades_between_cones() {
        let cone = SpotCone::from_degrees(12.5, 17.5).unwrap();
        let mut previous = 1.0;
        for step in 0..=10 {
            let angle = 12.5 + step as f32 * 0.5;
            let intensity = cone.intensity(angle.to_radians().cos());
            assert!((0.0..=1.0).contains(&intensity));
            assert!(intensity <= previous + 1e-6);
            previous = intensity;
        }
        let midway = cone.intensity((cone.inner_cos() + cone.outer_cos()) / 2.0);
        assert!((midway - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_zero_width_cone_is_hard_edge() {
        let cone = SpotCone::from_degrees(15.0, 15.0).unwrap();
        assert_eq!(cone.intensity(10.0f32.to_radians().cos()), 1.0);
        assert_eq!(cone.intensity(15.0f32.to_radians().cos()), 1.0);
        assert_eq!(cone.intensity(16.0f32.to_radians().cos()), 0.0);
    }

    #[test]
    fn test_attenuation_decreases_with_distance() {
        let attenuation = Attenuation::RANGE_50;
        assert_eq!(attenuation.factor(0.0), 1.0);

        let mut previous = attenuation.factor(0.0);
        for step in 1..500 {
            let factor = attenuation.factor(step as f32 * 0.1);
            assert!(factor < previous, "not decreasing at {}", step);
            assert!(factor > 0.0);
            previous = factor;
        }
    }

    #[test]
    fn test_no_attenuation() {
        assert_eq!(Attenuation::NONE.factor(1000.0), 1.0);
    }
}
