use crate::color::Color;
use crate::vector::Vec3;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LightKind {
    Point,
    Directional,
}

/// A scene light. Point lights use `origin` and leave `direction` unused;
/// directional lights use `direction` (pointing toward the scene) and have
/// no meaningful origin.
#[derive(Debug, Copy, Clone)]
pub struct Light {
    pub origin: Vec3,
    pub direction: Vec3,
    pub color: Color,
    pub intensity: f64,
    pub kind: LightKind,
}

impl Light {
    pub fn point(origin: Vec3, intensity: f64, color: Color) -> Light {
        Light {
            origin,
            direction: Vec3::zero(),
            color,
            intensity,
            kind: LightKind::Point,
        }
    }

    pub fn directional(direction: Vec3, intensity: f64, color: Color) -> Light {
        Light {
            origin: Vec3::zero(),
            direction,
            color,
            intensity,
            kind: LightKind::Directional,
        }
    }

    /// Samples the light from a surface point: returns the unit direction
    /// toward the light, the incident radiance, and the distance to use as
    /// the shadow-ray upper bound. Point lights fall off with the squared
    /// distance; directional lights are unattenuated and effectively
    /// infinitely far, so their shadow rays search the whole ray.
    pub fn illuminate(&self, target: Vec3) -> (Vec3, Color, f64) {
        match self.kind {
            LightKind::Point => {
                let to_light = self.origin - target;
                let distance_squared = to_light.length_squared();
                let distance = distance_squared.sqrt();
                (
                    to_light / distance,
                    self.color * (self.intensity / distance_squared),
                    distance,
                )
            }
            LightKind::Directional => (
                -self.direction.normalize(),
                self.color * self.intensity,
                f64::MAX,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn point_light_direction_and_distance() {
        let light = Light::point(Vec3::new(0.0, 4.0, 0.0), 10.0, Color::white());
        let (l, _, distance) = light.illuminate(Vec3::new(0.0, 1.0, 0.0));
        assert_approx_eq!(l, Vec3::unit_y());
        assert_approx_eq!(distance, 3.0);
    }

    #[test]
    fn point_light_radiance_decays_with_squared_distance() {
        let light = Light::point(Vec3::zero(), 100.0, Color::white());
        let (_, near, _) = light.illuminate(Vec3::new(0.0, 0.0, 2.0));
        let (_, far, _) = light.illuminate(Vec3::new(0.0, 0.0, 4.0));
        assert_approx_eq!(near.r, 25.0);
        assert_approx_eq!(far.r, 6.25);
        assert_approx_eq!(near.r / far.r, 4.0);
    }

    #[test]
    fn directional_light_is_invariant_in_target() {
        let light = Light::directional(Vec3::new(0.0, -1.0, 0.0), 2.0, Color::new(1.0, 0.5, 0.25));
        let (l_a, radiance_a, distance_a) = light.illuminate(Vec3::zero());
        let (l_b, radiance_b, _) = light.illuminate(Vec3::new(100.0, -3.0, 42.0));
        assert_approx_eq!(l_a, Vec3::unit_y());
        assert_approx_eq!(l_a, l_b);
        assert_approx_eq!(radiance_a, radiance_b);
        assert_approx_eq!(radiance_a, Color::new(2.0, 1.0, 0.5));
        assert_eq!(distance_a, f64::MAX);
    }

    #[test]
    fn directional_direction_is_normalized() {
        let light = Light::directional(Vec3::new(0.0, -2.0, 0.0), 1.0, Color::white());
        let (l, _, _) = light.illuminate(Vec3::zero());
        assert_approx_eq!(l.length(), 1.0);
    }
}
