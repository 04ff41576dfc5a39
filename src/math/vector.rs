//! Vector helpers on top of `glam`.
//!
//! Rotation helpers, the polar coordinate type used by velocity initializers,
//! and random geometry used by zones.

use super::SimRng;
use glam::{EulerRot, Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// A vector perpendicular to `v`.
///
/// Used as the tilt axis when scattering a direction inside a cone.
pub fn normal_of(v: Vec3) -> Vec3 {
    if v.x == 0.0 {
        Vec3::X
    } else {
        Vec3::new(v.y, -v.x, 0.0).normalize_or_zero()
    }
}

/// Rotate `v` about `axis` by `angle` radians (right-handed).
///
/// A zero-length axis leaves `v` unchanged.
pub fn rotate_axis_angle(v: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    let axis = axis.normalize_or_zero();
    if axis == Vec3::ZERO {
        return v;
    }
    Quat::from_axis_angle(axis, angle) * v
}

/// Rotate `v` by Euler angles (radians, XYZ order).
pub fn euler_rotate(v: Vec3, rotation: Vec3) -> Vec3 {
    if rotation == Vec3::ZERO {
        return v;
    }
    Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z) * v
}

/// Spherical coordinates: `radius`, polar angle `theta`, azimuth `phi` (radians).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Polar3D {
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl Polar3D {
    pub fn new(radius: f32, theta: f32, phi: f32) -> Self {
        Self { radius, theta, phi }
    }

    /// Cartesian form. The azimuth runs clockwise when viewed from +Z.
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(
            self.radius * self.theta.sin() * self.phi.cos(),
            -self.radius * self.theta.sin() * self.phi.sin(),
            self.radius * self.theta.cos(),
        )
    }

    /// Same direction with unit radius.
    pub fn normalize(self) -> Self {
        Self {
            radius: 1.0,
            ..self
        }
    }
}

// ========== Random geometry ==========

/// Random point inside a sphere of given radius, centered at origin.
///
/// Distribution is uniform throughout the volume.
pub fn random_in_sphere(rng: &mut SimRng, radius: f32) -> Vec3 {
    let direction = random_direction(rng);
    // Cube root for uniform volume distribution
    direction * radius * rng.gen::<f32>().cbrt()
}

/// Random point on the surface of a sphere of given radius.
pub fn random_on_sphere(rng: &mut SimRng, radius: f32) -> Vec3 {
    random_direction(rng) * radius
}

/// Random unit vector (uniformly distributed on the unit sphere).
pub fn random_direction(rng: &mut SimRng) -> Vec3 {
    let theta = rng.gen_range(0.0..TAU);
    let cos_phi: f32 = rng.gen_range(-1.0..=1.0);
    let sin_phi = (1.0 - cos_phi * cos_phi).max(0.0).sqrt();
    Vec3::new(sin_phi * theta.cos(), sin_phi * theta.sin(), cos_phi)
}

/// Random angle in `[0, 2π)`.
#[inline]
pub fn random_angle(rng: &mut SimRng) -> f32 {
    rng.gen::<f32>() * 2.0 * PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_normal_is_perpendicular() {
        for v in [Vec3::X, Vec3::Y, Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, 5.0)] {
            let n = normal_of(v);
            assert!(n.dot(v).abs() < 1e-5, "{v:?}");
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_rotate_axis_angle_quarter_turn() {
        let r = rotate_axis_angle(Vec3::X, Vec3::Z, PI / 2.0);
        assert!((r - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_rotate_about_zero_axis_is_identity() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(rotate_axis_angle(v, Vec3::ZERO, 1.0), v);
    }

    #[test]
    fn test_polar_to_vec3() {
        let up = Polar3D::new(2.0, 0.0, 0.0).to_vec3();
        assert!((up - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);

        let side = Polar3D::new(1.0, PI / 2.0, 0.0).to_vec3();
        assert!((side - Vec3::X).length() < 1e-5);
        assert_eq!(Polar3D::new(5.0, 1.0, 2.0).normalize().radius, 1.0);
    }

    #[test]
    fn test_random_in_sphere_bounds() {
        let mut rng = SimRng::seed_from_u64(1);
        for _ in 0..200 {
            let pos = random_in_sphere(&mut rng, 0.5);
            assert!(pos.length() <= 0.5 + 0.001);
        }
    }

    #[test]
    fn test_random_direction_is_unit() {
        let mut rng = SimRng::seed_from_u64(2);
        for _ in 0..200 {
            assert!((random_direction(&mut rng).length() - 1.0).abs() < 1e-4);
        }
    }
}
