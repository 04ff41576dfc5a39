//! Math utilities shared by spans, zones, initializers and behaviours.
//!
//! Vector algebra is done with [`glam::Vec3`]. This module adds the pieces the
//! simulation needs on top of it:
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`easing`] | Penner easing curves used for energy decay |
//! | [`color`] | hex/RGB/HSV conversion and random colors |
//! | [`vector`] | axis-angle rotation, vector normals, polar coordinates, random geometry |
//!
//! # Units
//!
//! Forces and velocities are authored in "game units" and converted to
//! simulation units by [`MEASURE`] (a factor of 100), so `Force::new(0.0, -1.0, 0.0)`
//! accelerates particles by 100 units per second squared.

pub mod color;
pub mod easing;
pub mod vector;

pub use color::{hex_to_rgb, hsv_to_rgb, random_color, rgb_to_hex};
pub use easing::Easing;
pub use vector::{euler_rotate, normal_of, rotate_axis_angle, Polar3D};

use rand::rngs::SmallRng;
use rand::Rng;

/// Random source used throughout the simulation.
///
/// Every emitter owns one. Seed it with [`rand::SeedableRng::seed_from_u64`]
/// for reproducible runs.
pub type SimRng = SmallRng;

/// Game-unit to simulation-unit conversion factor for forces and velocities.
pub const MEASURE: f32 = 100.0;

/// Interpolate from `a` (energy 1, birth) to `b` (energy 0, death).
#[inline]
pub fn lerp(a: f32, b: f32, energy: f32) -> f32 {
    b + (a - b) * energy
}

/// Uniform random value in `[a, b]`, floored when `integer` is set.
#[inline]
pub fn random_a_to_b(rng: &mut SimRng, a: f32, b: f32, integer: bool) -> f32 {
    let value = a + rng.gen::<f32>() * (b - a);
    if integer {
        value.floor()
    } else {
        value
    }
}

/// Uniform random value in `[center - spread, center + spread]`.
#[inline]
pub fn random_floating(rng: &mut SimRng, center: f32, spread: f32, integer: bool) -> f32 {
    random_a_to_b(rng, center - spread, center + spread, integer)
}

/// Scale a game-unit quantity into simulation units.
#[inline]
pub fn normalize_value(value: f32) -> f32 {
    value * MEASURE
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(1.0, 0.0, 1.0), 1.0);
        assert_eq!(lerp(1.0, 0.0, 0.0), 0.0);
        assert!((lerp(2.0, 4.0, 0.5) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_random_a_to_b_integer() {
        let mut rng = SimRng::seed_from_u64(3);
        for _ in 0..500 {
            let v = random_a_to_b(&mut rng, 2.0, 9.0, true);
            assert_eq!(v, v.floor());
            assert!((2.0..=9.0).contains(&v));
        }
    }

    #[test]
    fn test_random_floating_range() {
        let mut rng = SimRng::seed_from_u64(4);
        for _ in 0..500 {
            let v = random_floating(&mut rng, 10.0, 2.0, false);
            assert!((8.0..=12.0).contains(&v));
        }
    }
}
