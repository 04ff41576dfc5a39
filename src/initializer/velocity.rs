//! Cone-scattered initial velocity.
//!
//! All three velocity initializers reduce to a direction, a speed and a cone
//! half-angle `theta` (degrees). The base velocity `direction * speed * 100` is
//! tilted away from the axis by a random angle in `[0, theta]`, then spun
//! around the axis by a random angle in `[0, 2π)`.

use crate::math::{vector, Polar3D, SimRng, MEASURE};
use crate::span::Span;
use glam::Vec3;
use rand::Rng;

/// Where direction and speed come from.
#[derive(Clone, Debug, PartialEq)]
pub enum VelocityKind {
    /// Direction and speed from spherical coordinates.
    Polar(Polar3D),
    /// Fixed direction, sampled speed.
    Radial { speed: Span, direction: Vec3 },
    /// Direction and speed from a vector.
    Vector(Vec3),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Velocity {
    pub kind: VelocityKind,
    /// Cone half-angle in degrees.
    pub theta: f32,
}

impl Velocity {
    pub fn new(kind: VelocityKind, theta: f32) -> Self {
        Self { kind, theta }
    }

    pub fn sample(&self, rng: &mut SimRng) -> Vec3 {
        let (direction, speed) = match &self.kind {
            VelocityKind::Polar(polar) => (polar.normalize().to_vec3(), polar.radius),
            VelocityKind::Radial { speed, direction } => {
                (direction.normalize_or_zero(), speed.value(rng))
            }
            VelocityKind::Vector(v) => (v.normalize_or_zero(), v.length()),
        };
        scatter(direction, speed, self.theta, rng)
    }
}

fn scatter(direction: Vec3, speed: f32, theta: f32, rng: &mut SimRng) -> Vec3 {
    let tilt = theta.to_radians() * rng.gen::<f32>();
    let base = direction * speed * MEASURE;
    let tilted = vector::rotate_axis_angle(base, vector::normal_of(direction), tilt);
    vector::rotate_axis_angle(tilted, direction, vector::random_angle(rng))
}
