//! Solid sphere.

use crate::math::{vector, SimRng};
use crate::particle::KinematicBody;
use glam::Vec3;

/// A solid sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereZone {
    pub center: Vec3,
    pub radius: f32,
}

impl SphereZone {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Uniform point in the volume.
    pub fn sample(&self, rng: &mut SimRng) -> Vec3 {
        self.center + vector::random_in_sphere(rng, self.radius)
    }

    pub fn dead(&self, body: &mut KinematicBody) {
        if body.position.distance(self.center) - body.radius > self.radius {
            body.dead = true;
        }
    }

    /// Clamp to the inner surface and mirror outward velocity.
    pub fn bound(&self, body: &mut KinematicBody) {
        let offset = body.position - self.center;
        let distance = offset.length();
        if distance + body.radius < self.radius {
            return;
        }

        let normal = offset.normalize_or_zero();
        if normal == Vec3::ZERO {
            return;
        }
        let inner = (self.radius - body.radius).max(0.0);
        body.position = self.center + normal * inner;

        let outward = body.velocity.dot(normal);
        if outward > 0.0 {
            body.velocity -= normal * (2.0 * outward);
        }
    }

    /// Move a body that left the sphere to the antipodal surface point.
    pub fn cross(&self, body: &mut KinematicBody) {
        let offset = body.position - self.center;
        if offset.length() - body.radius > self.radius {
            body.position = self.center - offset.normalize_or_zero() * self.radius;
        }
    }
}
