//! Axis-aligned box.

use crate::math::SimRng;
use crate::particle::KinematicBody;
use glam::Vec3;
use rand::Rng;

/// Default velocity retained (and reversed) on each bounce.
pub const DEFAULT_FRICTION: f32 = 0.85;

/// Tick length the settling threshold is expressed in (60 ticks per second).
pub const DEFAULT_REFERENCE_TICK: f32 = 0.0167;

/// Number of reference ticks of acceleration below which a bounce settles.
pub const DEFAULT_STIFFNESS: f32 = 6.0;

/// An axis-aligned box centered on `center`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxZone {
    pub center: Vec3,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    /// Fraction of velocity kept after a bounce.
    pub friction: f32,
    reference_tick: f32,
    stiffness: f32,
}

impl BoxZone {
    pub fn new(center: Vec3, width: f32, height: f32, depth: f32) -> Self {
        Self {
            center,
            width,
            height,
            depth,
            friction: DEFAULT_FRICTION,
            reference_tick: DEFAULT_REFERENCE_TICK,
            stiffness: DEFAULT_STIFFNESS,
        }
    }

    /// A cube of side `size`.
    pub fn cube(center: Vec3, size: f32) -> Self {
        Self::new(center, size, size, size)
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    /// Tune when a bouncing body comes to rest.
    ///
    /// After a bounce, an axis whose speed is below
    /// `|acceleration| * reference_tick * stiffness` (and not moving along the
    /// acceleration) is zeroed. The defaults match a 60 Hz cadence.
    pub fn with_settling(mut self, reference_tick: f32, stiffness: f32) -> Self {
        self.reference_tick = reference_tick;
        self.stiffness = stiffness;
        self
    }

    pub fn size(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth)
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.size() * 0.5
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.size() * 0.5
    }

    /// Uniform point in the volume.
    pub fn sample(&self, rng: &mut SimRng) -> Vec3 {
        let offset = Vec3::new(
            rng.gen::<f32>() - 0.5,
            rng.gen::<f32>() - 0.5,
            rng.gen::<f32>() - 0.5,
        );
        self.center + offset * self.size()
    }

    /// Kill the body once its bounding sphere is fully outside on any axis.
    pub fn dead(&self, body: &mut KinematicBody) {
        let (min, max) = (self.min(), self.max());
        let r = body.radius;
        for axis in 0..3 {
            let p = body.position[axis];
            if p + r < min[axis] || p - r > max[axis] {
                body.dead = true;
                return;
            }
        }
    }

    /// Clamp the body inside and bounce it off the walls.
    pub fn bound(&self, body: &mut KinematicBody) {
        let (min, max) = (self.min(), self.max());
        let r = body.radius;
        for axis in 0..3 {
            let p = body.position[axis];
            let wall = if p - r < min[axis] {
                min[axis] + r
            } else if p + r > max[axis] {
                max[axis] - r
            } else {
                continue;
            };

            body.position[axis] = wall;
            body.velocity[axis] *= -self.friction;
            self.settle(body, axis);
        }
    }

    /// Wrap the body to the opposite face once fully outside and still moving
    /// away through that face.
    pub fn cross(&self, body: &mut KinematicBody) {
        let (min, max) = (self.min(), self.max());
        let r = body.radius;
        for axis in 0..3 {
            let p = body.position[axis];
            let v = body.velocity[axis];
            if p + r < min[axis] && v <= 0.0 {
                body.position[axis] = max[axis] + r;
            } else if p - r > max[axis] && v >= 0.0 {
                body.position[axis] = min[axis] - r;
            }
        }
    }

    fn settle(&self, body: &mut KinematicBody, axis: usize) {
        let v = body.velocity[axis];
        let a = body.acceleration[axis];
        if v * a > 0.0 {
            return;
        }
        if v.abs() < a.abs() * self.reference_tick * self.stiffness {
            body.velocity[axis] = 0.0;
            body.acceleration[axis] = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn body_at(position: Vec3, velocity: Vec3) -> KinematicBody {
        KinematicBody {
            position,
            velocity,
            radius: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_samples_inside() {
        let mut rng = SimRng::seed_from_u64(1);
        let zone = BoxZone::new(Vec3::new(5.0, 0.0, -5.0), 10.0, 20.0, 30.0);
        for _ in 0..500 {
            let p = zone.sample(&mut rng);
            assert!(p.cmpge(zone.min()).all() && p.cmple(zone.max()).all());
        }
    }

    #[test]
    fn test_dead_only_when_fully_outside() {
        let zone = BoxZone::cube(Vec3::ZERO, 10.0);

        let mut grazing = body_at(Vec3::new(5.5, 0.0, 0.0), Vec3::ZERO);
        zone.dead(&mut grazing);
        assert!(!grazing.dead);

        let mut gone = body_at(Vec3::new(6.5, 0.0, 0.0), Vec3::ZERO);
        zone.dead(&mut gone);
        assert!(gone.dead);
    }

    #[test]
    fn test_bound_reflects_with_friction() {
        let zone = BoxZone::cube(Vec3::ZERO, 10.0);
        let mut body = body_at(Vec3::new(0.0, 0.0, 7.0), Vec3::new(0.0, 0.0, 100.0));
        zone.bound(&mut body);
        assert_eq!(body.position.z, 4.0);
        assert!((body.velocity.z + 85.0).abs() < 1e-4);
    }

    #[test]
    fn test_bound_settles_slow_bounce() {
        let zone = BoxZone::cube(Vec3::ZERO, 10.0);
        let mut body = body_at(Vec3::new(0.0, -5.5, 0.0), Vec3::new(0.0, -1.0, 0.0));
        body.acceleration.y = -980.0;
        zone.bound(&mut body);
        assert_eq!(body.velocity.y, 0.0);
        assert_eq!(body.acceleration.y, 0.0);
    }

    #[test]
    fn test_settling_threshold_is_configurable() {
        let zone = BoxZone::cube(Vec3::ZERO, 10.0).with_settling(0.0167, 0.0);
        let mut body = body_at(Vec3::new(0.0, -5.5, 0.0), Vec3::new(0.0, -1.0, 0.0));
        body.acceleration.y = -980.0;
        zone.bound(&mut body);
        assert!((body.velocity.y - 0.85).abs() < 1e-5);
    }

    #[test]
    fn test_cross_wraps() {
        let zone = BoxZone::cube(Vec3::ZERO, 10.0);
        let mut body = body_at(Vec3::new(-6.5, 0.0, 0.0), Vec3::ZERO);
        zone.cross(&mut body);
        assert_eq!(body.position.x, 6.0);
    }

    #[test]
    fn test_cross_skips_body_heading_back() {
        let zone = BoxZone::cube(Vec3::ZERO, 10.0);

        let mut returning = body_at(Vec3::new(-6.5, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
        zone.cross(&mut returning);
        assert_eq!(returning.position.x, -6.5);

        let mut leaving = body_at(Vec3::new(6.5, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
        zone.cross(&mut leaving);
        assert_eq!(leaving.position.x, -6.0);

        let mut falling_back = body_at(Vec3::new(0.0, 6.5, 0.0), Vec3::new(0.0, -1.0, 0.0));
        zone.cross(&mut falling_back);
        assert_eq!(falling_back.position.y, 6.5);
    }
}
