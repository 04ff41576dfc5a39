//! Numerical integration of kinematic bodies.
//!
//! Each tick, emitters integrate themselves and then each of their particles:
//!
//! ```text
//! acceleration /= mass
//! old = (position, velocity, acceleration)
//! velocity += acceleration * dt
//! position += old.velocity * dt
//! velocity *= 1 - damping
//! acceleration = 0
//! ```
//!
//! Position moves with the velocity the body entered the step with, so a force
//! applied this tick shows up in position one tick later.
//!
//! Forces are accumulated into `acceleration` by behaviours between steps and
//! consumed here.

use crate::particle::KinematicBody;
use serde::{Deserialize, Serialize};

/// Integration scheme.
///
/// Only [`Euler`](IntegrationType::Euler) is implemented. The other schemes are
/// accepted and step with Euler; systems log a warning when one is selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntegrationType {
    #[default]
    Euler,
    Rk2,
    Rk4,
    Verlet,
}

impl IntegrationType {
    pub fn is_implemented(self) -> bool {
        matches!(self, IntegrationType::Euler)
    }

    /// Advance `body` by `time` seconds.
    pub fn integrate(self, body: &mut KinematicBody, time: f32, damping: f32) {
        match self {
            IntegrationType::Euler
            | IntegrationType::Rk2
            | IntegrationType::Rk4
            | IntegrationType::Verlet => euler(body, time, damping),
        }
    }
}

/// Explicit Euler step.
pub fn euler(body: &mut KinematicBody, time: f32, damping: f32) {
    if body.sleep {
        return;
    }

    body.snapshot();

    if body.mass != 0.0 {
        body.acceleration /= body.mass;
    }
    body.velocity += body.acceleration * time;
    body.position += body.old.velocity * time;

    if damping != 0.0 {
        body.velocity *= 1.0 - damping;
    }

    body.acceleration = glam::Vec3::ZERO;
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_euler_step() {
        let mut body = KinematicBody {
            velocity: Vec3::new(1.0, 0.0, 0.0),
            acceleration: Vec3::new(0.0, -10.0, 0.0),
            mass: 2.0,
            ..Default::default()
        };
        euler(&mut body, 0.5, 0.0);

        assert_eq!(body.velocity, Vec3::new(1.0, -2.5, 0.0));
        assert_eq!(body.position, Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(body.acceleration, Vec3::ZERO);
        assert_eq!(body.old.velocity, Vec3::new(1.0, 0.0, 0.0));

        euler(&mut body, 0.5, 0.0);
        assert_eq!(body.position, Vec3::new(1.0, -1.25, 0.0));
    }

    #[test]
    fn test_damping_scales_velocity() {
        let mut body = KinematicBody {
            velocity: Vec3::new(100.0, 0.0, 0.0),
            ..Default::default()
        };
        euler(&mut body, 0.0, 0.25);
        assert_eq!(body.velocity.x, 75.0);
    }

    #[test]
    fn test_sleeping_body_is_frozen() {
        let mut body = KinematicBody {
            velocity: Vec3::X,
            sleep: true,
            ..Default::default()
        };
        euler(&mut body, 1.0, 0.0);
        assert_eq!(body.position, Vec3::ZERO);
    }

    #[test]
    fn test_unimplemented_schemes_step_like_euler() {
        let template = KinematicBody {
            velocity: Vec3::new(3.0, 1.0, 0.0),
            acceleration: Vec3::Y,
            ..Default::default()
        };
        let mut expected = template.clone();
        euler(&mut expected, 0.1, 0.006);

        for scheme in [IntegrationType::Rk2, IntegrationType::Rk4, IntegrationType::Verlet] {
            assert!(!scheme.is_implemented());
            let mut body = template.clone();
            scheme.integrate(&mut body, 0.1, 0.006);
            assert_eq!(body, expected);
        }
    }
}
