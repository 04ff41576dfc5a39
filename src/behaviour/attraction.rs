use super::BehaviourTarget;
use crate::math::MEASURE;
use glam::Vec3;

/// Squared distances below this are treated as "at the target".
const MIN_DISTANCE_SQ: f32 = 0.000004;

/// Pull toward a point, fading linearly in squared distance to zero at `radius`.
///
/// A negative force repels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attraction {
    pub target: Vec3,
    /// Strength in simulation units.
    pub force: f32,
    pub radius: f32,
}

impl Attraction {
    pub fn new(target: Vec3, force: f32, radius: f32) -> Self {
        Self {
            target,
            force: force * MEASURE,
            radius,
        }
    }

    pub(super) fn mutate(&self, target: &mut dyn BehaviourTarget) {
        let motion = target.motion_mut();
        let delta = self.target - motion.position;
        let distance_sq = delta.length_squared();
        let radius_sq = self.radius * self.radius;

        if distance_sq > MIN_DISTANCE_SQ && distance_sq <= radius_sq {
            let falloff = 1.0 - distance_sq / radius_sq;
            motion.acceleration += delta.normalize_or_zero() * falloff * self.force;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;

    #[test]
    fn test_pulls_within_radius() {
        let attraction = Attraction::new(Vec3::ZERO, 1.0, 10.0);
        let mut p = Particle::new();
        p.motion.position = Vec3::new(5.0, 0.0, 0.0);
        attraction.mutate(&mut p);
        // 1 - 25/100 = 0.75 of 100 toward the origin.
        assert!((p.motion.acceleration - Vec3::new(-75.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_ignores_outside_radius_and_at_target() {
        let attraction = Attraction::new(Vec3::ZERO, 1.0, 10.0);
        let mut far = Particle::new();
        far.motion.position = Vec3::new(11.0, 0.0, 0.0);
        attraction.mutate(&mut far);
        assert_eq!(far.motion.acceleration, Vec3::ZERO);

        let mut on_top = Particle::new();
        on_top.motion.position = Vec3::new(0.001, 0.0, 0.0);
        attraction.mutate(&mut on_top);
        assert_eq!(on_top.motion.acceleration, Vec3::ZERO);
    }

    #[test]
    fn test_negative_force_repels() {
        let repulsion = Attraction::new(Vec3::ZERO, -1.0, 10.0);
        let mut p = Particle::new();
        p.motion.position = Vec3::new(0.0, 5.0, 0.0);
        repulsion.mutate(&mut p);
        assert!(p.motion.acceleration.y > 0.0);
    }
}
