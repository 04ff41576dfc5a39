use super::BehaviourTarget;
use crate::math::MEASURE;
use glam::Vec3;

/// Constant acceleration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Force {
    /// Acceleration in simulation units (authored value times 100).
    pub force: Vec3,
}

impl Force {
    /// Build from a force in game units.
    pub fn new(force: Vec3) -> Self {
        Self {
            force: force * MEASURE,
        }
    }

    pub(super) fn mutate(&self, target: &mut dyn BehaviourTarget) {
        target.motion_mut().acceleration += self.force;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;

    #[test]
    fn test_adds_scaled_force() {
        let force = Force::new(Vec3::new(0.0, -2.0, 0.5));
        let mut p = Particle::new();
        force.mutate(&mut p);
        force.mutate(&mut p);
        assert_eq!(p.motion.acceleration, Vec3::new(0.0, -400.0, 100.0));
    }
}
