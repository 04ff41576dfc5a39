use super::BehaviourTarget;
use crate::zone::Zone;

/// Enforces a zone's boundary policy every tick.
#[derive(Clone, Debug)]
pub struct CrossZone {
    pub zone: Zone,
}

impl CrossZone {
    pub fn new(zone: Zone) -> Self {
        Self { zone }
    }

    pub(super) fn mutate(&self, target: &mut dyn BehaviourTarget) {
        self.zone.crossing(target.motion_mut());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;
    use crate::zone::CrossType;
    use glam::Vec3;

    #[test]
    fn test_kills_particle_outside_box() {
        let cross = CrossZone::new(Zone::boxed(Vec3::ZERO, 100.0, 100.0, 100.0));
        let mut p = Particle::new();
        p.motion.position = Vec3::new(200.0, 0.0, 0.0);
        cross.mutate(&mut p);
        assert!(p.is_dead());
    }

    #[test]
    fn test_bounds_particle_in_sphere() {
        let zone = Zone::sphere(Vec3::ZERO, 50.0).with_cross_type(CrossType::Bound);
        let cross = CrossZone::new(zone);
        let mut p = Particle::new();
        p.motion.position = Vec3::new(0.0, 60.0, 0.0);
        p.motion.velocity = Vec3::new(0.0, 10.0, 0.0);
        cross.mutate(&mut p);
        assert!(p.motion.position.length() <= 40.0 + 1e-4);
        assert!(p.motion.velocity.y < 0.0);
    }
}
