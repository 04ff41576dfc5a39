use super::{BehaviourState, BehaviourTarget};
use crate::math::{self, SimRng, MEASURE};
use crate::span::Span;
use glam::Vec3;

/// Random acceleration kicks at intervals.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDrift {
    /// Per-axis kick amplitude in simulation units.
    pub drift: Vec3,
    /// Seconds between kicks, sampled after every kick.
    pub delay: Span,
}

impl RandomDrift {
    pub fn new(drift: Vec3, delay: Span) -> Self {
        Self {
            drift: drift * MEASURE,
            delay,
        }
    }

    /// Draw the first delay for a new attachment.
    pub(super) fn initialize(&self, state: &mut BehaviourState, rng: &mut SimRng) {
        state.timer = 0.0;
        state.next_delay = self.delay.value(rng);
    }

    pub(super) fn mutate(
        &self,
        target: &mut dyn BehaviourTarget,
        state: &mut BehaviourState,
        time: f32,
        rng: &mut SimRng,
    ) {
        state.timer += time;
        if state.timer < state.next_delay {
            return;
        }

        let kick = Vec3::new(
            math::random_a_to_b(rng, -self.drift.x, self.drift.x, false),
            math::random_a_to_b(rng, -self.drift.y, self.drift.y, false),
            math::random_a_to_b(rng, -self.drift.z, self.drift.z, false),
        );
        target.motion_mut().acceleration += kick;
        state.timer = 0.0;
        state.next_delay = self.delay.value(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;
    use rand::SeedableRng;

    #[test]
    fn test_kicks_after_delay() {
        let mut rng = SimRng::seed_from_u64(4);
        let drift = RandomDrift::new(Vec3::new(1.0, 1.0, 0.0), Span::fixed(0.1));
        let mut state = BehaviourState::default();
        drift.initialize(&mut state, &mut rng);
        let mut p = Particle::new();

        drift.mutate(&mut p, &mut state, 0.05, &mut rng);
        assert_eq!(p.motion.acceleration, Vec3::ZERO);

        drift.mutate(&mut p, &mut state, 0.05, &mut rng);
        let a = p.motion.acceleration;
        assert!(a.x.abs() <= 100.0 && a.y.abs() <= 100.0);
        assert_eq!(a.z, 0.0);
        assert_eq!(state.timer, 0.0);
    }

    #[test]
    fn test_ranged_delay_held_for_whole_cycle() {
        let mut rng = SimRng::seed_from_u64(5);
        let drift = RandomDrift::new(Vec3::ONE, Span::new(0.0, 1.0));
        let mut state = BehaviourState::default();
        drift.initialize(&mut state, &mut rng);
        let mut p = Particle::new();

        let mut kicks = 0;
        for _ in 0..10_000 {
            p.motion.acceleration = Vec3::ZERO;
            let before = state.next_delay;
            drift.mutate(&mut p, &mut state, 0.01, &mut rng);
            if p.motion.acceleration != Vec3::ZERO {
                kicks += 1;
            } else {
                assert_eq!(state.next_delay, before);
            }
        }
        // Mean delay 0.5s over 100s, plus one tick of overshoot per cycle.
        assert!((150..=260).contains(&kicks), "{kicks}");
    }
}
