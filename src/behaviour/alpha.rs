use super::BehaviourTarget;
use crate::math::{lerp, SimRng};
use crate::span::Span;

/// Alpha below this snaps to fully transparent.
const ALPHA_EPSILON: f32 = 0.002;

/// Fades particle alpha over its life.
#[derive(Clone, Debug, PartialEq)]
pub struct Alpha {
    pub a: Span,
    pub b: Option<Span>,
}

impl Alpha {
    pub fn new(a: Span, b: Option<Span>) -> Self {
        Self { a, b }
    }

    pub(super) fn initialize(&self, target: &mut dyn BehaviourTarget, rng: &mut SimRng) {
        let Some(particle) = target.as_particle_mut() else {
            return;
        };
        let alpha_a = self.a.value(rng);
        let alpha_b = match &self.b {
            Some(b) => b.value(rng),
            None => alpha_a,
        };
        particle.use_alpha = true;
        particle.transform.alpha_a = alpha_a;
        particle.transform.alpha_b = alpha_b;
    }

    pub(super) fn mutate(&self, target: &mut dyn BehaviourTarget) {
        let Some(particle) = target.as_particle_mut() else {
            return;
        };
        let t = particle.transform;
        let alpha = lerp(t.alpha_a, t.alpha_b, particle.motion.energy);
        particle.alpha = if alpha < ALPHA_EPSILON { 0.0 } else { alpha };
    }
}
