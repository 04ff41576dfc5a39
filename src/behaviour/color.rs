use super::BehaviourTarget;
use crate::math::SimRng;
use crate::span::ColorSpan;

/// Blends particle color over its life.
#[derive(Clone, Debug, PartialEq)]
pub struct Color {
    pub a: ColorSpan,
    pub b: Option<ColorSpan>,
}

impl Color {
    pub fn new(a: ColorSpan, b: Option<ColorSpan>) -> Self {
        Self { a, b }
    }

    pub(super) fn initialize(&self, target: &mut dyn BehaviourTarget, rng: &mut SimRng) {
        let Some(particle) = target.as_particle_mut() else {
            return;
        };
        let color_a = self.a.value(rng);
        let color_b = match &self.b {
            Some(b) => b.value(rng),
            None => color_a,
        };
        particle.use_color = true;
        particle.transform.color_a = color_a;
        particle.transform.color_b = color_b;
    }

    pub(super) fn mutate(&self, target: &mut dyn BehaviourTarget) {
        let Some(particle) = target.as_particle_mut() else {
            return;
        };
        let t = particle.transform;
        particle.color = t.color_b + (t.color_a - t.color_b) * particle.motion.energy;
    }
}
