use super::BehaviourTarget;
use crate::math::{lerp, SimRng};
use crate::span::Span;

/// Scale below this snaps to zero.
const SCALE_EPSILON: f32 = 0.0001;

/// Scales size (and collision radius) over life.
#[derive(Clone, Debug, PartialEq)]
pub struct Scale {
    pub a: Span,
    pub b: Option<Span>,
}

impl Scale {
    pub fn new(a: Span, b: Option<Span>) -> Self {
        Self { a, b }
    }

    pub(super) fn initialize(&self, target: &mut dyn BehaviourTarget, rng: &mut SimRng) {
        let scale_a = self.a.value(rng);
        let scale_b = match &self.b {
            Some(b) => b.value(rng),
            None => scale_a,
        };
        let radius = target.motion().radius;
        let transform = target.transform_mut();
        transform.scale_a = scale_a;
        transform.scale_b = scale_b;
        transform.old_radius = radius;
    }

    pub(super) fn mutate(&self, target: &mut dyn BehaviourTarget) {
        let t = *target.transform_mut();
        let mut scale = lerp(t.scale_a, t.scale_b, target.motion().energy);
        if scale < SCALE_EPSILON {
            scale = 0.0;
        }
        target.motion_mut().radius = t.old_radius * scale;
        if let Some(particle) = target.as_particle_mut() {
            particle.scale = scale;
        }
    }
}
