use super::BehaviourTarget;
use crate::math::SimRng;
use crate::span::Span;
use glam::Vec3;

/// How a [`Rotate`] behaviour drives rotation. Angles are authored in degrees.
#[derive(Clone, Debug, PartialEq)]
pub enum RotateMode {
    /// Orient along the direction of travel.
    Same,
    /// Hold a rotation sampled once per particle (each axis sampled separately).
    Set(Span),
    /// Interpolate from `from` at birth to `to` at death, on all axes.
    To { from: Span, to: Span },
    /// Spin by a per-tick delta sampled once per particle.
    Add { x: Span, y: Span, z: Span },
}

/// Drives particle rotation.
#[derive(Clone, Debug, PartialEq)]
pub struct Rotate {
    pub mode: RotateMode,
}

impl Rotate {
    pub fn new(mode: RotateMode) -> Self {
        Self { mode }
    }

    /// Pick the mode from the supplied angles.
    pub fn infer(x: Option<Span>, y: Option<Span>, z: Option<Span>) -> Self {
        let mode = match (x, y, z) {
            (None, _, _) => RotateMode::Same,
            (Some(x), None, _) => RotateMode::Set(x),
            (Some(from), Some(to), None) => RotateMode::To { from, to },
            (Some(x), Some(y), Some(z)) => RotateMode::Add { x, y, z },
        };
        Self { mode }
    }

    pub(super) fn initialize(&self, target: &mut dyn BehaviourTarget, rng: &mut SimRng) {
        let transform = target.transform_mut();
        match &self.mode {
            RotateMode::Same => {}
            RotateMode::Set(span) => {
                transform.rotation_a = degrees(span, span, span, rng);
            }
            RotateMode::To { from, to } => {
                transform.rotation_a = Vec3::splat(from.value(rng).to_radians());
                transform.rotation_b = Vec3::splat(to.value(rng).to_radians());
            }
            RotateMode::Add { x, y, z } => {
                transform.rotation_delta = degrees(x, y, z, rng);
            }
        }
    }

    pub(super) fn mutate(&self, target: &mut dyn BehaviourTarget) {
        let t = *target.transform_mut();
        let motion = target.motion_mut();
        match &self.mode {
            RotateMode::Same => {
                let v = motion.velocity;
                if v.length_squared() > 0.0 {
                    motion.rotation.x = -v.y.atan2(v.x.hypot(v.z));
                    motion.rotation.y = v.x.atan2(v.z);
                }
            }
            RotateMode::Set(_) => motion.rotation = t.rotation_a,
            RotateMode::To { .. } => {
                motion.rotation = t.rotation_b + (t.rotation_a - t.rotation_b) * motion.energy;
            }
            RotateMode::Add { .. } => motion.rotation += t.rotation_delta,
        }
    }
}

fn degrees(x: &Span, y: &Span, z: &Span, rng: &mut SimRng) -> Vec3 {
    Vec3::new(
        x.value(rng).to_radians(),
        y.value(rng).to_radians(),
        z.value(rng).to_radians(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;
    use rand::SeedableRng;
    use std::f32::consts::FRAC_PI_2;

    fn rng() -> SimRng {
        SimRng::seed_from_u64(8)
    }

    #[test]
    fn test_mode_inference() {
        let s = || Some(Span::fixed(10.0));
        assert_eq!(Rotate::infer(None, None, None).mode, RotateMode::Same);
        assert!(matches!(Rotate::infer(s(), None, None).mode, RotateMode::Set(_)));
        assert!(matches!(Rotate::infer(s(), s(), None).mode, RotateMode::To { .. }));
        assert!(matches!(Rotate::infer(s(), s(), s()).mode, RotateMode::Add { .. }));
    }

    #[test]
    fn test_same_faces_velocity() {
        let rotate = Rotate::new(RotateMode::Same);
        let mut p = Particle::new();
        p.motion.velocity = Vec3::new(5.0, 0.0, 0.0);
        rotate.mutate(&mut p);
        assert!((p.motion.rotation.y - FRAC_PI_2).abs() < 1e-6);
        assert!(p.motion.rotation.x.abs() < 1e-6);
    }

    #[test]
    fn test_add_accumulates_radians() {
        let mut rng = rng();
        let rotate = Rotate::infer(
            Some(Span::fixed(90.0)),
            Some(Span::fixed(0.0)),
            Some(Span::fixed(0.0)),
        );
        let mut p = Particle::new();
        rotate.initialize(&mut p, &mut rng);
        rotate.mutate(&mut p);
        rotate.mutate(&mut p);
        assert!((p.motion.rotation.x - 2.0 * FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_to_interpolates_with_energy() {
        let mut rng = rng();
        let rotate = Rotate::infer(Some(Span::fixed(0.0)), Some(Span::fixed(180.0)), None);
        let mut p = Particle::new();
        rotate.initialize(&mut p, &mut rng);

        p.motion.energy = 0.5;
        rotate.mutate(&mut p);
        assert!((p.motion.rotation - Vec3::splat(FRAC_PI_2)).length() < 1e-5);
    }

    #[test]
    fn test_set_holds_sampled_rotation() {
        let mut rng = rng();
        let rotate = Rotate::infer(Some(Span::fixed(45.0)), None, None);
        let mut p = Particle::new();
        rotate.initialize(&mut p, &mut rng);
        rotate.mutate(&mut p);
        assert!((p.motion.rotation - Vec3::splat(45f32.to_radians())).length() < 1e-6);
    }
}
