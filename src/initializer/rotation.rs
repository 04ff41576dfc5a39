use crate::math::SimRng;
use crate::span::Span;
use glam::Vec3;

/// Initial rotation, one span per axis, in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct Rotation {
    pub x: Span,
    pub y: Span,
    pub z: Span,
}

impl Rotation {
    pub fn new(x: Span, y: Span, z: Span) -> Self {
        Self { x, y, z }
    }

    /// Sampled rotation in radians.
    pub fn sample(&self, rng: &mut SimRng) -> Vec3 {
        Vec3::new(
            self.x.value(rng).to_radians(),
            self.y.value(rng).to_radians(),
            self.z.value(rng).to_radians(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_converts_to_radians() {
        let mut rng = SimRng::seed_from_u64(1);
        let rotation = Rotation::new(Span::fixed(180.0), Span::fixed(0.0), Span::fixed(90.0));
        let r = rotation.sample(&mut rng);
        assert!((r.x - std::f32::consts::PI).abs() < 1e-6);
        assert!((r.z - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
