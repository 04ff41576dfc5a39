use crate::math::SimRng;
use glam::Vec3;
use rand::Rng;

/// A straight segment between two points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineZone {
    pub start: Vec3,
    pub end: Vec3,
}

impl LineZone {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    /// Uniform point on the segment.
    pub fn sample(&self, rng: &mut SimRng) -> Vec3 {
        self.start.lerp(self.end, rng.gen::<f32>())
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_samples_lie_on_segment() {
        let mut rng = SimRng::seed_from_u64(7);
        let zone = LineZone::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(3.0, 4.0, 0.0));
        for _ in 0..200 {
            let p = zone.sample(&mut rng);
            let along = p.distance(zone.start) + p.distance(zone.end);
            assert!((along - zone.length()).abs() < 1e-3);
        }
    }
}
