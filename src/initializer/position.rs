use crate::math::SimRng;
use crate::zone::Zone;
use glam::Vec3;
use rand::Rng;

/// Places targets at a random point of a randomly picked zone.
#[derive(Clone, Debug)]
pub struct Position {
    pub zones: Vec<Zone>,
}

impl Position {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self { zones }
    }

    /// Sample a position. With no zones, the origin.
    pub fn sample(&mut self, rng: &mut SimRng) -> Vec3 {
        if self.zones.is_empty() {
            return Vec3::ZERO;
        }
        let index = rng.gen_range(0..self.zones.len());
        self.zones[index].position(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_picks_from_every_zone() {
        let mut rng = SimRng::seed_from_u64(6);
        let mut position = Position::new(vec![
            Zone::point(Vec3::X),
            Zone::point(Vec3::Y),
        ]);
        let mut seen_x = false;
        let mut seen_y = false;
        for _ in 0..100 {
            match position.sample(&mut rng) {
                p if p == Vec3::X => seen_x = true,
                p if p == Vec3::Y => seen_y = true,
                other => panic!("unexpected sample {other:?}"),
            }
        }
        assert!(seen_x && seen_y);
    }

    #[test]
    fn test_no_zones_is_origin() {
        let mut rng = SimRng::seed_from_u64(7);
        assert_eq!(Position::new(vec![]).sample(&mut rng), Vec3::ZERO);
    }
}
