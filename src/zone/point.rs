use glam::Vec3;

/// A single point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointZone {
    pub position: Vec3,
}

impl PointZone {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    pub fn sample(&self) -> Vec3 {
        self.position
    }
}
