//! Spatial regions for spawning and containment.
//!
//! A [`Zone`] does two jobs:
//!
//! - **Sampling**: [`Zone::position`] returns a random point inside the region.
//!   The position initializer uses this to place newly spawned particles.
//! - **Boundaries**: [`Zone::crossing`] enforces a [`CrossType`] policy on a
//!   body that leaves the region. The cross-zone behaviour calls it every tick.
//!
//! | Shape | Sampling | Crossing |
//! |-------|----------|----------|
//! | [`PointZone`] | the point | - |
//! | [`LineZone`] | uniform on the segment | - |
//! | [`BoxZone`] | uniform in the volume | dead / bound / cross |
//! | [`SphereZone`] | uniform in the volume | dead / bound / cross |
//! | [`MeshZone`] | a random vertex | - |
//! | [`ScreenZone`] | a random pixel, unprojected | dead / bound / cross |
//!
//! Shapes without boundary support log a warning when asked to bound or wrap,
//! and ignore the request.
//!
//! # Example
//!
//! ```ignore
//! let arena = Zone::boxed(Vec3::ZERO, 400.0, 400.0, 400.0).with_cross_type(CrossType::Bound);
//! emitter.add_behaviour(Behaviour::cross_zone(arena));
//! ```

mod box_zone;
mod line;
mod mesh;
mod point;
mod screen;
mod sphere;

pub use box_zone::BoxZone;
pub use line::LineZone;
pub use mesh::MeshZone;
pub use point::PointZone;
pub use screen::{ScreenEdges, ScreenProjection, ScreenZone};
pub use sphere::SphereZone;

use crate::error::Result;
use crate::math::SimRng;
use crate::particle::KinematicBody;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// What happens to a body that leaves a zone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossType {
    /// Kill the body once it is fully outside.
    #[default]
    Dead,
    /// Keep the body inside by reflecting it off the boundary.
    Bound,
    /// Wrap the body around to the opposite side.
    Cross,
}

/// The geometry of a zone.
#[derive(Clone, Debug)]
pub enum ZoneShape {
    Point(PointZone),
    Line(LineZone),
    Box(BoxZone),
    Sphere(SphereZone),
    Mesh(MeshZone),
    Screen(ScreenZone),
}

impl ZoneShape {
    /// Short type name, as used by data-driven configuration.
    pub fn type_name(&self) -> &'static str {
        match self {
            ZoneShape::Point(_) => "PointZone",
            ZoneShape::Line(_) => "LineZone",
            ZoneShape::Box(_) => "BoxZone",
            ZoneShape::Sphere(_) => "SphereZone",
            ZoneShape::Mesh(_) => "MeshZone",
            ZoneShape::Screen(_) => "ScreenZone",
        }
    }
}

/// A sampled region with a boundary policy.
#[derive(Clone, Debug)]
pub struct Zone {
    shape: ZoneShape,
    cross_type: CrossType,
    last_position: Vec3,
}

impl Zone {
    /// Wrap a shape with the default [`CrossType::Dead`] policy.
    pub fn new(shape: ZoneShape) -> Self {
        Self {
            shape,
            cross_type: CrossType::Dead,
            last_position: Vec3::ZERO,
        }
    }

    // ========== Shape constructors ==========

    pub fn point(position: Vec3) -> Self {
        Self::new(ZoneShape::Point(PointZone::new(position)))
    }

    pub fn line(start: Vec3, end: Vec3) -> Self {
        Self::new(ZoneShape::Line(LineZone::new(start, end)))
    }

    pub fn boxed(center: Vec3, width: f32, height: f32, depth: f32) -> Self {
        Self::new(ZoneShape::Box(BoxZone::new(center, width, height, depth)))
    }

    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Self::new(ZoneShape::Sphere(SphereZone::new(center, radius)))
    }

    /// A zone over mesh vertices. Fails on an empty vertex list.
    pub fn mesh(vertices: Vec<Vec3>, scale: f32) -> Result<Self> {
        Ok(Self::new(ZoneShape::Mesh(MeshZone::new(vertices, scale)?)))
    }

    pub fn screen(zone: ScreenZone) -> Self {
        Self::new(ZoneShape::Screen(zone))
    }

    // ========== Builder ==========

    /// Set the boundary policy.
    pub fn with_cross_type(mut self, cross_type: CrossType) -> Self {
        self.cross_type = cross_type;
        self
    }

    // ========== Accessors ==========

    pub fn shape(&self) -> &ZoneShape {
        &self.shape
    }

    pub fn shape_mut(&mut self) -> &mut ZoneShape {
        &mut self.shape
    }

    pub fn cross_type(&self) -> CrossType {
        self.cross_type
    }

    pub fn set_cross_type(&mut self, cross_type: CrossType) {
        self.cross_type = cross_type;
    }

    /// The most recently sampled point.
    pub fn last_position(&self) -> Vec3 {
        self.last_position
    }

    /// Whether `bound` and `cross` policies are honored by this shape.
    pub fn supports_crossing(&self) -> bool {
        matches!(
            self.shape,
            ZoneShape::Box(_) | ZoneShape::Sphere(_) | ZoneShape::Screen(_)
        )
    }

    // ========== Operations ==========

    /// Sample a random point inside the zone.
    pub fn position(&mut self, rng: &mut SimRng) -> Vec3 {
        let position = match &self.shape {
            ZoneShape::Point(zone) => zone.sample(),
            ZoneShape::Line(zone) => zone.sample(rng),
            ZoneShape::Box(zone) => zone.sample(rng),
            ZoneShape::Sphere(zone) => zone.sample(rng),
            ZoneShape::Mesh(zone) => zone.sample(rng),
            ZoneShape::Screen(zone) => zone.sample(rng),
        };
        self.last_position = position;
        position
    }

    /// Apply the boundary policy to `body`.
    pub fn crossing(&self, body: &mut KinematicBody) {
        match &self.shape {
            ZoneShape::Box(zone) => match self.cross_type {
                CrossType::Dead => zone.dead(body),
                CrossType::Bound => zone.bound(body),
                CrossType::Cross => zone.cross(body),
            },
            ZoneShape::Sphere(zone) => match self.cross_type {
                CrossType::Dead => zone.dead(body),
                CrossType::Bound => zone.bound(body),
                CrossType::Cross => zone.cross(body),
            },
            ZoneShape::Screen(zone) => match self.cross_type {
                CrossType::Dead => zone.dead(body),
                CrossType::Bound => zone.bound(body),
                CrossType::Cross => zone.cross(body),
            },
            ZoneShape::Point(_) | ZoneShape::Line(_) | ZoneShape::Mesh(_) => {
                if self.cross_type != CrossType::Dead {
                    log::warn!(
                        "{} does not support the {:?} crossing policy; ignoring",
                        self.shape.type_name(),
                        self.cross_type
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_position_records_last_sample() {
        let mut rng = SimRng::seed_from_u64(1);
        let mut zone = Zone::line(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));
        let p = zone.position(&mut rng);
        assert_eq!(zone.last_position(), p);
    }

    #[test]
    fn test_supports_crossing() {
        assert!(Zone::boxed(Vec3::ZERO, 1.0, 1.0, 1.0).supports_crossing());
        assert!(Zone::sphere(Vec3::ZERO, 1.0).supports_crossing());
        assert!(!Zone::point(Vec3::ZERO).supports_crossing());
        assert!(!Zone::line(Vec3::ZERO, Vec3::X).supports_crossing());
        assert!(!Zone::mesh(vec![Vec3::X], 1.0).unwrap().supports_crossing());
    }

    #[test]
    fn test_unsupported_crossing_is_a_no_op() {
        let zone = Zone::point(Vec3::ZERO).with_cross_type(CrossType::Bound);
        let mut body = KinematicBody {
            position: Vec3::splat(1000.0),
            velocity: Vec3::X,
            ..Default::default()
        };
        let before = body.clone();
        zone.crossing(&mut body);
        assert_eq!(body, before);
    }

    #[test]
    fn test_cross_type_serde_names() {
        let parsed: CrossType = serde_json::from_str("\"bound\"").unwrap();
        assert_eq!(parsed, CrossType::Bound);
    }
}
