//! Zone covering the visible viewport.
//!
//! The simulation knows nothing about cameras, so screen mapping is delegated
//! to a [`ScreenProjection`] supplied by the renderer side.

use crate::math::SimRng;
use crate::particle::KinematicBody;
use bitflags::bitflags;
use glam::{Vec2, Vec3};
use rand::Rng;
use std::fmt::Debug;
use std::sync::Arc;

/// Default distance beyond the viewport edge before a policy triggers.
pub const DEFAULT_MARGIN: f32 = 200.0;

bitflags! {
    /// Viewport edges on which the crossing policy is enforced.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ScreenEdges: u8 {
        const TOP = 0b0001;
        const RIGHT = 0b0010;
        const BOTTOM = 0b0100;
        const LEFT = 0b1000;
    }
}

impl ScreenEdges {
    /// Parse an edge list written as digits, `1` top through `4` left (`"1234"`).
    ///
    /// Unknown characters are ignored.
    pub fn from_digits(digits: &str) -> Self {
        digits.chars().fold(Self::empty(), |edges, c| match c {
            '1' => edges | Self::TOP,
            '2' => edges | Self::RIGHT,
            '3' => edges | Self::BOTTOM,
            '4' => edges | Self::LEFT,
            _ => edges,
        })
    }
}

impl Default for ScreenEdges {
    fn default() -> Self {
        Self::all()
    }
}

/// World/screen mapping provided by the host renderer.
///
/// Screen coordinates are pixels with the origin at the top-left corner and
/// `y` growing downward. The `z` component carries depth through the round trip.
pub trait ScreenProjection: Debug + Send + Sync {
    /// Viewport size in pixels.
    fn viewport(&self) -> Vec2;
    /// World position to screen position.
    fn project(&self, world: Vec3) -> Vec3;
    /// Screen position to world position.
    fn unproject(&self, screen: Vec3) -> Vec3;
}

/// The region seen through a projection.
#[derive(Clone, Debug)]
pub struct ScreenZone {
    projection: Arc<dyn ScreenProjection>,
    /// Margin beyond the viewport, in pixels.
    pub margin: f32,
    pub edges: ScreenEdges,
    /// Depth used when unprojecting sampled pixels.
    pub depth: f32,
}

impl ScreenZone {
    pub fn new(projection: Arc<dyn ScreenProjection>) -> Self {
        Self {
            projection,
            margin: DEFAULT_MARGIN,
            edges: ScreenEdges::all(),
            depth: 0.5,
        }
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_edges(mut self, edges: ScreenEdges) -> Self {
        self.edges = edges;
        self
    }

    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }

    pub fn projection(&self) -> &Arc<dyn ScreenProjection> {
        &self.projection
    }

    /// A random pixel, unprojected into the world.
    pub fn sample(&self, rng: &mut SimRng) -> Vec3 {
        let size = self.projection.viewport();
        let pixel = Vec3::new(
            rng.gen::<f32>() * size.x,
            rng.gen::<f32>() * size.y,
            self.depth,
        );
        self.projection.unproject(pixel)
    }

    pub fn dead(&self, body: &mut KinematicBody) {
        let screen = self.projection.project(body.position);
        let exits = self.exits(screen, body.radius);
        if !(exits.x == 0 && exits.y == 0) {
            body.dead = true;
        }
    }

    pub fn bound(&self, body: &mut KinematicBody) {
        let screen = self.projection.project(body.position);
        let exits = self.exits(screen, body.radius);
        if exits.x != 0 {
            body.velocity.x = -body.velocity.x;
        }
        if exits.y != 0 {
            body.velocity.y = -body.velocity.y;
        }
    }

    pub fn cross(&self, body: &mut KinematicBody) {
        let mut screen = self.projection.project(body.position);
        let exits = self.exits(screen, body.radius);
        if exits.x == 0 && exits.y == 0 {
            return;
        }

        let size = self.projection.viewport();
        let (r, dis) = (body.radius, self.margin);
        match exits.y {
            -1 => screen.y = size.y + dis + r,
            1 => screen.y = -dis - r,
            _ => {}
        }
        match exits.x {
            -1 => screen.x = size.x + dis + r,
            1 => screen.x = -dis - r,
            _ => {}
        }
        body.position = self.projection.unproject(screen);
    }

    /// Which enabled edges `screen` has left: -1 past top/left, 1 past
    /// bottom/right, 0 inside.
    fn exits(&self, screen: Vec3, radius: f32) -> Exits {
        let size = self.projection.viewport();
        let dis = self.margin;

        let y = if screen.y + radius < -dis && self.edges.contains(ScreenEdges::TOP) {
            -1
        } else if screen.y - radius > size.y + dis && self.edges.contains(ScreenEdges::BOTTOM) {
            1
        } else {
            0
        };
        let x = if screen.x + radius < -dis && self.edges.contains(ScreenEdges::LEFT) {
            -1
        } else if screen.x - radius > size.x + dis && self.edges.contains(ScreenEdges::RIGHT) {
            1
        } else {
            0
        };
        Exits { x, y }
    }
}

#[derive(Clone, Copy)]
struct Exits {
    x: i8,
    y: i8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    /// Orthographic mapping: world (0,0) at the top-left pixel, y flipped.
    #[derive(Debug)]
    struct Ortho;

    impl ScreenProjection for Ortho {
        fn viewport(&self) -> Vec2 {
            Vec2::new(800.0, 600.0)
        }
        fn project(&self, world: Vec3) -> Vec3 {
            Vec3::new(world.x, -world.y, world.z)
        }
        fn unproject(&self, screen: Vec3) -> Vec3 {
            Vec3::new(screen.x, -screen.y, screen.z)
        }
    }

    fn zone() -> ScreenZone {
        ScreenZone::new(Arc::new(Ortho)).with_margin(0.0)
    }

    fn body_at(position: Vec3) -> KinematicBody {
        KinematicBody {
            position,
            velocity: Vec3::new(10.0, 10.0, 0.0),
            radius: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_edges_from_digits() {
        assert_eq!(ScreenEdges::from_digits("1234"), ScreenEdges::all());
        assert_eq!(
            ScreenEdges::from_digits("13"),
            ScreenEdges::TOP | ScreenEdges::BOTTOM
        );
        assert_eq!(ScreenEdges::default(), ScreenEdges::all());
    }

    #[test]
    fn test_samples_land_in_viewport() {
        let mut rng = SimRng::seed_from_u64(9);
        let zone = zone();
        for _ in 0..100 {
            let s = Ortho.project(zone.sample(&mut rng));
            assert!((0.0..=800.0).contains(&s.x) && (0.0..=600.0).contains(&s.y));
        }
    }

    #[test]
    fn test_dead_respects_edge_mask() {
        let mut body = body_at(Vec3::new(900.0, -300.0, 0.0));
        zone().with_edges(ScreenEdges::TOP).dead(&mut body);
        assert!(!body.dead);

        zone().dead(&mut body);
        assert!(body.dead);
    }

    #[test]
    fn test_bound_reflects_offending_axis() {
        let mut body = body_at(Vec3::new(-5.0, -300.0, 0.0));
        zone().bound(&mut body);
        assert_eq!(body.velocity, Vec3::new(-10.0, 10.0, 0.0));
    }

    #[test]
    fn test_cross_moves_to_opposite_edge() {
        let mut body = body_at(Vec3::new(805.0, -300.0, 0.0));
        zone().cross(&mut body);
        assert_eq!(body.position.x, -1.0);
        assert_eq!(body.position.y, -300.0);
    }
}
