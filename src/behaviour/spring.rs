use super::BehaviourTarget;
use glam::Vec3;

/// Pull toward an anchor, proportional to the distance from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    pub anchor: Vec3,
    /// Velocity gained per unit of displacement per tick.
    pub spring: f32,
    /// Stored for configuration round trips but never applied to velocity.
    /// Whether it should dampen the oscillation is unresolved, so the spring
    /// keeps its undamped behaviour.
    pub friction: f32,
}

impl Spring {
    pub fn new(anchor: Vec3, spring: f32, friction: f32) -> Self {
        Self {
            anchor,
            spring,
            friction,
        }
    }

    pub(super) fn mutate(&self, target: &mut dyn BehaviourTarget) {
        let motion = target.motion_mut();
        motion.velocity += (self.anchor - motion.position) * self.spring;
    }
}
