use super::BehaviourTarget;
use crate::particle::Particle;
use std::fmt;
use std::sync::Arc;

/// Extra separation added on top of the measured overlap.
const SEPARATION_BIAS: f32 = 0.5;

/// Called with both particles after each resolved contact.
pub type CollisionCallback = Arc<dyn Fn(&mut Particle, &mut Particle) + Send + Sync>;

/// Sphere-sphere separation between particles of the same emitter.
///
/// Each particle tests itself against the particles after it in the emitter's
/// list, so every pair is visited once per tick. Emitter targets are ignored.
#[derive(Clone)]
pub struct Collision {
    /// Split the push by inverse mass instead of evenly.
    pub use_mass: bool,
    on_collide: Option<CollisionCallback>,
}

impl Collision {
    pub fn new(use_mass: bool, on_collide: Option<CollisionCallback>) -> Self {
        Self {
            use_mass,
            on_collide,
        }
    }

    pub(super) fn mutate(&self, target: &mut dyn BehaviourTarget, neighbours: &mut [Box<Particle>]) {
        let Some(particle) = target.as_particle_mut() else {
            return;
        };
        for other in neighbours.iter_mut() {
            self.resolve(particle, other);
        }
    }

    /// Push `a` and `b` apart if their spheres overlap.
    pub fn resolve(&self, a: &mut Particle, b: &mut Particle) {
        let delta = b.motion.position - a.motion.position;
        let distance_sq = delta.length_squared();
        let reach = a.motion.radius + b.motion.radius;
        if distance_sq > reach * reach {
            return;
        }

        let overlap = reach - distance_sq.sqrt() + SEPARATION_BIAS;
        let (share_a, share_b) = if self.use_mass {
            let total = a.motion.mass + b.motion.mass;
            if total > 0.0 {
                (b.motion.mass / total, a.motion.mass / total)
            } else {
                (0.5, 0.5)
            }
        } else {
            (0.5, 0.5)
        };

        // Coincident centers have no separating direction and stay put.
        let direction = delta.normalize_or_zero();
        a.motion.position -= direction * overlap * share_a;
        b.motion.position += direction * overlap * share_b;

        if let Some(callback) = &self.on_collide {
            callback(a, b);
        }
    }
}

impl fmt::Debug for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collision")
            .field("use_mass", &self.use_mass)
            .field("on_collide", &self.on_collide.as_ref().map(|_| ".."))
            .finish()
    }
}
