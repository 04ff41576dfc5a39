//! The particle entity.
//!
//! A [`Particle`] is a pooled, reusable record. Its kinematic state lives in a
//! [`KinematicBody`], which emitters embed as well, so that initializers, zones
//! and behaviours can act on either through the same fields.
//!
//! # Lifecycle
//!
//! ```text
//! Pool::get ─► initializers ─► [update per tick] ─► destroy ─► reset ─► Pool::expire
//! ```
//!
//! A particle is alive while `age < life`. The first [`update`](Particle::update)
//! that pushes `age` to or past `life` calls [`destroy`](Particle::destroy),
//! which is idempotent. The owning emitter then resets it and hands it back to
//! the pool.

use crate::behaviour::{ApplyContext, AttachedBehaviour, Behaviour};
use crate::emitter::EmitterId;
use crate::math::{Easing, SimRng};
use glam::Vec3;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_PARTICLE_ID: AtomicU64 = AtomicU64::new(0);

// ========== Kinematics ==========

/// Previous-step snapshot used by integrators.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OldState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
}

/// Kinematic and lifetime state shared by particles and emitters.
#[derive(Clone, Debug, PartialEq)]
pub struct KinematicBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    pub old: OldState,
    pub mass: f32,
    pub radius: f32,
    /// Lifetime in seconds. `f32::INFINITY` never expires.
    pub life: f32,
    pub age: f32,
    /// Decays from 1 (birth) to 0 (death) along `easing`.
    pub energy: f32,
    pub easing: Easing,
    pub dead: bool,
    /// Sleeping bodies skip aging and behaviours.
    pub sleep: bool,
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            rotation: Vec3::ZERO,
            old: OldState::default(),
            mass: 1.0,
            radius: 10.0,
            life: f32::INFINITY,
            age: 0.0,
            energy: 1.0,
            easing: Easing::Linear,
            dead: false,
            sleep: false,
        }
    }
}

impl KinematicBody {
    /// Restore every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Normalized age in `[0, 1]` (0 for infinite life).
    pub fn progress(&self) -> f32 {
        if self.life <= 0.0 {
            return 1.0;
        }
        (self.age / self.life).min(1.0)
    }

    /// Recompute energy from age, life and easing.
    pub fn update_energy(&mut self) {
        self.energy = energy_for(self.easing, self.age, self.life);
    }

    /// Store the current position, velocity and acceleration in `old`.
    pub fn snapshot(&mut self) {
        self.old = OldState {
            position: self.position,
            velocity: self.velocity,
            acceleration: self.acceleration,
        };
    }
}

/// `max(1 - easing(age / life), 0)`.
#[inline]
pub(crate) fn energy_for(easing: Easing, age: f32, life: f32) -> f32 {
    (1.0 - easing.apply(age / life)).max(0.0)
}

// ========== Appearance ==========

/// Interpolation endpoints written by behaviours at attach time.
///
/// Working storage only: renderers should read the particle's resolved
/// `alpha`, `scale`, `color` and `rotation` instead.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub alpha_a: f32,
    pub alpha_b: f32,
    pub scale_a: f32,
    pub scale_b: f32,
    pub old_radius: f32,
    pub color_a: Vec3,
    pub color_b: Vec3,
    pub rotation_a: Vec3,
    pub rotation_b: Vec3,
    pub rotation_delta: Vec3,
    pub body_width: f32,
    pub body_height: f32,
}

/// Opaque renderer payload attached to a particle (a mesh handle, sprite, ...).
///
/// The simulation never inspects it.
#[derive(Clone)]
pub struct BodyPayload(Arc<dyn Any + Send + Sync>);

impl BodyPayload {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Whether two payloads share the same allocation.
    pub fn ptr_eq(&self, other: &BodyPayload) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for BodyPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BodyPayload(..)")
    }
}

// ========== Particle ==========

/// A single simulated particle.
#[derive(Debug)]
pub struct Particle {
    id: u64,
    pub motion: KinematicBody,
    pub alpha: f32,
    pub scale: f32,
    pub color: Vec3,
    /// Set by the alpha behaviour; renderers may ignore `alpha` otherwise.
    pub use_alpha: bool,
    /// Set by the color behaviour; renderers may ignore `color` otherwise.
    pub use_color: bool,
    pub body: Option<BodyPayload>,
    pub transform: Transform,
    behaviours: Vec<AttachedBehaviour>,
    parent: Option<EmitterId>,
}

impl Default for Particle {
    fn default() -> Self {
        Self::new()
    }
}

impl Particle {
    /// Create a particle with a fresh id and default state.
    pub fn new() -> Self {
        Self {
            id: NEXT_PARTICLE_ID.fetch_add(1, Ordering::Relaxed),
            motion: KinematicBody::default(),
            alpha: 1.0,
            scale: 1.0,
            color: Vec3::ONE,
            use_alpha: false,
            use_color: false,
            body: None,
            transform: Transform::default(),
            behaviours: Vec::new(),
            parent: None,
        }
    }

    /// Unique id, kept across resets.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn parent(&self) -> Option<EmitterId> {
        self.parent
    }

    pub fn set_parent(&mut self, parent: Option<EmitterId>) {
        self.parent = parent;
    }

    pub fn is_dead(&self) -> bool {
        self.motion.dead
    }

    pub fn position(&self) -> Vec3 {
        self.motion.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.motion.velocity
    }

    /// Restore defaults, keeping the id. Clears the transform and behaviours.
    pub fn reset(&mut self) -> &mut Self {
        self.motion.reset();
        self.alpha = 1.0;
        self.scale = 1.0;
        self.color = Vec3::ONE;
        self.use_alpha = false;
        self.use_color = false;
        self.body = None;
        self.transform = Transform::default();
        self.behaviours.clear();
        self.parent = None;
        self
    }

    /// Advance one tick: age, apply behaviours, then expire or refresh energy.
    ///
    /// Behaviours run last-added first. `index` is the particle's slot in its
    /// emitter; `ctx.neighbours` holds the particles after it.
    pub fn update(&mut self, time: f32, index: usize, ctx: &mut ApplyContext<'_>) {
        if !self.motion.sleep {
            self.motion.age += time;

            let mut behaviours = std::mem::take(&mut self.behaviours);
            for attached in behaviours.iter_mut().rev() {
                attached.apply(self, time, index, ctx);
            }
            // A behaviour cannot add behaviours to its own target.
            self.behaviours = behaviours;
        }

        if self.motion.dead || self.motion.age >= self.motion.life {
            self.destroy();
        } else {
            self.motion.update_energy();
        }
    }

    /// Mark dead. Idempotent; returning to the pool is the emitter's job.
    pub fn destroy(&mut self) {
        self.behaviours.clear();
        self.motion.energy = 0.0;
        self.motion.dead = true;
        self.parent = None;
    }

    // ========== Behaviours ==========

    /// Attach a behaviour and run its per-particle initialization.
    pub fn add_behaviour(&mut self, behaviour: Arc<Behaviour>, rng: &mut SimRng) {
        let mut attached = AttachedBehaviour::new(behaviour);
        attached.initialize(self, rng);
        self.behaviours.push(attached);
    }

    pub fn add_behaviours(&mut self, behaviours: &[Arc<Behaviour>], rng: &mut SimRng) {
        for behaviour in behaviours {
            self.add_behaviour(Arc::clone(behaviour), rng);
        }
    }

    /// Detach every attachment of `behaviour`.
    pub fn remove_behaviour(&mut self, behaviour: &Arc<Behaviour>) {
        self.behaviours
            .retain(|attached| !Arc::ptr_eq(attached.behaviour(), behaviour));
    }

    pub fn remove_all_behaviours(&mut self) {
        self.behaviours.clear();
    }

    pub fn behaviours(&self) -> &[AttachedBehaviour] {
        &self.behaviours
    }
}
