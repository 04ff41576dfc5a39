//! Per-tick mutators.
//!
//! A [`Behaviour`] is shared configuration. Emitters hold behaviours as
//! `Arc<Behaviour>` templates and attach them to every particle they spawn;
//! each attachment ([`AttachedBehaviour`]) carries its own [`BehaviourState`]
//! clock so that particles age their behaviours independently.
//!
//! # Available Behaviours
//!
//! | Behaviour | Constructor | Effect |
//! |-----------|-------------|--------|
//! | Alpha | [`Behaviour::alpha`] | fades `alpha` from `a` to `b` over the particle's life |
//! | Color | [`Behaviour::color`] | blends `color` from `a` to `b` |
//! | Scale | [`Behaviour::scale`] | scales `scale` and `radius` from `a` to `b` |
//! | Rotate | [`Behaviour::rotate`] | orients, sets, interpolates or spins rotation |
//! | Force | [`Behaviour::force`] | constant acceleration |
//! | Gravity | [`Behaviour::gravity`] | downward force |
//! | Attraction | [`Behaviour::attraction`] | pull toward a point, fading with distance |
//! | Repulsion | [`Behaviour::repulsion`] | push from a point |
//! | RandomDrift | [`Behaviour::random_drift`] | random kicks at intervals |
//! | Spring | [`Behaviour::spring`] | pull toward an anchor proportional to distance |
//! | Collision | [`Behaviour::collision`] | pairwise sphere separation within an emitter |
//! | CrossZone | [`Behaviour::cross_zone`] | zone boundary policy |
//!
//! # Ordering
//!
//! Behaviours run last-added first. They do not commute (a zone bound after a
//! force differs from a force after a bound), so registration order matters.
//!
//! # Lifetimes
//!
//! A behaviour has its own `life` (default unbounded). Once an attachment's age
//! reaches it, the attachment is marked dead and stops mutating, but stays
//! attached until the particle is reset.
//!
//! # Example
//!
//! ```ignore
//! emitter.add_behaviour(Behaviour::alpha(1.0, Some(0.0.into())));
//! emitter.add_behaviour(Behaviour::gravity(3.0));
//! emitter.add_behaviour(Behaviour::random_drift(5.0, 5.0, 5.0, 0.05).with_life(2.0));
//! ```

mod alpha;
mod attraction;
mod collision;
mod color;
mod cross_zone;
mod force;
mod random_drift;
mod rotate;
mod scale;
mod spring;

pub use alpha::Alpha;
pub use attraction::Attraction;
pub use collision::{Collision, CollisionCallback};
pub use color::Color;
pub use cross_zone::CrossZone;
pub use force::Force;
pub use random_drift::RandomDrift;
pub use rotate::{Rotate, RotateMode};
pub use scale::Scale;
pub use spring::Spring;

use crate::math::{Easing, SimRng};
use crate::particle::{energy_for, KinematicBody, Particle, Transform};
use crate::span::{ColorSpan, Span};
use crate::zone::Zone;
use glam::Vec3;
use std::sync::Arc;

// ========== Targets ==========

/// Anything a behaviour can act on: particles, and emitters themselves.
pub trait BehaviourTarget {
    fn motion(&self) -> &KinematicBody;
    fn motion_mut(&mut self) -> &mut KinematicBody;
    fn transform_mut(&mut self) -> &mut Transform;

    /// The particle behind this target, if it is one.
    ///
    /// Appearance behaviours (alpha, color) only act on particles.
    fn as_particle_mut(&mut self) -> Option<&mut Particle> {
        None
    }
}

impl BehaviourTarget for Particle {
    fn motion(&self) -> &KinematicBody {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut KinematicBody {
        &mut self.motion
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn as_particle_mut(&mut self) -> Option<&mut Particle> {
        Some(self)
    }
}

/// Per-tick inputs handed to behaviours.
pub struct ApplyContext<'a> {
    pub rng: &'a mut SimRng,
    /// Particles after the current one in its emitter (for collision).
    pub neighbours: &'a mut [Box<Particle>],
}

impl<'a> ApplyContext<'a> {
    pub fn new(rng: &'a mut SimRng, neighbours: &'a mut [Box<Particle>]) -> Self {
        Self { rng, neighbours }
    }
}

// ========== Behaviour ==========

/// What a behaviour does.
#[derive(Clone, Debug)]
pub enum BehaviourKind {
    Alpha(Alpha),
    Color(Color),
    Scale(Scale),
    Rotate(Rotate),
    Force(Force),
    Attraction(Attraction),
    RandomDrift(RandomDrift),
    Spring(Spring),
    Collision(Collision),
    CrossZone(CrossZone),
}

/// Shared behaviour configuration.
#[derive(Clone, Debug)]
pub struct Behaviour {
    /// Lifetime of each attachment in seconds.
    pub life: f32,
    pub easing: Easing,
    pub enabled: bool,
    pub kind: BehaviourKind,
}

impl Behaviour {
    pub fn new(kind: BehaviourKind) -> Self {
        Self {
            life: f32::INFINITY,
            easing: Easing::Linear,
            enabled: true,
            kind,
        }
    }

    // ========== Constructors ==========

    /// Fade alpha from `a` at birth to `b` at death (`b` defaults to `a`).
    pub fn alpha(a: impl Into<Span>, b: Option<Span>) -> Self {
        Self::new(BehaviourKind::Alpha(Alpha::new(a.into(), b)))
    }

    /// Blend color from `a` at birth to `b` at death (`b` defaults to `a`).
    pub fn color(a: impl Into<ColorSpan>, b: Option<ColorSpan>) -> Self {
        Self::new(BehaviourKind::Color(Color::new(a.into(), b)))
    }

    /// Scale from `a` at birth to `b` at death (`b` defaults to `a`).
    pub fn scale(a: impl Into<Span>, b: Option<Span>) -> Self {
        Self::new(BehaviourKind::Scale(Scale::new(a.into(), b)))
    }

    /// Rotation with the mode inferred from which angles are given (degrees):
    /// none orients along velocity, `x` alone sets, `x` and `y` interpolate,
    /// all three spin.
    pub fn rotate(x: Option<Span>, y: Option<Span>, z: Option<Span>) -> Self {
        Self::new(BehaviourKind::Rotate(Rotate::infer(x, y, z)))
    }

    pub fn rotate_mode(mode: RotateMode) -> Self {
        Self::new(BehaviourKind::Rotate(Rotate::new(mode)))
    }

    /// Constant force in game units.
    pub fn force(fx: f32, fy: f32, fz: f32) -> Self {
        Self::new(BehaviourKind::Force(Force::new(Vec3::new(fx, fy, fz))))
    }

    /// Downward force of magnitude `g`.
    pub fn gravity(g: f32) -> Self {
        Self::force(0.0, -g, 0.0)
    }

    /// Pull toward `target` within `radius`.
    pub fn attraction(target: Vec3, force: f32, radius: f32) -> Self {
        Self::new(BehaviourKind::Attraction(Attraction::new(target, force, radius)))
    }

    /// Push away from `target` within `radius`.
    pub fn repulsion(target: Vec3, force: f32, radius: f32) -> Self {
        Self::attraction(target, -force, radius)
    }

    /// Random acceleration kicks of up to `(dx, dy, dz)` every `delay` seconds.
    pub fn random_drift(dx: f32, dy: f32, dz: f32, delay: impl Into<Span>) -> Self {
        Self::new(BehaviourKind::RandomDrift(RandomDrift::new(
            Vec3::new(dx, dy, dz),
            delay.into(),
        )))
    }

    /// Hooke-style pull toward `anchor`.
    pub fn spring(anchor: Vec3, spring: f32, friction: f32) -> Self {
        Self::new(BehaviourKind::Spring(Spring::new(anchor, spring, friction)))
    }

    /// Separate overlapping particles of the same emitter.
    pub fn collision(use_mass: bool, on_collide: Option<CollisionCallback>) -> Self {
        Self::new(BehaviourKind::Collision(Collision::new(use_mass, on_collide)))
    }

    /// Enforce `zone`'s boundary policy.
    pub fn cross_zone(zone: Zone) -> Self {
        Self::new(BehaviourKind::CrossZone(CrossZone::new(zone)))
    }

    // ========== Builder ==========

    pub fn with_life(mut self, life: f32) -> Self {
        self.life = life;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Short type name, as used by data-driven configuration.
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            BehaviourKind::Alpha(_) => "Alpha",
            BehaviourKind::Color(_) => "Color",
            BehaviourKind::Scale(_) => "Scale",
            BehaviourKind::Rotate(_) => "Rotate",
            BehaviourKind::Force(_) => "Force",
            BehaviourKind::Attraction(_) => "Attraction",
            BehaviourKind::RandomDrift(_) => "RandomDrift",
            BehaviourKind::Spring(_) => "Spring",
            BehaviourKind::Collision(_) => "Collision",
            BehaviourKind::CrossZone(_) => "CrossZone",
        }
    }

    // ========== Lifecycle ==========

    /// Per-target setup, run once when attached.
    pub fn initialize(&self, target: &mut dyn BehaviourTarget, rng: &mut SimRng) {
        match &self.kind {
            BehaviourKind::Alpha(b) => b.initialize(target, rng),
            BehaviourKind::Color(b) => b.initialize(target, rng),
            BehaviourKind::Scale(b) => b.initialize(target, rng),
            BehaviourKind::Rotate(b) => b.initialize(target, rng),
            BehaviourKind::Force(_)
            | BehaviourKind::Attraction(_)
            | BehaviourKind::RandomDrift(_)
            | BehaviourKind::Spring(_)
            | BehaviourKind::Collision(_)
            | BehaviourKind::CrossZone(_) => {}
        }
    }

    /// Advance `state` by `time`. Returns whether the attachment is still live.
    ///
    /// Energy follows the target's age, not the attachment's own.
    pub fn energize(&self, target: &KinematicBody, state: &mut BehaviourState, time: f32) -> bool {
        if state.dead {
            return false;
        }
        state.age += time;
        if state.age >= self.life {
            state.energy = 0.0;
            state.dead = true;
            return false;
        }
        state.energy = energy_for(self.easing, target.age, target.life);
        true
    }

    /// Energize, then apply the effect if the attachment is still live.
    pub fn mutate(
        &self,
        target: &mut dyn BehaviourTarget,
        state: &mut BehaviourState,
        time: f32,
        ctx: &mut ApplyContext<'_>,
    ) {
        if !self.energize(target.motion(), state, time) {
            return;
        }

        match &self.kind {
            BehaviourKind::Alpha(b) => b.mutate(target),
            BehaviourKind::Color(b) => b.mutate(target),
            BehaviourKind::Scale(b) => b.mutate(target),
            BehaviourKind::Rotate(b) => b.mutate(target),
            BehaviourKind::Force(b) => b.mutate(target),
            BehaviourKind::Attraction(b) => b.mutate(target),
            BehaviourKind::RandomDrift(b) => b.mutate(target, state, time, ctx.rng),
            BehaviourKind::Spring(b) => b.mutate(target),
            BehaviourKind::Collision(b) => b.mutate(target, ctx.neighbours),
            BehaviourKind::CrossZone(b) => b.mutate(target),
        }
    }
}

// ========== Attachments ==========

/// Per-attachment clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BehaviourState {
    pub age: f32,
    pub energy: f32,
    pub dead: bool,
    /// Time since the last drift kick.
    pub timer: f32,
    /// Delay drawn for the current drift cycle.
    pub next_delay: f32,
}

impl Default for BehaviourState {
    fn default() -> Self {
        Self {
            age: 0.0,
            energy: 1.0,
            dead: false,
            timer: 0.0,
            next_delay: 0.0,
        }
    }
}

/// A behaviour attached to one target.
#[derive(Clone, Debug)]
pub struct AttachedBehaviour {
    behaviour: Arc<Behaviour>,
    pub state: BehaviourState,
}

impl AttachedBehaviour {
    pub fn new(behaviour: Arc<Behaviour>) -> Self {
        Self {
            behaviour,
            state: BehaviourState::default(),
        }
    }

    pub fn behaviour(&self) -> &Arc<Behaviour> {
        &self.behaviour
    }

    pub fn initialize(&mut self, target: &mut dyn BehaviourTarget, rng: &mut SimRng) {
        self.behaviour.initialize(target, rng);
        if let BehaviourKind::RandomDrift(drift) = &self.behaviour.kind {
            drift.initialize(&mut self.state, rng);
        }
    }

    /// Run one tick. No-op when the behaviour is disabled.
    pub fn apply(
        &mut self,
        target: &mut dyn BehaviourTarget,
        time: f32,
        _index: usize,
        ctx: &mut ApplyContext<'_>,
    ) {
        if !self.behaviour.enabled {
            return;
        }
        self.behaviour.mutate(target, &mut self.state, time, ctx);
    }
}
