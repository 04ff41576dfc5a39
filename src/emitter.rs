//! Particle emitters.
//!
//! An [`Emitter`] owns a population of particles. Each tick it spawns new ones
//! according to its [`Rate`], integrates and updates the live ones, and
//! recycles the dead ones through the shared [`Pool`].
//!
//! # Lifecycle
//!
//! ```text
//! idle ──emit()──► emitting ──stop_emit()──► draining ──► idle
//!                     │                        │
//!                     └──────destroy()─────────┴──► marked dead ──(no particles)──► torn down
//! ```
//!
//! Destroying an emitter that still has live particles only marks it: spawning
//! stops, but the particles live out their lives. Teardown (initializers and
//! behaviours dropped, [`Event::EmitterDead`] dispatched) happens on the first
//! update that finds the particle list empty.
//!
//! # Tick order
//!
//! 1. age the emitter
//! 2. spawn (`Rate` → `Pool` → initializers → behaviours attached)
//! 3. integrate the emitter, then each particle in reverse order; each particle
//!    is integrated and has its behaviours applied before the next one
//! 4. retire dead particles (reset and returned to the pool)
//! 5. apply emitter behaviours to the emitter itself
//! 6. tear down if marked dead or out of life
//!
//! # Example
//!
//! ```ignore
//! let mut emitter = Emitter::new()
//!     .with_rate(Rate::new(Span::new(10.0, 15.0), Span::fixed(0.05)))
//!     .with_position(Vec3::new(0.0, -100.0, 0.0));
//! emitter
//!     .add_initializer(Initializer::life(Span::new(1.0, 2.0)))
//!     .add_initializer(Initializer::radial_velocity(Span::new(2.0, 3.0), Vec3::Y, 20.0));
//! emitter.add_behaviour(Behaviour::gravity(2.0));
//! emitter.emit(f32::INFINITY, EmitLife::Keep)?;
//! ```

use crate::behaviour::{
    ApplyContext, AttachedBehaviour, Behaviour, BehaviourTarget,
};
use crate::error::{ParticleError, Result};
use crate::events::{Event, EventDispatcher, EventKind, ListenerId};
use crate::initializer::{InitTarget, Initializer, Rate};
use crate::integration::IntegrationType;
use crate::math::{euler_rotate, SimRng};
use crate::particle::{BodyPayload, KinematicBody, Particle, Transform};
use crate::pool::Pool;
use crate::renderer::SharedRenderer;
use glam::Vec3;
use rand::SeedableRng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_EMITTER_ID: AtomicU64 = AtomicU64::new(0);

/// Default per-step velocity damping.
pub const DEFAULT_DAMPING: f32 = 0.006;

/// Time fed to the rate for a single burst, large enough to fire any interval.
const BURST_TIME: f32 = 100_000.0;

/// Stable emitter identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmitterId(u64);

impl EmitterId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// How [`Emitter::emit`] treats the emitter's own life.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EmitLife {
    /// Leave the life unchanged.
    #[default]
    Keep,
    /// Live for as many seconds as there are emission seconds (one for a burst).
    Inherit,
    /// Live for exactly this many seconds.
    Seconds(f32),
}

/// Shared resources an emitter needs while updating.
pub struct EmitterContext<'a> {
    pub pool: &'a mut Pool,
    pub renderers: &'a [SharedRenderer],
    pub integration: IntegrationType,
    /// System-level dispatcher for particle events.
    pub events: Option<&'a mut EventDispatcher>,
}

impl<'a> EmitterContext<'a> {
    /// A context with only a pool: Euler integration, no observers.
    pub fn new(pool: &'a mut Pool) -> Self {
        Self {
            pool,
            renderers: &[],
            integration: IntegrationType::Euler,
            events: None,
        }
    }

    fn particle_created(&mut self, particle: &Particle) {
        for renderer in self.renderers {
            renderer.borrow_mut().on_particle_created(particle);
        }
        if let Some(events) = self.events.as_deref_mut() {
            events.dispatch(Event::ParticleCreated(particle));
        }
    }

    fn particle_updated(&mut self, particle: &Particle) {
        for renderer in self.renderers {
            renderer.borrow_mut().on_particle_update(particle);
        }
        if let Some(events) = self.events.as_deref_mut() {
            events.dispatch(Event::ParticleUpdate(particle));
        }
    }

    fn particle_dead(&mut self, particle: &Particle) {
        for renderer in self.renderers {
            renderer.borrow_mut().on_particle_dead(particle);
        }
        if let Some(events) = self.events.as_deref_mut() {
            events.dispatch(Event::ParticleDead(particle));
        }
    }
}

/// The emitter's own state, seen as a behaviour target.
struct EmitterBody<'a> {
    body: &'a mut KinematicBody,
    transform: &'a mut Transform,
}

impl BehaviourTarget for EmitterBody<'_> {
    fn motion(&self) -> &KinematicBody {
        self.body
    }

    fn motion_mut(&mut self) -> &mut KinematicBody {
        self.body
    }

    fn transform_mut(&mut self) -> &mut Transform {
        self.transform
    }
}

/// Spawns, updates and retires particles.
#[derive(Debug)]
pub struct Emitter {
    id: EmitterId,
    pub name: String,
    index: usize,

    /// The emitter's own kinematic state (position, velocity, life, ...).
    pub body: KinematicBody,
    pub transform: Transform,

    particles: Vec<Box<Particle>>,
    initializers: Vec<Initializer>,
    behaviours: Vec<Arc<Behaviour>>,
    emitter_behaviours: Vec<AttachedBehaviour>,
    rate: Rate,

    current_emit_time: f32,
    total_emit_times: f32,
    is_emitting: bool,
    torn_down: bool,

    /// Velocity is scaled by `1 - damping` every integration step.
    pub damping: f32,
    /// Spawn relative to the emitter's position, velocity and rotation.
    pub bind_emitter: bool,
    /// Also dispatch particle created/dead events on this emitter.
    pub bind_emitter_event: bool,

    rng: SimRng,
    events: EventDispatcher,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    /// An idle emitter with the default `Rate(1, 0.1)`.
    pub fn new() -> Self {
        let id = EmitterId(NEXT_EMITTER_ID.fetch_add(1, Ordering::Relaxed));
        let mut rng = SimRng::from_entropy();
        let mut rate = Rate::default();
        rate.init(&mut rng);

        Self {
            id,
            name: format!("emitter-{}", id.0),
            index: 0,
            body: KinematicBody::default(),
            transform: Transform::default(),
            particles: Vec::new(),
            initializers: Vec::new(),
            behaviours: Vec::new(),
            emitter_behaviours: Vec::new(),
            rate,
            current_emit_time: 0.0,
            total_emit_times: -1.0,
            is_emitting: false,
            torn_down: false,
            damping: DEFAULT_DAMPING,
            bind_emitter: true,
            bind_emitter_event: false,
            rng,
            events: EventDispatcher::new(),
        }
    }

    // ========== Builder ==========

    /// Replace the random source with a seeded one.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SimRng::seed_from_u64(seed);
        self.rate.init(&mut self.rng);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_rate(mut self, rate: Rate) -> Self {
        self.set_rate(rate);
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.body.position = position;
        self
    }

    /// Euler angles in radians.
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.body.rotation = rotation;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_bind_emitter(mut self, bind: bool) -> Self {
        self.bind_emitter = bind;
        self
    }

    pub fn with_bind_emitter_event(mut self, bind: bool) -> Self {
        self.bind_emitter_event = bind;
        self
    }

    // ========== Accessors ==========

    pub fn id(&self) -> EmitterId {
        self.id
    }

    /// Position in the owning system's emitter list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn particles(&self) -> &[Box<Particle>] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Box<Particle>] {
        &mut self.particles
    }

    /// Number of live particles.
    pub fn count(&self) -> usize {
        self.particles.len()
    }

    pub fn initializers(&self) -> &[Initializer] {
        &self.initializers
    }

    pub fn behaviours(&self) -> &[Arc<Behaviour>] {
        &self.behaviours
    }

    pub fn emitter_behaviours(&self) -> &[AttachedBehaviour] {
        &self.emitter_behaviours
    }

    pub fn rate(&self) -> &Rate {
        &self.rate
    }

    pub fn is_emitting(&self) -> bool {
        self.is_emitting
    }

    pub fn total_emit_times(&self) -> f32 {
        self.total_emit_times
    }

    pub fn current_emit_time(&self) -> f32 {
        self.current_emit_time
    }

    /// Marked dead (possibly still draining).
    pub fn is_dead(&self) -> bool {
        self.body.dead
    }

    /// Fully torn down; the owning system drops it on its next update.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn rng_mut(&mut self) -> &mut SimRng {
        &mut self.rng
    }

    pub fn events_mut(&mut self) -> &mut EventDispatcher {
        &mut self.events
    }

    pub fn add_event_listener<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&Event<'_>) + 'static,
    {
        self.events.add_listener(kind, listener)
    }

    // ========== Configuration ==========

    /// Replace the rate and restart its clock.
    pub fn set_rate(&mut self, mut rate: Rate) {
        rate.init(&mut self.rng);
        self.rate = rate;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.body.position = position;
    }

    /// Euler angles in radians.
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.body.rotation = rotation;
    }

    pub fn add_initializer(&mut self, initializer: Initializer) -> &mut Self {
        self.initializers.push(initializer);
        self
    }

    pub fn add_initializers(&mut self, initializers: impl IntoIterator<Item = Initializer>) -> &mut Self {
        self.initializers.extend(initializers);
        self
    }

    pub fn remove_initializer(&mut self, index: usize) -> Option<Initializer> {
        (index < self.initializers.len()).then(|| self.initializers.remove(index))
    }

    pub fn remove_all_initializers(&mut self) {
        self.initializers.clear();
    }

    /// Apply this emitter's initializers to the emitter itself.
    pub fn initialize_self(&mut self) {
        let Emitter {
            initializers,
            body,
            transform,
            rng,
            ..
        } = self;
        for initializer in initializers.iter_mut().rev() {
            initializer.init(
                InitTarget::Emitter {
                    body: &mut *body,
                    transform: &mut *transform,
                },
                rng,
            );
        }
    }

    /// Register a behaviour for every particle spawned from now on.
    pub fn add_behaviour(&mut self, behaviour: Behaviour) -> Arc<Behaviour> {
        let behaviour = Arc::new(behaviour);
        self.behaviours.push(Arc::clone(&behaviour));
        behaviour
    }

    /// Register an already shared behaviour (e.g. one used by several emitters).
    pub fn add_shared_behaviour(&mut self, behaviour: Arc<Behaviour>) {
        self.behaviours.push(behaviour);
    }

    pub fn add_behaviours(&mut self, behaviours: impl IntoIterator<Item = Behaviour>) {
        for behaviour in behaviours {
            self.add_behaviour(behaviour);
        }
    }

    /// Unregister a behaviour and detach it from live particles.
    pub fn remove_behaviour(&mut self, behaviour: &Arc<Behaviour>) {
        self.behaviours.retain(|b| !Arc::ptr_eq(b, behaviour));
        for particle in &mut self.particles {
            particle.remove_behaviour(behaviour);
        }
    }

    /// Unregister every behaviour. Live particles keep theirs.
    pub fn remove_all_behaviours(&mut self) {
        self.behaviours.clear();
    }

    /// Attach a behaviour to the emitter itself.
    pub fn add_emitter_behaviour(&mut self, behaviour: Behaviour) -> Arc<Behaviour> {
        let behaviour = Arc::new(behaviour);
        let mut attached = AttachedBehaviour::new(Arc::clone(&behaviour));
        let mut target = EmitterBody {
            body: &mut self.body,
            transform: &mut self.transform,
        };
        attached.initialize(&mut target, &mut self.rng);
        self.emitter_behaviours.push(attached);
        behaviour
    }

    pub fn remove_emitter_behaviour(&mut self, behaviour: &Arc<Behaviour>) {
        self.emitter_behaviours
            .retain(|attached| !Arc::ptr_eq(attached.behaviour(), behaviour));
    }

    /// Whether every initializer has its resources (textures) resolved.
    pub fn is_ready(&self) -> bool {
        self.initializers.iter().all(Initializer::is_ready)
    }

    /// Resolve pending texture initializers.
    pub fn resolve_textures<F>(&mut self, mut resolver: F) -> Result<()>
    where
        F: FnMut(&str) -> Result<BodyPayload>,
    {
        for initializer in &mut self.initializers {
            initializer.resolve_texture(&mut resolver)?;
        }
        Ok(())
    }

    // ========== Emission control ==========

    /// Start emitting for `total_emit_times` seconds (`1.0` is a single burst,
    /// `f32::INFINITY` runs until stopped).
    ///
    /// Fails while a texture initializer is unresolved.
    pub fn emit(&mut self, total_emit_times: f32, life: EmitLife) -> Result<()> {
        if let Some(pending) = self.initializers.iter().find(|i| !i.is_ready()) {
            return Err(ParticleError::InitializerNotReady(pending.type_name()));
        }

        self.current_emit_time = 0.0;
        self.total_emit_times = total_emit_times;
        match life {
            EmitLife::Keep => {}
            EmitLife::Inherit => self.body.life = total_emit_times,
            EmitLife::Seconds(seconds) => self.body.life = seconds,
        }
        self.rate.init(&mut self.rng);
        self.is_emitting = true;
        log::trace!(
            "Emitter '{}' emitting for {} with life {}",
            self.name,
            total_emit_times,
            self.body.life
        );
        Ok(())
    }

    /// Stop spawning. Live particles carry on.
    pub fn stop_emit(&mut self) {
        self.is_emitting = false;
        self.total_emit_times = -1.0;
        self.current_emit_time = 0.0;
    }

    /// Kill every live particle; they are retired on the next update.
    pub fn remove_all_particles(&mut self) {
        for particle in &mut self.particles {
            particle.destroy();
        }
    }

    /// Mark the emitter dead. Tears down now if no particles remain, otherwise
    /// on the first update that finds none.
    pub fn destroy(&mut self) {
        self.body.dead = true;
        self.body.energy = 0.0;
        self.total_emit_times = -1.0;

        if self.particles.is_empty() && !self.torn_down {
            self.teardown();
        }
    }

    fn teardown(&mut self) {
        self.is_emitting = false;
        self.torn_down = true;
        self.remove_all_initializers();
        self.remove_all_behaviours();
        self.emitter_behaviours.clear();
        log::debug!("Emitter '{}' torn down", self.name);
        self.events.dispatch(Event::EmitterDead(self.id));
    }

    // ========== Update ==========

    /// Advance the emitter and its particles by `time` seconds.
    pub fn update(&mut self, time: f32, ctx: &mut EmitterContext<'_>) {
        if self.torn_down {
            return;
        }
        if !self.is_emitting && self.particles.is_empty() && !self.body.dead {
            return;
        }

        self.body.age += time;

        if self.is_emitting {
            self.generate(time, ctx);
        }
        self.integrate(time, ctx);
        self.retire(ctx);
        self.update_emitter_behaviours(time);

        if self.body.dead || self.body.age >= self.body.life {
            self.destroy();
        }
    }

    fn generate(&mut self, time: f32, ctx: &mut EmitterContext<'_>) {
        if self.total_emit_times == 1.0 {
            let count = self.rate.value(BURST_TIME, &mut self.rng);
            self.create_particles(count, ctx);
            self.total_emit_times = 0.0;
        } else {
            self.current_emit_time += time;
            if self.current_emit_time < self.total_emit_times {
                let count = self.rate.value(time, &mut self.rng);
                self.create_particles(count, ctx);
            }
        }
    }

    fn create_particles(&mut self, count: u32, ctx: &mut EmitterContext<'_>) {
        for _ in 0..count {
            let mut particle = ctx.pool.get::<Particle>();
            self.setup_particle(&mut particle);

            ctx.particle_created(&particle);
            if self.bind_emitter_event {
                self.events.dispatch(Event::ParticleCreated(&particle));
            }
            self.particles.push(particle);
        }
        if count > 0 {
            log::trace!("Emitter '{}' spawned {} particles", self.name, count);
        }
    }

    fn setup_particle(&mut self, particle: &mut Particle) {
        for initializer in self.initializers.iter_mut().rev() {
            initializer.init(InitTarget::Particle(&mut *particle), &mut self.rng);
        }

        if self.bind_emitter {
            let motion = &mut particle.motion;
            motion.position += self.body.position;
            motion.velocity += self.body.velocity;
            motion.acceleration += self.body.acceleration;
            motion.velocity = euler_rotate(motion.velocity, self.body.rotation);
        }

        particle.add_behaviours(&self.behaviours, &mut self.rng);
        particle.set_parent(Some(self.id));
    }

    fn integrate(&mut self, time: f32, ctx: &mut EmitterContext<'_>) {
        let integration = ctx.integration;
        integration.integrate(&mut self.body, time, self.damping);

        let Emitter {
            particles,
            rng,
            damping,
            ..
        } = self;

        for index in (0..particles.len()).rev() {
            let (head, neighbours) = particles.split_at_mut(index + 1);
            let particle = &mut head[index];

            integration.integrate(&mut particle.motion, time, *damping);
            let mut apply = ApplyContext::new(rng, neighbours);
            particle.update(time, index, &mut apply);

            ctx.particle_updated(particle);
        }
    }

    fn retire(&mut self, ctx: &mut EmitterContext<'_>) {
        let mut retired = 0;
        for index in (0..self.particles.len()).rev() {
            if !self.particles[index].is_dead() {
                continue;
            }
            let mut particle = self.particles.remove(index);

            ctx.particle_dead(&particle);
            if self.bind_emitter_event {
                self.events.dispatch(Event::ParticleDead(&particle));
            }

            particle.reset();
            ctx.pool.expire(particle);
            retired += 1;
        }

        if retired > 0 && self.particles.is_empty() {
            self.events.dispatch(Event::EmitterDrained(self.id));
        }
    }

    fn update_emitter_behaviours(&mut self, time: f32) {
        let Emitter {
            emitter_behaviours,
            body,
            transform,
            rng,
            ..
        } = self;
        let mut target = EmitterBody { body, transform };
        let mut ctx = ApplyContext::new(rng, &mut []);
        for (index, attached) in emitter_behaviours.iter_mut().enumerate() {
            attached.apply(&mut target, time, index, &mut ctx);
        }
    }
}
