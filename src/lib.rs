//! # Ember - CPU particle simulation
//!
//! Emitters spawn particles, initializers give them their starting state, and
//! behaviours change them every tick. Ember advances the populations and tells
//! your renderer what happened; drawing is up to you.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ember::prelude::*;
//!
//! fn main() -> ember::Result<()> {
//!     let mut emitter = Emitter::new()
//!         .with_rate(Rate::new(Span::new(5.0, 10.0), 0.05))
//!         .with_position(Vec3::new(0.0, -150.0, 0.0));
//!     emitter
//!         .add_initializer(Initializer::life(Span::new(1.5, 2.5)))
//!         .add_initializer(Initializer::radial_velocity(Span::new(4.0, 6.0), Vec3::Y, 15.0));
//!     emitter.add_behaviour(Behaviour::gravity(4.0));
//!     emitter.add_behaviour(Behaviour::alpha(1.0, Some(Span::fixed(0.0))));
//!     emitter.emit(f32::INFINITY, EmitLife::Keep)?;
//!
//!     let mut system = System::new();
//!     system.add_emitter(emitter);
//!     loop {
//!         system.update(1.0 / 60.0);
//!     }
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Spans
//!
//! Almost every number you configure is a [`Span`]: a fixed value, a range,
//! a centered spread or a list to pick from. Each particle samples its own.
//!
//! ### Initializers
//!
//! One-shot setters run when a particle spawns: life, mass, radius, position
//! (from a [`Zone`]), rotation, velocity, and an opaque renderer body.
//!
//! ### Behaviours
//!
//! Per-tick mutators: alpha, scale, color and rotation over life, forces,
//! attraction, random drift, springs, collision and zone boundaries. A
//! behaviour is shared by every particle it is attached to; each attachment
//! keeps its own clock.
//!
//! ### Emitters and Systems
//!
//! An [`Emitter`] owns its particles and recycles dead ones through the
//! [`Pool`] of its [`System`]. Renderers implement [`Renderer`] and are
//! notified as particles are created, updated and retired.
//!
//! ## Units
//!
//! Velocities, forces and drift are authored in "game units" and scaled by
//! [`math::MEASURE`] (100) into simulation units. Angles are authored in
//! degrees and stored in radians.
//!
//! ## Data-driven setup
//!
//! [`config::SystemConfig`] describes systems in JSON. See the [`config`]
//! module for the accepted component names.

pub mod behaviour;
pub mod config;
pub mod emitter;
pub mod error;
pub mod events;
pub mod initializer;
pub mod integration;
pub mod math;
pub mod particle;
pub mod pool;
pub mod presets;
pub mod renderer;
pub mod span;
pub mod system;
pub mod zone;

pub use behaviour::{Behaviour, BehaviourKind, BehaviourTarget, RotateMode};
pub use emitter::{EmitLife, Emitter, EmitterId};
pub use error::{ParticleError, Result};
pub use events::{Event, EventDispatcher, EventKind, ListenerId};
pub use glam::{Vec2, Vec3};
pub use initializer::{Initializer, InitializerKind, Rate};
pub use integration::IntegrationType;
pub use math::{Easing, Polar3D, SimRng};
pub use particle::{BodyPayload, KinematicBody, Particle, Transform};
pub use pool::Pool;
pub use renderer::{Renderer, SharedRenderer};
pub use span::{ArraySpan, ColorSpan, Span};
pub use system::System;
pub use zone::{CrossType, Zone};

/// Convenient imports for typical use.
///
/// ```ignore
/// use ember::prelude::*;
/// ```
pub mod prelude {
    pub use crate::behaviour::{Behaviour, RotateMode};
    pub use crate::config::{EmitterConfig, SystemConfig};
    pub use crate::emitter::{EmitLife, Emitter, EmitterId};
    pub use crate::events::{Event, EventKind};
    pub use crate::initializer::{Initializer, Rate};
    pub use crate::integration::IntegrationType;
    pub use crate::math::{Easing, Polar3D};
    pub use crate::particle::{BodyPayload, Particle};
    pub use crate::presets;
    pub use crate::renderer::{self, Renderer};
    pub use crate::span::{ColorSpan, Span};
    pub use crate::system::System;
    pub use crate::zone::{BoxZone, CrossType, ScreenEdges, ScreenProjection, ScreenZone, Zone};
    pub use crate::Result;
    pub use glam::{Vec2, Vec3};
}
