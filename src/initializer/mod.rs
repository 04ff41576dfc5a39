//! One-shot property setters.
//!
//! Initializers run once per spawned particle, before behaviours attach. An
//! emitter applies its initializers highest index first. They can also be
//! pointed at the emitter itself (to place or launch it).
//!
//! # Available Initializers
//!
//! | Initializer | Constructor | Sets |
//! |-------------|-------------|------|
//! | Life | [`Initializer::life`] | `life` (seconds; infinity never expires) |
//! | Mass | [`Initializer::mass`] | `mass` |
//! | Radius | [`Initializer::radius`] | `radius` and the scale baseline |
//! | Position | [`Initializer::position`] | `position`, from a random zone |
//! | Rotation | [`Initializer::rotation`] | `rotation` (degrees in, radians stored) |
//! | Body | [`Initializer::body`] | opaque renderer payload (particles only) |
//! | Texture | [`Initializer::texture`] | texture payload, once resolved (particles only) |
//! | PolarVelocity | [`Initializer::polar_velocity`] | `velocity` |
//! | RadialVelocity | [`Initializer::radial_velocity`] | `velocity` |
//! | VectorVelocity | [`Initializer::vector_velocity`] | `velocity` |
//!
//! Emission timing is not an initializer; see [`Rate`].
//!
//! # Example
//!
//! ```ignore
//! emitter
//!     .add_initializer(Initializer::life(Span::new(2.0, 3.0)))
//!     .add_initializer(Initializer::position(vec![Zone::sphere(Vec3::ZERO, 5.0)]))
//!     .add_initializer(Initializer::radial_velocity(Span::new(3.0, 5.0), Vec3::Y, 30.0));
//! ```

mod body;
mod position;
mod rate;
mod rotation;
mod velocity;

pub use body::{Body, Texture};
pub use position::Position;
pub use rate::Rate;
pub use rotation::Rotation;
pub use velocity::{Velocity, VelocityKind};

use crate::error::Result;
use crate::math::{Polar3D, SimRng};
use crate::particle::{BodyPayload, KinematicBody, Particle, Transform};
use crate::span::{ArraySpan, Span};
use crate::zone::Zone;
use glam::Vec3;

/// What an initializer is applied to.
pub enum InitTarget<'a> {
    Particle(&'a mut Particle),
    /// An emitter's own state.
    Emitter {
        body: &'a mut KinematicBody,
        transform: &'a mut Transform,
    },
}

impl InitTarget<'_> {
    fn body(&mut self) -> &mut KinematicBody {
        match self {
            InitTarget::Particle(particle) => &mut particle.motion,
            InitTarget::Emitter { body, .. } => &mut **body,
        }
    }

    fn transform(&mut self) -> &mut Transform {
        match self {
            InitTarget::Particle(particle) => &mut particle.transform,
            InitTarget::Emitter { transform, .. } => &mut **transform,
        }
    }
}

/// What an initializer sets.
#[derive(Clone, Debug)]
pub enum InitializerKind {
    Life(Span),
    Mass(Span),
    Radius(Span),
    Position(Position),
    Rotation(Rotation),
    Body(Body),
    Texture(Texture),
    Velocity(Velocity),
}

/// A one-shot property setter.
#[derive(Clone, Debug)]
pub struct Initializer {
    pub enabled: bool,
    initialized: bool,
    pub kind: InitializerKind,
}

impl Initializer {
    pub fn new(kind: InitializerKind) -> Self {
        Self {
            enabled: true,
            initialized: false,
            kind,
        }
    }

    // ========== Constructors ==========

    pub fn life(span: impl Into<Span>) -> Self {
        Self::new(InitializerKind::Life(span.into()))
    }

    pub fn mass(span: impl Into<Span>) -> Self {
        Self::new(InitializerKind::Mass(span.into()))
    }

    pub fn radius(span: impl Into<Span>) -> Self {
        Self::new(InitializerKind::Radius(span.into()))
    }

    pub fn position(zones: Vec<Zone>) -> Self {
        Self::new(InitializerKind::Position(Position::new(zones)))
    }

    /// Angles in degrees.
    pub fn rotation(x: impl Into<Span>, y: impl Into<Span>, z: impl Into<Span>) -> Self {
        Self::new(InitializerKind::Rotation(Rotation::new(
            x.into(),
            y.into(),
            z.into(),
        )))
    }

    pub fn body(bodies: impl Into<ArraySpan<BodyPayload>>, width: f32, height: f32) -> Self {
        Self::new(InitializerKind::Body(Body::new(bodies.into(), width, height)))
    }

    /// A texture that must be resolved before the emitter can spawn.
    pub fn texture(path: impl Into<String>) -> Self {
        Self::new(InitializerKind::Texture(Texture::new(path)))
    }

    /// Velocity from spherical coordinates, scattered within a `theta`° cone.
    pub fn polar_velocity(polar: Polar3D, theta: f32) -> Self {
        Self::velocity(VelocityKind::Polar(polar), theta)
    }

    /// Sampled speed along `direction`, scattered within a `theta`° cone.
    pub fn radial_velocity(speed: impl Into<Span>, direction: Vec3, theta: f32) -> Self {
        Self::velocity(
            VelocityKind::Radial {
                speed: speed.into(),
                direction,
            },
            theta,
        )
    }

    /// Velocity `v` (game units), scattered within a `theta`° cone.
    pub fn vector_velocity(v: Vec3, theta: f32) -> Self {
        Self::velocity(VelocityKind::Vector(v), theta)
    }

    fn velocity(kind: VelocityKind, theta: f32) -> Self {
        Self::new(InitializerKind::Velocity(Velocity::new(kind, theta)))
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    // ========== Introspection ==========

    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            InitializerKind::Life(_) => "Life",
            InitializerKind::Mass(_) => "Mass",
            InitializerKind::Radius(_) => "Radius",
            InitializerKind::Position(_) => "Position",
            InitializerKind::Rotation(_) => "Rotation",
            InitializerKind::Body(_) => "Body",
            InitializerKind::Texture(_) => "Texture",
            InitializerKind::Velocity(v) => match v.kind {
                VelocityKind::Polar(_) => "PolarVelocity",
                VelocityKind::Radial { .. } => "RadialVelocity",
                VelocityKind::Vector(_) => "VectorVelocity",
            },
        }
    }

    /// Whether this initializer has run at least once.
    pub fn has_been_initialized(&self) -> bool {
        self.initialized
    }

    /// False while a texture is awaiting resolution.
    pub fn is_ready(&self) -> bool {
        match &self.kind {
            InitializerKind::Texture(texture) => texture.is_resolved(),
            _ => true,
        }
    }

    /// Resolve a pending texture. Other kinds are untouched.
    pub fn resolve_texture<F>(&mut self, resolver: &mut F) -> Result<()>
    where
        F: FnMut(&str) -> Result<BodyPayload>,
    {
        match &mut self.kind {
            InitializerKind::Texture(texture) => texture.resolve(resolver),
            _ => Ok(()),
        }
    }

    // ========== Apply ==========

    /// Apply to `target`. Disabled initializers do nothing.
    pub fn init(&mut self, mut target: InitTarget<'_>, rng: &mut SimRng) {
        if !self.enabled {
            return;
        }

        match &mut self.kind {
            InitializerKind::Life(span) => target.body().life = span.value(rng),
            InitializerKind::Mass(span) => target.body().mass = span.value(rng),
            InitializerKind::Radius(span) => {
                let radius = span.value(rng);
                target.body().radius = radius;
                target.transform().old_radius = radius;
            }
            InitializerKind::Position(position) => {
                target.body().position = position.sample(rng);
            }
            InitializerKind::Rotation(rotation) => {
                target.body().rotation = rotation.sample(rng);
            }
            InitializerKind::Velocity(velocity) => {
                target.body().velocity = velocity.sample(rng);
            }
            InitializerKind::Body(body) => {
                if let InitTarget::Particle(particle) = target {
                    body.init(particle, rng);
                }
            }
            InitializerKind::Texture(texture) => {
                if let InitTarget::Particle(particle) = target {
                    texture.init(particle);
                }
            }
        }

        self.initialized = true;
    }
}
