//! Declarative emitter descriptions.
//!
//! A [`SystemConfig`] is a list of [`EmitterConfig`]s that can be written as
//! JSON and built into a running [`System`]. Initializers, behaviours and
//! zones are [`ComponentConfig`]s: a type name plus a property bag whose shape
//! depends on the type.
//!
//! Only names on the allowlists below are accepted. Unknown names fail with an
//! `Unsupported*` error before anything is constructed.
//!
//! | Component | Accepted `type` names |
//! |-----------|-----------------------|
//! | initializer | `Life`, `Mass`, `Radius`, `Position`, `Rotation`, `Texture`, `PolarVelocity`, `RadialVelocity`, `VectorVelocity` |
//! | behaviour | `Alpha`, `Attraction`, `Color`, `Force`, `Gravity`, `RandomDrift`, `Repulsion`, `Rotate`, `Scale`, `Spring` |
//! | zone (inside `Position`) | `PointZone`, `LineZone`, `BoxZone`, `SphereZone` |
//!
//! Components that hold callbacks or external geometry (`Body`, `Collision`,
//! `CrossZone`, `MeshZone`, `ScreenZone`) are runtime-only.
//!
//! # Example
//!
//! ```json
//! {
//!   "emitters": [{
//!     "name": "fountain",
//!     "position": [0, -150, 0],
//!     "rate": { "count": [5, 10], "interval": 0.05 },
//!     "emission": {},
//!     "initializers": [
//!       { "type": "Life", "properties": { "life": [1.5, 2.5] } },
//!       { "type": "RadialVelocity", "properties": { "speed": [4, 6], "direction": [0, 1, 0], "theta": 15 } }
//!     ],
//!     "behaviours": [
//!       { "type": "Gravity", "properties": { "g": 4 } },
//!       { "type": "Alpha", "properties": { "a": 1, "b": 0 } }
//!     ]
//!   }]
//! }
//! ```

mod behaviours;
mod initializers;
mod zones;

pub use behaviours::BEHAVIOUR_TYPES;
pub use initializers::INITIALIZER_TYPES;
pub use zones::ZONE_TYPES;

use crate::emitter::{EmitLife, Emitter, DEFAULT_DAMPING};
use crate::error::{ParticleError, Result};
use crate::initializer::Rate;
use crate::integration::IntegrationType;
use crate::span::Span;
use crate::system::System;
use glam::Vec3;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_damping() -> f32 {
    DEFAULT_DAMPING
}

// ========== Components ==========

/// A named component and its properties.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ComponentConfig {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub properties: Value,
}

impl ComponentConfig {
    pub fn new(type_name: impl Into<String>, properties: Value) -> Self {
        Self {
            type_name: type_name.into(),
            properties,
        }
    }

    /// Deserialize the property bag into its typed form.
    pub(crate) fn properties<T: DeserializeOwned>(&self) -> Result<T> {
        let bag = if self.properties.is_null() {
            Value::Object(Default::default())
        } else {
            self.properties.clone()
        };
        serde_json::from_value(bag).map_err(|source| ParticleError::InvalidProperties {
            type_name: self.type_name.clone(),
            source,
        })
    }
}

// ========== Spans ==========

/// Keywords accepted where a span is expected.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SpanKeyword {
    Infinity,
}

/// A [`Span`] in config form.
///
/// `2.0` is fixed, `[1, 3]` a range, `[1, 2, 5]` a pick from the list,
/// `{ "a": 10, "b": 2, "center": true }` a centered spread, and
/// `"infinity"` an infinite value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SpanConfig {
    Fixed(f32),
    Keyword(SpanKeyword),
    Values(Vec<f32>),
    Parts {
        a: f32,
        #[serde(default)]
        b: Option<f32>,
        #[serde(default)]
        center: bool,
    },
}

impl SpanConfig {
    pub fn to_span(&self) -> Span {
        match self {
            SpanConfig::Fixed(v) => Span::fixed(*v),
            SpanConfig::Keyword(SpanKeyword::Infinity) => Span::fixed(f32::INFINITY),
            SpanConfig::Values(values) if values.len() == 2 => Span::new(values[0], values[1]),
            SpanConfig::Values(values) => Span::values(values.clone()),
            SpanConfig::Parts { a, b, center } => Span::from_parts(*a, *b, *center),
        }
    }
}

impl From<f32> for SpanConfig {
    fn from(value: f32) -> Self {
        SpanConfig::Fixed(value)
    }
}

pub(crate) fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from_array(v)
}

// ========== Emitters ==========

/// Emission count and interval.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RateConfig {
    pub count: SpanConfig,
    pub interval: SpanConfig,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            count: SpanConfig::Fixed(1.0),
            interval: SpanConfig::Fixed(0.1),
        }
    }
}

impl RateConfig {
    pub fn to_rate(&self) -> Rate {
        Rate::new(self.count.to_span(), self.interval.to_span())
    }
}

/// When present the emitter starts emitting as soon as it is ready.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct EmissionConfig {
    /// Seconds of emission; `1` is a single burst. Absent means forever.
    #[serde(default)]
    pub times: Option<f32>,
    /// Emitter life in seconds. Overrides `inherit_life`.
    #[serde(default)]
    pub life: Option<f32>,
    /// Live as long as the emission lasts.
    #[serde(default)]
    pub inherit_life: bool,
}

impl EmissionConfig {
    pub fn life(&self) -> EmitLife {
        match (self.life, self.inherit_life) {
            (Some(seconds), _) => EmitLife::Seconds(seconds),
            (None, true) => EmitLife::Inherit,
            (None, false) => EmitLife::Keep,
        }
    }

    /// Start `emitter`. Fails while it has unresolved textures.
    pub fn start(&self, emitter: &mut Emitter) -> Result<()> {
        emitter.emit(self.times.unwrap_or(f32::INFINITY), self.life())
    }
}

/// One emitter.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EmitterConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: [f32; 3],
    /// Euler angles in degrees.
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "default_damping")]
    pub damping: f32,
    #[serde(default)]
    pub rate: RateConfig,
    #[serde(default)]
    pub emission: Option<EmissionConfig>,
    /// Seed for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub initializers: Vec<ComponentConfig>,
    #[serde(default)]
    pub behaviours: Vec<ComponentConfig>,
    #[serde(default)]
    pub emitter_behaviours: Vec<ComponentConfig>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            name: None,
            position: [0.0; 3],
            rotation: [0.0; 3],
            damping: DEFAULT_DAMPING,
            rate: RateConfig::default(),
            emission: None,
            seed: None,
            initializers: Vec::new(),
            behaviours: Vec::new(),
            emitter_behaviours: Vec::new(),
        }
    }
}

impl EmitterConfig {
    /// Check every type name against the allowlists.
    pub fn validate(&self) -> Result<()> {
        for initializer in &self.initializers {
            initializers::validate(initializer)?;
        }
        for behaviour in self.behaviours.iter().chain(&self.emitter_behaviours) {
            behaviours::validate(behaviour)?;
        }
        Ok(())
    }

    /// Build the emitter. Starts emission when `emission` is set and no
    /// texture is pending; otherwise call [`EmissionConfig::start`] after
    /// [`Emitter::resolve_textures`].
    pub fn build(&self) -> Result<Emitter> {
        self.validate()?;

        let mut emitter = Emitter::new();
        if let Some(seed) = self.seed {
            emitter = emitter.with_seed(seed);
        }
        if let Some(name) = &self.name {
            emitter = emitter.with_name(name.clone());
        }
        let rotation = vec3(self.rotation);
        let mut emitter = emitter
            .with_position(vec3(self.position))
            .with_rotation(Vec3::new(
                rotation.x.to_radians(),
                rotation.y.to_radians(),
                rotation.z.to_radians(),
            ))
            .with_damping(self.damping)
            .with_rate(self.rate.to_rate());

        for config in &self.initializers {
            emitter.add_initializer(initializers::build(config)?);
        }
        for config in &self.behaviours {
            emitter.add_behaviour(behaviours::build(config)?);
        }
        for config in &self.emitter_behaviours {
            emitter.add_emitter_behaviour(behaviours::build(config)?);
        }

        if let Some(emission) = &self.emission {
            if emitter.is_ready() {
                emission.start(&mut emitter)?;
            } else {
                log::debug!(
                    "Emitter '{}' has pending textures; emission deferred",
                    emitter.name
                );
            }
        }

        Ok(emitter)
    }
}

// ========== System ==========

/// A whole system.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SystemConfig {
    #[serde(default)]
    pub integration: IntegrationType,
    #[serde(default)]
    pub emitters: Vec<EmitterConfig>,
}

impl SystemConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build every emitter into a new system. Nothing is built if any
    /// component name is unsupported.
    pub fn build(&self) -> Result<System> {
        for emitter in &self.emitters {
            emitter.validate()?;
        }

        let mut system = System::new().with_integration_type(self.integration);
        for config in &self.emitters {
            system.add_emitter(config.build()?);
        }
        Ok(system)
    }
}
