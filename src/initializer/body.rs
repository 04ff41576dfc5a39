//! Renderer payload initializers.
//!
//! The simulation treats bodies as opaque. [`Body`] hands out payloads the
//! caller already owns; [`Texture`] names a resource the host must resolve
//! (through [`Emitter::resolve_textures`](crate::Emitter::resolve_textures))
//! before the emitter may spawn.

use crate::error::{ParticleError, Result};
use crate::math::SimRng;
use crate::particle::{BodyPayload, Particle};
use crate::span::ArraySpan;

/// Attaches a payload picked from a set.
#[derive(Clone, Debug)]
pub struct Body {
    pub bodies: ArraySpan<BodyPayload>,
    pub width: f32,
    pub height: f32,
}

impl Body {
    pub fn new(bodies: ArraySpan<BodyPayload>, width: f32, height: f32) -> Self {
        Self {
            bodies,
            width,
            height,
        }
    }

    pub fn init(&self, particle: &mut Particle, rng: &mut SimRng) {
        particle.body = self.bodies.pick(rng).cloned();
        particle.transform.body_width = self.width;
        particle.transform.body_height = self.height;
    }
}

/// Attaches a texture payload once the host has resolved it.
#[derive(Clone, Debug)]
pub struct Texture {
    pub path: String,
    payload: Option<BodyPayload>,
}

impl Texture {
    /// A pending texture reference.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            payload: None,
        }
    }

    /// A texture whose payload is already available.
    pub fn resolved(path: impl Into<String>, payload: BodyPayload) -> Self {
        Self {
            path: path.into(),
            payload: Some(payload),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.payload.is_some()
    }

    /// Resolve the payload with `resolver`. A no-op once resolved.
    pub fn resolve<F>(&mut self, resolver: &mut F) -> Result<()>
    where
        F: FnMut(&str) -> Result<BodyPayload>,
    {
        if self.payload.is_some() {
            return Ok(());
        }
        let payload = resolver(&self.path).map_err(|e| match e {
            ParticleError::TextureResolution { .. } => e,
            other => ParticleError::TextureResolution {
                path: self.path.clone(),
                reason: other.to_string(),
            },
        })?;
        log::debug!("Resolved texture '{}'", self.path);
        self.payload = Some(payload);
        Ok(())
    }

    pub fn init(&self, particle: &mut Particle) {
        if let Some(payload) = &self.payload {
            particle.body = Some(payload.clone());
        }
    }
}
