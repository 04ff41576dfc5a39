//! Error types for Ember.
//!
//! Construction of pools, zones, initializers and behaviours can fail. Per-tick
//! simulation never returns errors: degraded calls (crossing on a zone without
//! boundary support, unimplemented integrators) are reported through `log`.

use thiserror::Error;

/// Errors raised while building or configuring a simulation.
#[derive(Error, Debug)]
pub enum ParticleError {
    /// A data-driven description named an initializer outside the allowlist.
    #[error("Unsupported initializer type: '{0}'")]
    UnsupportedInitializer(String),

    /// A data-driven description named a behaviour outside the allowlist.
    #[error("Unsupported behaviour type: '{0}'")]
    UnsupportedBehaviour(String),

    /// A data-driven description named a zone outside the allowlist.
    #[error("Unsupported zone type: '{0}'")]
    UnsupportedZone(String),

    /// The property bag of a component did not match its typed properties.
    #[error("Invalid properties for '{type_name}': {source}")]
    InvalidProperties {
        type_name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The document itself could not be parsed.
    #[error("Invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),

    /// The pool had no free instance and no way to construct one.
    #[error("Pool cannot create an instance of '{0}': no free instance and no registered factory")]
    PoolUnconstructible(&'static str),

    /// A mesh zone was given no usable geometry.
    #[error("Mesh zone has no resolvable geometry: {0}")]
    EmptyMesh(String),

    /// Emission was requested while an initializer still awaits resolution.
    #[error("Initializer '{0}' is not ready; resolve its resources before emitting")]
    InitializerNotReady(&'static str),

    /// A texture resolver failed.
    #[error("Failed to resolve texture '{path}': {reason}")]
    TextureResolution { path: String, reason: String },
}

/// Result type using [`ParticleError`].
pub type Result<T> = std::result::Result<T, ParticleError>;
