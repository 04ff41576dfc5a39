//! Initializer factories.

use super::{vec3, zones, ComponentConfig, SpanConfig};
use crate::error::{ParticleError, Result};
use crate::initializer::Initializer;
use crate::math::Polar3D;
use serde::Deserialize;

/// Initializer names accepted in configs.
pub const INITIALIZER_TYPES: &[&str] = &[
    "Life",
    "Mass",
    "Radius",
    "Position",
    "Rotation",
    "Texture",
    "PolarVelocity",
    "RadialVelocity",
    "VectorVelocity",
];

fn zero() -> SpanConfig {
    SpanConfig::Fixed(0.0)
}

#[derive(Deserialize)]
struct LifeProps {
    life: SpanConfig,
}

#[derive(Deserialize)]
struct MassProps {
    mass: SpanConfig,
}

#[derive(Deserialize)]
struct RadiusProps {
    radius: SpanConfig,
}

#[derive(Deserialize)]
struct PositionProps {
    zones: Vec<ComponentConfig>,
}

/// Degrees.
#[derive(Deserialize)]
struct RotationProps {
    #[serde(default = "zero")]
    x: SpanConfig,
    #[serde(default = "zero")]
    y: SpanConfig,
    #[serde(default = "zero")]
    z: SpanConfig,
}

#[derive(Deserialize)]
struct TextureProps {
    path: String,
}

#[derive(Deserialize)]
struct PolarVelocityProps {
    radius: f32,
    theta: f32,
    phi: f32,
    #[serde(default)]
    cone: f32,
}

#[derive(Deserialize)]
struct RadialVelocityProps {
    speed: SpanConfig,
    direction: [f32; 3],
    #[serde(default)]
    theta: f32,
}

#[derive(Deserialize)]
struct VectorVelocityProps {
    velocity: [f32; 3],
    #[serde(default)]
    theta: f32,
}

/// Check the name, and the zone names of a `Position`.
pub(super) fn validate(config: &ComponentConfig) -> Result<()> {
    if !INITIALIZER_TYPES.contains(&config.type_name.as_str()) {
        return Err(ParticleError::UnsupportedInitializer(
            config.type_name.clone(),
        ));
    }
    if config.type_name == "Position" {
        let entries = config
            .properties
            .get("zones")
            .and_then(|z| z.as_array())
            .into_iter()
            .flatten();
        for zone in entries {
            let name = zone.get("type").and_then(|t| t.as_str()).unwrap_or("");
            zones::validate_name(name)?;
        }
    }
    Ok(())
}

pub(super) fn build(config: &ComponentConfig) -> Result<Initializer> {
    let initializer = match config.type_name.as_str() {
        "Life" => Initializer::life(config.properties::<LifeProps>()?.life.to_span()),
        "Mass" => Initializer::mass(config.properties::<MassProps>()?.mass.to_span()),
        "Radius" => Initializer::radius(config.properties::<RadiusProps>()?.radius.to_span()),
        "Position" => {
            let props: PositionProps = config.properties()?;
            let built = props
                .zones
                .iter()
                .map(zones::build)
                .collect::<Result<Vec<_>>>()?;
            Initializer::position(built)
        }
        "Rotation" => {
            let props: RotationProps = config.properties()?;
            Initializer::rotation(props.x.to_span(), props.y.to_span(), props.z.to_span())
        }
        "Texture" => Initializer::texture(config.properties::<TextureProps>()?.path),
        "PolarVelocity" => {
            let props: PolarVelocityProps = config.properties()?;
            Initializer::polar_velocity(Polar3D::new(props.radius, props.theta, props.phi), props.cone)
        }
        "RadialVelocity" => {
            let props: RadialVelocityProps = config.properties()?;
            Initializer::radial_velocity(props.speed.to_span(), vec3(props.direction), props.theta)
        }
        "VectorVelocity" => {
            let props: VectorVelocityProps = config.properties()?;
            Initializer::vector_velocity(vec3(props.velocity), props.theta)
        }
        other => return Err(ParticleError::UnsupportedInitializer(other.to_string())),
    };
    Ok(initializer)
}
