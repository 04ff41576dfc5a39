//! Behaviour factories.
//!
//! Every behaviour accepts the common properties `life` (seconds, default
//! forever), `easing` (a Penner name such as `"easeOutQuad"`) and `enabled`
//! alongside its own.

use super::{vec3, ComponentConfig, SpanConfig};
use crate::behaviour::Behaviour;
use crate::error::{ParticleError, Result};
use crate::math::Easing;
use crate::span::ColorSpan;
use serde::Deserialize;

/// Behaviour names accepted in configs.
pub const BEHAVIOUR_TYPES: &[&str] = &[
    "Alpha",
    "Attraction",
    "Color",
    "Force",
    "Gravity",
    "RandomDrift",
    "Repulsion",
    "Rotate",
    "Scale",
    "Spring",
];

fn enabled() -> bool {
    true
}

fn default_delay() -> SpanConfig {
    SpanConfig::Fixed(0.03)
}

#[derive(Deserialize)]
struct CommonProps {
    #[serde(default)]
    life: Option<f32>,
    #[serde(default)]
    easing: Option<String>,
    #[serde(default = "enabled")]
    enabled: bool,
}

#[derive(Deserialize)]
struct FadeProps {
    a: SpanConfig,
    #[serde(default)]
    b: Option<SpanConfig>,
}

/// A hex string, `"random"`, or a list of either.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorConfig {
    One(String),
    Many(Vec<String>),
}

#[derive(Deserialize)]
struct ColorProps {
    a: ColorConfig,
    #[serde(default)]
    b: Option<ColorConfig>,
}

#[derive(Deserialize)]
struct ForceProps {
    #[serde(default)]
    fx: f32,
    #[serde(default)]
    fy: f32,
    #[serde(default)]
    fz: f32,
}

#[derive(Deserialize)]
struct GravityProps {
    g: f32,
}

#[derive(Deserialize)]
struct AttractionProps {
    #[serde(default)]
    target: [f32; 3],
    force: f32,
    radius: f32,
}

#[derive(Deserialize)]
struct DriftProps {
    #[serde(default)]
    dx: f32,
    #[serde(default)]
    dy: f32,
    #[serde(default)]
    dz: f32,
    #[serde(default = "default_delay")]
    delay: SpanConfig,
}

/// Degrees.
#[derive(Deserialize)]
struct RotateProps {
    #[serde(default)]
    x: Option<SpanConfig>,
    #[serde(default)]
    y: Option<SpanConfig>,
    #[serde(default)]
    z: Option<SpanConfig>,
}

#[derive(Deserialize)]
struct SpringProps {
    #[serde(default)]
    anchor: [f32; 3],
    spring: f32,
    #[serde(default)]
    friction: f32,
}

fn invalid(type_name: &str, message: String) -> ParticleError {
    ParticleError::InvalidProperties {
        type_name: type_name.to_string(),
        source: <serde_json::Error as serde::de::Error>::custom(message),
    }
}

impl ColorConfig {
    fn to_span(&self, type_name: &str) -> Result<ColorSpan> {
        let colors = match self {
            ColorConfig::One(color) => std::slice::from_ref(color),
            ColorConfig::Many(colors) => colors.as_slice(),
        };
        ColorSpan::from_hex(colors)
            .ok_or_else(|| invalid(type_name, format!("no usable color in {:?}", colors)))
    }
}

pub(super) fn validate(config: &ComponentConfig) -> Result<()> {
    if BEHAVIOUR_TYPES.contains(&config.type_name.as_str()) {
        Ok(())
    } else {
        Err(ParticleError::UnsupportedBehaviour(config.type_name.clone()))
    }
}

pub(super) fn build(config: &ComponentConfig) -> Result<Behaviour> {
    let name = config.type_name.as_str();
    let behaviour = match name {
        "Alpha" => {
            let props: FadeProps = config.properties()?;
            Behaviour::alpha(props.a.to_span(), props.b.map(|b| b.to_span()))
        }
        "Scale" => {
            let props: FadeProps = config.properties()?;
            Behaviour::scale(props.a.to_span(), props.b.map(|b| b.to_span()))
        }
        "Color" => {
            let props: ColorProps = config.properties()?;
            let b = props.b.map(|b| b.to_span(name)).transpose()?;
            Behaviour::color(props.a.to_span(name)?, b)
        }
        "Force" => {
            let props: ForceProps = config.properties()?;
            Behaviour::force(props.fx, props.fy, props.fz)
        }
        "Gravity" => Behaviour::gravity(config.properties::<GravityProps>()?.g),
        "Attraction" => {
            let props: AttractionProps = config.properties()?;
            Behaviour::attraction(vec3(props.target), props.force, props.radius)
        }
        "Repulsion" => {
            let props: AttractionProps = config.properties()?;
            Behaviour::repulsion(vec3(props.target), props.force, props.radius)
        }
        "RandomDrift" => {
            let props: DriftProps = config.properties()?;
            Behaviour::random_drift(props.dx, props.dy, props.dz, props.delay.to_span())
        }
        "Rotate" => {
            let props: RotateProps = config.properties()?;
            Behaviour::rotate(
                props.x.map(|x| x.to_span()),
                props.y.map(|y| y.to_span()),
                props.z.map(|z| z.to_span()),
            )
        }
        "Spring" => {
            let props: SpringProps = config.properties()?;
            Behaviour::spring(vec3(props.anchor), props.spring, props.friction)
        }
        other => return Err(ParticleError::UnsupportedBehaviour(other.to_string())),
    };

    let common: CommonProps = config.properties()?;
    let mut behaviour = behaviour.with_enabled(common.enabled);
    if let Some(life) = common.life {
        behaviour = behaviour.with_life(life);
    }
    if let Some(easing) = &common.easing {
        let easing = Easing::from_name(easing)
            .ok_or_else(|| invalid(name, format!("unknown easing '{}'", easing)))?;
        behaviour = behaviour.with_easing(easing);
    }
    Ok(behaviour)
}
