//! Zone factories.

use super::{vec3, ComponentConfig};
use crate::error::{ParticleError, Result};
use crate::zone::{CrossType, Zone};
use serde::Deserialize;

/// Zone names accepted in configs.
pub const ZONE_TYPES: &[&str] = &["PointZone", "LineZone", "BoxZone", "SphereZone"];

#[derive(Deserialize)]
struct PointProps {
    #[serde(default)]
    position: [f32; 3],
}

#[derive(Deserialize)]
struct LineProps {
    start: [f32; 3],
    end: [f32; 3],
}

#[derive(Deserialize)]
struct BoxProps {
    #[serde(default)]
    center: [f32; 3],
    width: f32,
    height: f32,
    depth: f32,
    #[serde(default)]
    cross_type: CrossType,
}

#[derive(Deserialize)]
struct SphereProps {
    #[serde(default)]
    center: [f32; 3],
    radius: f32,
    #[serde(default)]
    cross_type: CrossType,
}

pub(super) fn validate_name(name: &str) -> Result<()> {
    if ZONE_TYPES.contains(&name) {
        Ok(())
    } else {
        Err(ParticleError::UnsupportedZone(name.to_string()))
    }
}

pub(super) fn build(config: &ComponentConfig) -> Result<Zone> {
    validate_name(&config.type_name)?;

    let zone = match config.type_name.as_str() {
        "PointZone" => Zone::point(vec3(config.properties::<PointProps>()?.position)),
        "LineZone" => {
            let props: LineProps = config.properties()?;
            Zone::line(vec3(props.start), vec3(props.end))
        }
        "BoxZone" => {
            let props: BoxProps = config.properties()?;
            Zone::boxed(vec3(props.center), props.width, props.height, props.depth)
                .with_cross_type(props.cross_type)
        }
        "SphereZone" => {
            let props: SphereProps = config.properties()?;
            Zone::sphere(vec3(props.center), props.radius).with_cross_type(props.cross_type)
        }
        other => return Err(ParticleError::UnsupportedZone(other.to_string())),
    };
    Ok(zone)
}
