//! Build a fountain from a JSON description.
//!
//! Run with: cargo run --example fountain_config

use ember::prelude::*;

const FOUNTAIN: &str = r##"{
  "emitters": [{
    "name": "fountain",
    "seed": 7,
    "position": [0, -150, 0],
    "rate": { "count": [4, 8], "interval": 0.05 },
    "emission": {},
    "initializers": [
      { "type": "Life", "properties": { "life": [1.5, 2.5] } },
      { "type": "Radius", "properties": { "radius": [3, 5] } },
      { "type": "Position", "properties": { "zones": [
        { "type": "SphereZone", "properties": { "radius": 5 } }
      ] } },
      { "type": "RadialVelocity", "properties": { "speed": [4, 5], "direction": [0, 1, 0], "theta": 12 } }
    ],
    "behaviours": [
      { "type": "Gravity", "properties": { "g": 3 } },
      { "type": "Alpha", "properties": { "a": 1, "b": 0 } },
      { "type": "Color", "properties": { "a": "#b3d9ff", "b": "#3366cc" } },
      { "type": "RandomDrift", "properties": { "dx": 0.2, "dz": 0.2, "delay": 0.2, "easing": "easeOutQuad" } }
    ]
  }]
}"##;

fn main() -> Result<()> {
    env_logger::init();

    let config = SystemConfig::from_json(FOUNTAIN)?;
    let mut system = config.build()?;

    for step in 0..180 {
        system.update(1.0 / 60.0);
        if step % 30 == 0 {
            let highest = system
                .emitters()
                .iter()
                .flat_map(|e| e.particles())
                .map(|p| p.position().y)
                .fold(f32::NEG_INFINITY, f32::max);
            println!("frame {:>3}: {:>4} particles, highest y = {:.1}", step, system.count(), highest);
        }
    }

    println!("{}", config.to_json()?);
    Ok(())
}
