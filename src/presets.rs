//! Ready-made emitters.
//!
//! Common effects as one-liners. Presets only configure; start them with
//! [`Emitter::emit`]:
//!
//! ```ignore
//! let mut fire = presets::fire(Vec3::new(0.0, -200.0, 0.0), 400.0);
//! fire.emit(f32::INFINITY, EmitLife::Keep)?;
//!
//! let mut boom = presets::explosion(Vec3::ZERO, 300);
//! boom.emit(1.0, EmitLife::Seconds(2.0))?; // single burst
//! ```
//!
//! | Preset | Motion | Look |
//! |--------|--------|------|
//! | [`fire`] | narrow upward cone | yellow to red, fades and shrinks |
//! | [`fountain`] | upward cone under gravity | light to deep blue, fades |
//! | [`explosion`] | one radial burst | flash to orange, fades and shrinks |
//! | [`smoke`] | slow wide cone, drifting | gray, grows and fades |
//! | [`sparkler`] | fast sparks in every direction | white to orange |
//! | [`rain`] | straight down from a box | blue-gray |

use crate::behaviour::Behaviour;
use crate::emitter::Emitter;
use crate::initializer::{Initializer, Rate};
use crate::span::{ColorSpan, Span};
use crate::zone::Zone;
use glam::Vec3;

/// Spawn ticks for continuous presets.
const PRESET_INTERVAL: f32 = 0.05;

/// A rate of roughly `per_second` particles per second.
fn per_second(per_second: f32) -> Rate {
    let per_tick = per_second * PRESET_INTERVAL;
    if per_tick >= 1.0 {
        Rate::new(per_tick.round(), PRESET_INTERVAL)
    } else {
        Rate::new(1.0, 1.0 / per_second.max(f32::EPSILON))
    }
}

fn color_over_life(start: Vec3, end: Vec3) -> Behaviour {
    Behaviour::color(start, Some(ColorSpan::solid(end)))
}

/// Rising embers that fade and shrink.
///
/// * `position` - base of the fire
/// * `rate` - particles per second
pub fn fire(position: Vec3, rate: f32) -> Emitter {
    let mut emitter = Emitter::new()
        .with_name("fire")
        .with_position(position)
        .with_rate(per_second(rate));
    emitter
        .add_initializer(Initializer::life(1.5))
        .add_initializer(Initializer::radius(Span::new(6.0, 10.0)))
        .add_initializer(Initializer::position(vec![Zone::sphere(Vec3::ZERO, 10.0)]))
        .add_initializer(Initializer::radial_velocity(Span::new(0.6, 1.0), Vec3::Y, 20.0));
    emitter.add_behaviours([
        Behaviour::alpha(1.0, Some(Span::fixed(0.0))),
        Behaviour::scale(1.0, Some(Span::fixed(0.2))),
        color_over_life(Vec3::new(1.0, 0.9, 0.3), Vec3::new(0.8, 0.2, 0.0)),
        Behaviour::force(0.0, 0.5, 0.0),
    ]);
    emitter
}

/// Particles that arc up and fall back down.
///
/// * `position` - nozzle position
/// * `rate` - particles per second
pub fn fountain(position: Vec3, rate: f32) -> Emitter {
    let mut emitter = Emitter::new()
        .with_name("fountain")
        .with_position(position)
        .with_rate(per_second(rate));
    emitter
        .add_initializer(Initializer::life(3.0))
        .add_initializer(Initializer::radius(4.0))
        .add_initializer(Initializer::radial_velocity(Span::new(4.0, 5.0), Vec3::Y, 12.0));
    emitter.add_behaviours([
        Behaviour::gravity(3.0),
        Behaviour::alpha(1.0, Some(Span::fixed(0.0))),
        color_over_life(Vec3::new(0.7, 0.85, 1.0), Vec3::new(0.2, 0.4, 0.8)),
    ]);
    emitter
}

/// A single radial burst of `count` particles. Emit it with a total of `1.0`.
pub fn explosion(position: Vec3, count: u32) -> Emitter {
    let mut emitter = Emitter::new()
        .with_name("explosion")
        .with_position(position)
        .with_rate(Rate::new(count as f32, 0.0))
        .with_damping(0.03);
    emitter
        .add_initializer(Initializer::life(1.2))
        .add_initializer(Initializer::radius(Span::new(3.0, 6.0)))
        .add_initializer(Initializer::radial_velocity(Span::new(2.0, 3.0), Vec3::Y, 180.0));
    emitter.add_behaviours([
        Behaviour::alpha(1.0, Some(Span::fixed(0.0))),
        Behaviour::scale(1.0, Some(Span::fixed(0.1))),
        color_over_life(Vec3::new(1.0, 1.0, 0.8), Vec3::new(1.0, 0.3, 0.0)),
    ]);
    emitter
}

/// Slow-rising gray puffs that grow and fade.
pub fn smoke(position: Vec3, rate: f32) -> Emitter {
    let mut emitter = Emitter::new()
        .with_name("smoke")
        .with_position(position)
        .with_rate(per_second(rate));
    emitter
        .add_initializer(Initializer::life(4.0))
        .add_initializer(Initializer::radius(Span::new(10.0, 16.0)))
        .add_initializer(Initializer::radial_velocity(Span::new(0.2, 0.4), Vec3::Y, 35.0));
    emitter.add_behaviours([
        Behaviour::alpha(0.6, Some(Span::fixed(0.0))),
        Behaviour::scale(1.0, Some(Span::fixed(3.0))),
        color_over_life(Vec3::splat(0.4), Vec3::splat(0.15)),
        Behaviour::random_drift(0.3, 0.1, 0.3, 0.1),
    ]);
    emitter
}

/// Fast, short-lived sparks spraying every way.
pub fn sparkler(position: Vec3, rate: f32) -> Emitter {
    let mut emitter = Emitter::new()
        .with_name("sparkler")
        .with_position(position)
        .with_rate(per_second(rate));
    emitter
        .add_initializer(Initializer::life(Span::new(0.3, 0.6)))
        .add_initializer(Initializer::radius(2.0))
        .add_initializer(Initializer::position(vec![Zone::sphere(Vec3::ZERO, 2.0)]))
        .add_initializer(Initializer::radial_velocity(Span::new(2.0, 3.0), Vec3::Y, 180.0));
    emitter.add_behaviours([
        Behaviour::alpha(1.0, Some(Span::fixed(0.0))),
        Behaviour::scale(1.0, Some(Span::fixed(0.3))),
        color_over_life(Vec3::ONE, Vec3::new(1.0, 0.6, 0.1)),
        Behaviour::gravity(1.0),
    ]);
    emitter
}

/// Drops falling from a `width` by `depth` sheet at `height`.
pub fn rain(width: f32, depth: f32, height: f32, rate: f32) -> Emitter {
    let mut emitter = Emitter::new()
        .with_name("rain")
        .with_rate(per_second(rate));
    emitter
        .add_initializer(Initializer::life(2.0))
        .add_initializer(Initializer::radius(1.5))
        .add_initializer(Initializer::position(vec![Zone::boxed(
            Vec3::new(0.0, height, 0.0),
            width,
            0.0,
            depth,
        )]))
        .add_initializer(Initializer::vector_velocity(Vec3::new(0.0, -2.0, 0.0), 0.0));
    emitter.add_behaviour(color_over_life(Vec3::new(0.6, 0.7, 0.9), Vec3::new(0.4, 0.5, 0.7)));
    emitter
}
