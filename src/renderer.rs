//! Renderer observer interface.
//!
//! Renderers are external: the simulation only tells them what happened. A
//! system holds shared handles ([`SharedRenderer`]) and calls them during
//! [`System::update`](crate::System::update) in this order:
//!
//! 1. `on_particle_created` while emitters spawn,
//! 2. `on_particle_update` after each particle's tick,
//! 3. `on_particle_dead` before a dead particle is recycled,
//! 4. `on_system_update` once per tick while any emitter has live particles.
//!
//! A particle handed to `on_particle_dead` is reset and reused right after the
//! call returns. Renderers must copy anything they need.

use crate::particle::Particle;
use crate::system::System;
use std::cell::RefCell;
use std::rc::Rc;

/// Observer notified by a running system. All methods default to no-ops.
pub trait Renderer {
    fn on_system_update(&mut self, _system: &System) {}
    fn on_particle_created(&mut self, _particle: &Particle) {}
    fn on_particle_update(&mut self, _particle: &Particle) {}
    fn on_particle_dead(&mut self, _particle: &Particle) {}
}

/// A renderer handle shared between the host and a system.
pub type SharedRenderer = Rc<RefCell<dyn Renderer>>;

/// Wrap a renderer in a [`SharedRenderer`], returning the typed handle as well.
///
/// ```ignore
/// let (stats, handle) = shared(StatsRenderer::default());
/// system.add_renderer(handle);
/// // later: stats.borrow().created
/// ```
pub fn shared<R: Renderer + 'static>(renderer: R) -> (Rc<RefCell<R>>, SharedRenderer) {
    let typed = Rc::new(RefCell::new(renderer));
    let erased: SharedRenderer = typed.clone();
    (typed, erased)
}
