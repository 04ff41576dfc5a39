//! The top-level simulation coordinator.
//!
//! A [`System`] owns its emitters and one [`Pool`] they share, and holds
//! handles to the renderers it notifies. Call [`System::update`] once per
//! frame; everything completes before it returns.
//!
//! ```ignore
//! let mut system = System::new();
//! let (stats, handle) = renderer::shared(StatsRenderer::default());
//! system.add_renderer(handle);
//!
//! let mut emitter = presets::fountain(Vec3::ZERO);
//! emitter.emit(f32::INFINITY, EmitLife::Keep)?;
//! system.add_emitter(emitter);
//!
//! loop {
//!     system.update(frame_dt);
//! }
//! ```

use crate::emitter::{Emitter, EmitterContext, EmitterId};
use crate::events::{Event, EventDispatcher, EventKind, ListenerId};
use crate::integration::IntegrationType;
use crate::pool::Pool;
use crate::renderer::SharedRenderer;
use std::fmt;
use std::rc::Rc;

/// Step used when `update` is called with zero.
pub const DEFAULT_SYSTEM_DELTA: f32 = 0.0167;

/// Owns emitters and the shared particle pool.
pub struct System {
    emitters: Vec<Emitter>,
    renderers: Vec<SharedRenderer>,
    pool: Pool,
    integration_type: IntegrationType,
    can_update: bool,
    events: EventDispatcher,
}

impl fmt::Debug for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("System")
            .field("emitters", &self.emitters)
            .field("renderers", &self.renderers.len())
            .field("pool", &self.pool)
            .field("integration_type", &self.integration_type)
            .field("can_update", &self.can_update)
            .finish()
    }
}

impl Default for System {
    fn default() -> Self {
        Self::new()
    }
}

impl System {
    pub fn new() -> Self {
        Self {
            emitters: Vec::new(),
            renderers: Vec::new(),
            pool: Pool::new(),
            integration_type: IntegrationType::Euler,
            can_update: true,
            events: EventDispatcher::new(),
        }
    }

    /// Select the integration scheme. Only Euler is implemented; the others
    /// run as Euler.
    pub fn with_integration_type(mut self, integration_type: IntegrationType) -> Self {
        self.set_integration_type(integration_type);
        self
    }

    pub fn set_integration_type(&mut self, integration_type: IntegrationType) {
        if !integration_type.is_implemented() {
            log::warn!(
                "Integration type {:?} is not implemented, falling back to Euler",
                integration_type
            );
        }
        self.integration_type = integration_type;
    }

    pub fn integration_type(&self) -> IntegrationType {
        self.integration_type
    }

    // ========== Emitters ==========

    /// Take ownership of an emitter. Returns its id.
    pub fn add_emitter(&mut self, mut emitter: Emitter) -> EmitterId {
        let id = emitter.id();
        emitter.set_index(self.emitters.len());
        self.emitters.push(emitter);
        id
    }

    /// Remove an emitter (live particles included) and hand it back.
    pub fn remove_emitter(&mut self, id: EmitterId) -> Option<Emitter> {
        let position = self.emitters.iter().position(|e| e.id() == id)?;
        let emitter = self.emitters.remove(position);
        self.reindex();
        Some(emitter)
    }

    pub fn emitter(&self, id: EmitterId) -> Option<&Emitter> {
        self.emitters.iter().find(|e| e.id() == id)
    }

    pub fn emitter_mut(&mut self, id: EmitterId) -> Option<&mut Emitter> {
        self.emitters.iter_mut().find(|e| e.id() == id)
    }

    pub fn emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    pub fn emitters_mut(&mut self) -> &mut [Emitter] {
        &mut self.emitters
    }

    fn reindex(&mut self) {
        for (index, emitter) in self.emitters.iter_mut().enumerate() {
            emitter.set_index(index);
        }
    }

    // ========== Renderers ==========

    pub fn add_renderer(&mut self, renderer: SharedRenderer) {
        self.renderers.push(renderer);
    }

    /// Returns whether the handle was registered.
    pub fn remove_renderer(&mut self, renderer: &SharedRenderer) -> bool {
        let before = self.renderers.len();
        self.renderers.retain(|r| !Rc::ptr_eq(r, renderer));
        self.renderers.len() != before
    }

    pub fn renderers(&self) -> &[SharedRenderer] {
        &self.renderers
    }

    // ========== Events ==========

    pub fn events_mut(&mut self) -> &mut EventDispatcher {
        &mut self.events
    }

    pub fn add_event_listener<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&Event<'_>) + 'static,
    {
        self.events.add_listener(kind, listener)
    }

    // ========== Introspection ==========

    /// Live particles across all emitters.
    pub fn count(&self) -> usize {
        self.emitters.iter().map(Emitter::count).sum()
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut Pool {
        &mut self.pool
    }

    pub fn can_update(&self) -> bool {
        self.can_update
    }

    // ========== Update ==========

    /// Advance every emitter by `delta` seconds.
    ///
    /// Zero means [`DEFAULT_SYSTEM_DELTA`]; negative deltas are ignored.
    /// Torn-down emitters are dropped afterwards.
    pub fn update(&mut self, delta: f32) {
        if !self.can_update {
            return;
        }
        let delta = if delta == 0.0 { DEFAULT_SYSTEM_DELTA } else { delta };
        if delta < 0.0 {
            return;
        }

        {
            let System {
                emitters,
                renderers,
                pool,
                integration_type,
                events,
                ..
            } = self;
            let mut ctx = EmitterContext {
                pool,
                renderers: renderers.as_slice(),
                integration: *integration_type,
                events: Some(events),
            };
            for emitter in emitters.iter_mut().rev() {
                emitter.update(delta, &mut ctx);
            }
        }

        self.remove_torn_down();

        let particles = self.count();
        if particles > 0 {
            for renderer in self.renderers.clone() {
                renderer.borrow_mut().on_system_update(self);
            }
            self.events.dispatch(Event::SystemUpdate { particles });
        }
    }

    fn remove_torn_down(&mut self) {
        let mut removed = false;
        for index in (0..self.emitters.len()).rev() {
            if !self.emitters[index].is_torn_down() {
                continue;
            }
            let emitter = self.emitters.remove(index);
            log::debug!("Removing emitter '{}'", emitter.name);
            self.events.dispatch(Event::EmitterDead(emitter.id()));
            removed = true;
        }
        if removed {
            self.reindex();
        }
    }

    /// Tear everything down: emitters, renderer handles, pooled instances.
    pub fn destroy(&mut self) {
        self.can_update = false;

        for emitter in &mut self.emitters {
            emitter.remove_all_particles();
            emitter.destroy();
        }
        self.emitters.clear();
        self.renderers.clear();
        self.pool.destroy();

        self.can_update = true;
    }
}
