//! Listener-based event dispatch.
//!
//! Systems and emitters each own an [`EventDispatcher`]. Listeners register for
//! an [`EventKind`] and are called synchronously, in registration order, while
//! the simulation updates.
//!
//! | Event | Dispatched by | When |
//! |-------|---------------|------|
//! | `ParticleCreated` | system (and emitter with `bind_emitter_event`) | after a particle is set up |
//! | `ParticleUpdate` | system | after a particle's tick |
//! | `ParticleDead` | system (and emitter with `bind_emitter_event`) | before a dead particle is recycled |
//! | `EmitterDrained` | emitter | when retirement empties its particle list |
//! | `EmitterDead` | emitter, then system | on teardown |
//! | `SystemUpdate` | system | once per tick while particles are alive |
//!
//! # Example
//!
//! ```ignore
//! system.events_mut().add_listener(EventKind::ParticleDead, |event| {
//!     if let Event::ParticleDead(p) = event {
//!         println!("particle {} died at {:?}", p.id(), p.position());
//!     }
//! });
//! ```

use crate::emitter::EmitterId;
use crate::particle::Particle;
use std::fmt;

/// A simulation event.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    ParticleCreated(&'a Particle),
    ParticleUpdate(&'a Particle),
    ParticleDead(&'a Particle),
    EmitterDrained(EmitterId),
    EmitterDead(EmitterId),
    SystemUpdate { particles: usize },
}

impl Event<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::ParticleCreated(_) => EventKind::ParticleCreated,
            Event::ParticleUpdate(_) => EventKind::ParticleUpdate,
            Event::ParticleDead(_) => EventKind::ParticleDead,
            Event::EmitterDrained(_) => EventKind::EmitterDrained,
            Event::EmitterDead(_) => EventKind::EmitterDead,
            Event::SystemUpdate { .. } => EventKind::SystemUpdate,
        }
    }
}

/// Event discriminant used to register listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ParticleCreated,
    ParticleUpdate,
    ParticleDead,
    EmitterDrained,
    EmitterDead,
    SystemUpdate,
}

/// Handle returned by [`EventDispatcher::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&Event<'_>)>;

/// Ordered listener registry.
#[derive(Default)]
pub struct EventDispatcher {
    listeners: Vec<(ListenerId, EventKind, Listener)>,
    next_id: u64,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&Event<'_>) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, kind, Box::new(listener)));
        id
    }

    /// Returns whether a listener was removed.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn remove_all_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn has_listener(&self, kind: EventKind) -> bool {
        self.listeners.iter().any(|(_, k, _)| *k == kind)
    }

    pub fn dispatch(&mut self, event: Event<'_>) {
        let kind = event.kind();
        for (_, listener_kind, listener) in self.listeners.iter_mut() {
            if *listener_kind == kind {
                listener(&event);
            }
        }
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_dispatch_by_kind() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();

        let log = Rc::clone(&seen);
        dispatcher.add_listener(EventKind::EmitterDead, move |event| {
            if let Event::EmitterDead(id) = event {
                log.borrow_mut().push(*id);
            }
        });

        dispatcher.dispatch(Event::SystemUpdate { particles: 3 });
        dispatcher.dispatch(Event::EmitterDead(EmitterId::new(4)));

        assert_eq!(*seen.borrow(), vec![EmitterId::new(4)]);
    }

    #[test]
    fn test_remove_listeners() {
        let count = Rc::new(RefCell::new(0));
        let mut dispatcher = EventDispatcher::new();

        let c = Rc::clone(&count);
        let id = dispatcher.add_listener(EventKind::SystemUpdate, move |_| *c.borrow_mut() += 1);
        assert!(dispatcher.has_listener(EventKind::SystemUpdate));

        dispatcher.dispatch(Event::SystemUpdate { particles: 0 });
        assert!(dispatcher.remove_listener(id));
        assert!(!dispatcher.remove_listener(id));
        dispatcher.dispatch(Event::SystemUpdate { particles: 0 });
        assert_eq!(*count.borrow(), 1);

        dispatcher.add_listener(EventKind::SystemUpdate, |_| {});
        dispatcher.remove_all_listeners();
        assert!(!dispatcher.has_listener(EventKind::SystemUpdate));
    }
}
