//! End-to-end tests for the simulation core.
//!
//! These drive emitters and systems through their public API and check the
//! lifecycle guarantees: spans stay in range, pooled particles are reused,
//! dead particles stay dead, emitters shut down in two phases, and zones
//! contain what they bound.

use ember::behaviour::{ApplyContext, BehaviourKind};
use ember::config::{ComponentConfig, EmitterConfig, SystemConfig};
use ember::emitter::EmitterContext;
use ember::prelude::*;
use ember::{ParticleError, Pool, SimRng};
use rand::SeedableRng;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

fn rng(seed: u64) -> SimRng {
    SimRng::seed_from_u64(seed)
}

// ============================================================================
// Span
// ============================================================================

#[test]
fn test_span_range_law() {
    let mut rng = rng(1);
    let span = Span::new(-3.0, 7.0);
    let centered = Span::centered(10.0, 2.0);
    for _ in 0..1_000 {
        assert!((-3.0..=7.0).contains(&span.value(&mut rng)));
        assert!((8.0..=12.0).contains(&centered.value(&mut rng)));
        let i = span.int_value(&mut rng);
        assert_eq!(i, i.floor());
    }
    assert!(Span::fixed(f32::INFINITY).value(&mut rng).is_infinite());
}

// ============================================================================
// Pool
// ============================================================================

#[test]
fn test_pool_round_trip_reuses_allocation() {
    let mut pool = Pool::new();
    let first = pool.get::<Particle>();
    let address = &*first as *const Particle;
    let id = first.id();

    pool.expire(first);
    assert_eq!(pool.count(), 1);

    let again = pool.get::<Particle>();
    assert_eq!(&*again as *const Particle, address);
    assert_eq!(again.id(), id);
    assert_eq!(pool.count(), 0);
    assert_eq!(pool.total_created(), 2);
}

// ============================================================================
// Particle
// ============================================================================

#[test]
fn test_particle_death_is_terminal() {
    let mut rng = rng(2);
    let mut particle = Particle::new();
    particle.motion.life = 0.5;

    let mut ticks = 0;
    while !particle.is_dead() {
        particle.update(0.1, 0, &mut ApplyContext::new(&mut rng, &mut []));
        ticks += 1;
    }
    assert!((5..=6).contains(&ticks), "{ticks}");

    for _ in 0..3 {
        particle.update(0.1, 0, &mut ApplyContext::new(&mut rng, &mut []));
        assert!(particle.is_dead());
        assert_eq!(particle.motion.energy, 0.0);
    }
}

#[test]
fn test_energy_falls_linearly_to_zero() {
    let mut rng = rng(3);
    let mut particle = Particle::new();
    particle.motion.life = 1.0;

    let mut last = particle.motion.energy;
    for step in 1..=4 {
        particle.update(0.25, 0, &mut ApplyContext::new(&mut rng, &mut []));
        let energy = particle.motion.energy;
        assert!(energy <= last, "step {step}: {energy} > {last}");
        last = energy;
    }
    assert!(particle.is_dead());
    assert_eq!(particle.motion.energy, 0.0);
}

// ============================================================================
// Emitter
// ============================================================================

#[test]
fn test_single_burst_scenario() {
    let mut system = System::new();
    let mut emitter = Emitter::new().with_seed(4).with_rate(Rate::new(10.0, 0.1));
    emitter.add_initializer(Initializer::life(0.5));
    emitter.emit(1.0, EmitLife::Inherit).unwrap();
    let id = system.add_emitter(emitter);

    system.update(0.1);
    assert_eq!(system.count(), 10);

    system.update(0.1);
    assert_eq!(system.count(), 10);

    for _ in 0..4 {
        system.update(0.1);
    }
    assert_eq!(system.count(), 0);
    assert_eq!(system.pool().count_of::<Particle>(), 10);

    for _ in 0..6 {
        system.update(0.1);
    }
    assert!(system.emitter(id).is_none());
}

#[test]
fn test_two_phase_shutdown_fires_dead_once() {
    let mut system = System::new();
    let fired = Rc::new(RefCell::new(0));

    let mut emitter = Emitter::new().with_seed(5).with_rate(Rate::new(3.0, 0.1));
    emitter.add_initializer(Initializer::life(0.3));
    let counter = Rc::clone(&fired);
    emitter.add_event_listener(EventKind::EmitterDead, move |_| *counter.borrow_mut() += 1);
    emitter.emit(f32::INFINITY, EmitLife::Keep).unwrap();
    let id = system.add_emitter(emitter);

    system.update(0.1);
    system.emitter_mut(id).unwrap().destroy();
    assert!(system.emitter(id).unwrap().is_dead());
    assert!(system.count() > 0);
    assert_eq!(*fired.borrow(), 0);

    system.update(0.1);
    let before = system.count();
    system.update(0.1);
    assert!(system.count() <= before);

    for _ in 0..5 {
        system.update(0.1);
    }
    assert!(system.emitter(id).is_none());
    assert_eq!(*fired.borrow(), 1);
}

#[test]
fn test_particle_events_follow_lifecycle() {
    let mut system = System::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    for kind in [EventKind::ParticleCreated, EventKind::ParticleDead] {
        let log = Rc::clone(&log);
        system.add_event_listener(kind, move |event| log.borrow_mut().push(event.kind()));
    }

    let mut emitter = Emitter::new().with_seed(6).with_rate(Rate::new(2.0, 0.1));
    emitter.add_initializer(Initializer::life(0.15));
    emitter.emit(1.0, EmitLife::Keep).unwrap();
    system.add_emitter(emitter);

    system.update(0.1);
    system.update(0.1);
    assert_eq!(
        *log.borrow(),
        vec![
            EventKind::ParticleCreated,
            EventKind::ParticleCreated,
            EventKind::ParticleDead,
            EventKind::ParticleDead,
        ]
    );
}

// ============================================================================
// Zones
// ============================================================================

#[test]
fn test_box_zone_contains_bounded_particles() {
    let arena = Zone::boxed(Vec3::ZERO, 200.0, 200.0, 200.0).with_cross_type(CrossType::Bound);
    let mut emitter = Emitter::new().with_seed(7).with_rate(Rate::new(20.0, 0.05));
    emitter
        .add_initializer(Initializer::position(vec![Zone::boxed(Vec3::ZERO, 100.0, 100.0, 100.0)]))
        .add_initializer(Initializer::radial_velocity(Span::new(2.0, 6.0), Vec3::Y, 180.0));
    emitter.add_behaviour(Behaviour::cross_zone(arena));
    emitter.add_behaviour(Behaviour::gravity(3.0));
    emitter.emit(1.0, EmitLife::Keep).unwrap();

    let mut pool = Pool::new();
    for _ in 0..120 {
        emitter.update(1.0 / 60.0, &mut EmitterContext::new(&mut pool));
        for particle in emitter.particles() {
            let p = particle.position();
            let r = particle.motion.radius;
            for axis in 0..3 {
                assert!(p[axis] - r >= -100.0 - 1e-3, "{p:?}");
                assert!(p[axis] + r <= 100.0 + 1e-3, "{p:?}");
            }
        }
    }
    assert_eq!(emitter.count(), 20);
}

#[test]
fn test_sphere_dead_zone_kills_escapees() {
    let mut emitter = Emitter::new().with_seed(8).with_rate(Rate::new(10.0, 0.1));
    emitter.add_initializer(Initializer::vector_velocity(Vec3::new(5.0, 0.0, 0.0), 0.0));
    emitter.add_behaviour(Behaviour::cross_zone(Zone::sphere(Vec3::ZERO, 50.0)));
    emitter.emit(1.0, EmitLife::Keep).unwrap();

    let mut pool = Pool::new();
    emitter.update(0.01, &mut EmitterContext::new(&mut pool));
    assert_eq!(emitter.count(), 10);
    for _ in 0..10 {
        emitter.update(0.05, &mut EmitterContext::new(&mut pool));
    }
    assert_eq!(emitter.count(), 0);
}

// ============================================================================
// Behaviours
// ============================================================================

#[test]
fn test_collision_separates_overlapping_pair() {
    let behaviour = Behaviour::collision(false, None);
    let BehaviourKind::Collision(collision) = &behaviour.kind else {
        panic!("expected a collision behaviour");
    };

    let mut a = Particle::new();
    let mut b = Particle::new();
    a.motion.radius = 5.0;
    b.motion.radius = 5.0;
    b.motion.position = Vec3::new(6.0, 0.0, 0.0);

    collision.resolve(&mut a, &mut b);
    let separation = (b.position() - a.position()).length();
    assert!(separation >= 10.0, "{separation}");
    assert!((a.position().x + 2.25).abs() < 1e-5);
    assert!((b.position().x - 8.25).abs() < 1e-5);
}

#[test]
fn test_collision_behaviour_inside_emitter() {
    let mut emitter = Emitter::new().with_seed(9).with_rate(Rate::new(2.0, 0.1));
    emitter.add_initializer(Initializer::position(vec![Zone::line(
        Vec3::new(-3.0, 0.0, 0.0),
        Vec3::new(3.0, 0.0, 0.0),
    )]));
    emitter.add_initializer(Initializer::radius(5.0));
    emitter.add_behaviour(Behaviour::collision(false, None));
    emitter.emit(1.0, EmitLife::Keep).unwrap();

    let mut pool = Pool::new();
    emitter.update(0.01, &mut EmitterContext::new(&mut pool));
    emitter.update(0.01, &mut EmitterContext::new(&mut pool));

    let particles = emitter.particles();
    let gap = (particles[0].position() - particles[1].position()).length();
    assert!(gap >= 10.0, "{gap}");
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_builds_running_system() {
    let json = r#"{
        "emitters": [{
            "name": "jet",
            "seed": 10,
            "rate": { "count": 4, "interval": 0.05 },
            "emission": {},
            "initializers": [
                { "type": "Life", "properties": { "life": [1.0, 2.0] } },
                { "type": "Position", "properties": { "zones": [{ "type": "PointZone", "properties": { "position": [0, 10, 0] } }] } },
                { "type": "VectorVelocity", "properties": { "velocity": [0, 2, 0] } }
            ],
            "behaviours": [
                { "type": "Gravity", "properties": { "g": 1 } },
                { "type": "Alpha", "properties": { "a": 1, "b": 0 } }
            ]
        }]
    }"#;
    let mut system = SystemConfig::from_json(json).unwrap().build().unwrap();
    system.update(0.05);
    assert_eq!(system.count(), 4);
    let particle = &system.emitters()[0].particles()[0];
    assert!(particle.position().y > 10.0);
}

#[test]
fn test_config_allowlists() {
    let initializer = EmitterConfig {
        initializers: vec![ComponentConfig::new("Body", json!({}))],
        ..Default::default()
    };
    assert!(matches!(
        initializer.build(),
        Err(ParticleError::UnsupportedInitializer(_))
    ));

    let behaviour = EmitterConfig {
        behaviours: vec![ComponentConfig::new("Collision", json!({}))],
        ..Default::default()
    };
    assert!(matches!(
        behaviour.build(),
        Err(ParticleError::UnsupportedBehaviour(_))
    ));

    let zone = EmitterConfig {
        initializers: vec![ComponentConfig::new(
            "Position",
            json!({ "zones": [{ "type": "ScreenZone" }] }),
        )],
        ..Default::default()
    };
    assert!(matches!(zone.build(), Err(ParticleError::UnsupportedZone(_))));
}
