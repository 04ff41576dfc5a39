//! Fireworks: rockets that burst into colored sparks.
//!
//! A launcher fires rockets upward; each rocket that runs out of fuel is
//! replaced by an explosion emitter at its last position. Rocket deaths are
//! observed on the launcher itself, so sparks never trigger bursts. A renderer tallies
//! what it is told and the system prints a line per simulated second.
//!
//! Run with: RUST_LOG=debug cargo run --example fireworks

use ember::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct Tally {
    created: usize,
    dead: usize,
    live: usize,
}

impl Renderer for Tally {
    fn on_system_update(&mut self, system: &System) {
        self.live = system.count();
    }

    fn on_particle_created(&mut self, _particle: &Particle) {
        self.created += 1;
    }

    fn on_particle_dead(&mut self, _particle: &Particle) {
        self.dead += 1;
    }
}

fn launcher() -> Emitter {
    let mut emitter = Emitter::new()
        .with_name("launcher")
        .with_bind_emitter_event(true)
        .with_position(Vec3::new(0.0, -300.0, 0.0))
        .with_rate(Rate::new(1.0, Span::new(0.4, 0.8)));
    emitter
        .add_initializer(Initializer::life(Span::new(1.0, 1.4)))
        .add_initializer(Initializer::radius(3.0))
        .add_initializer(Initializer::radial_velocity(Span::new(5.0, 6.5), Vec3::Y, 10.0));
    emitter.add_behaviour(Behaviour::gravity(2.0));
    emitter
}

fn burst(position: Vec3) -> Result<Emitter> {
    let mut emitter = presets::explosion(position, 120);
    emitter.add_behaviour(Behaviour::color(
        ColorSpan::Random,
        Some(ColorSpan::solid(Vec3::new(1.0, 0.4, 0.1))),
    ));
    emitter.add_behaviour(Behaviour::gravity(1.5));
    emitter.emit(1.0, EmitLife::Seconds(2.0))?;
    Ok(emitter)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut system = System::new();
    let (tally, handle) = renderer::shared(Tally::default());
    system.add_renderer(handle);

    let rockets: Rc<RefCell<Vec<Vec3>>> = Rc::default();
    let sink = Rc::clone(&rockets);
    let mut launcher = launcher();
    launcher.add_event_listener(EventKind::ParticleDead, move |event| {
        if let Event::ParticleDead(rocket) = event {
            sink.borrow_mut().push(rocket.position());
        }
    });
    launcher.emit(f32::INFINITY, EmitLife::Keep)?;
    system.add_emitter(launcher);

    let frame = 1.0 / 60.0;
    for step in 1..=600 {
        system.update(frame);

        for position in rockets.borrow_mut().drain(..) {
            system.add_emitter(burst(position)?);
        }

        if step % 60 == 0 {
            let tally = tally.borrow();
            log::info!(
                "t={:>2}s emitters={:>2} live={:>5} created={:>6} dead={:>6}",
                step / 60,
                system.emitters().len(),
                tally.live,
                tally.created,
                tally.dead
            );
        }
    }

    system.destroy();
    Ok(())
}
