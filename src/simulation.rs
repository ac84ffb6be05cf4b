use glam::Vec2;
use log::trace;
use rand::Rng;

use crate::{
    config::{SimConfig, Variant},
    emitter::Emitter,
    follow::FollowModule,
    frame::Frame,
    links::{links, Link},
    particle::{ParticleId, ParticleInit, ParticleSet},
    physics::PhysicsModule,
    spawner::Spawner,
};

/// Input delivered from outside the tick loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Moved(Vec2),
    Left,
}

/// The particle set and everything that acts on it. Owns all of its state, so
/// a caller drives it with `pointer` and `step` and reads it with `snapshot`.
pub struct Simulation<R: Rng> {
    variant: Variant,
    dt: f32,
    link_threshold: f32,

    particles: ParticleSet,
    spawner: Spawner<R>,
    physics: PhysicsModule,
    follow: FollowModule,
    emitter: Option<Emitter>,

    links: Vec<Link>,
    tick: u64,
}

impl<R: Rng> Simulation<R> {
    pub fn new(config: &SimConfig, rng: R) -> Self {
        let emitter = (config.variant == Variant::Garden).then(|| {
            Emitter::new(config.viewport, config.emit_period, config.weather_ticks())
        });

        Self {
            variant: config.variant,
            dt: config.tick_seconds(),
            link_threshold: config.link_threshold,

            particles: ParticleSet::new(config.capacity),
            spawner: Spawner::new(config, rng),
            physics: PhysicsModule::new(config.gravity),
            follow: FollowModule::new(config.spring),
            emitter,

            links: Vec::new(),
            tick: 0,
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Applies a pointer event. In the cursor variant a move also runs a
    /// spawn trial at the pointer.
    pub fn pointer(&mut self, event: PointerEvent) -> Option<ParticleId> {
        match event {
            PointerEvent::Moved(position) => {
                self.follow.pointer_moved(position);
                match self.variant {
                    Variant::Cursor => self.spawn(position),
                    Variant::Garden => None,
                }
            }
            PointerEvent::Left => {
                self.follow.pointer_left();
                None
            }
        }
    }

    pub fn spawn(&mut self, origin: Vec2) -> Option<ParticleId> {
        self.spawner.spawn(&mut self.particles, origin, Vec2::ZERO)
    }

    /// Places a fully specified particle, subject to the same cap.
    pub fn insert(&mut self, init: ParticleInit) -> ParticleId {
        self.particles.insert(init)
    }

    /// One fixed step: emit, integrate, reap, then recompute links.
    pub fn step(&mut self) {
        if let Some(emitter) = &mut self.emitter {
            emitter.tick(&mut self.spawner, &mut self.particles);
        }

        let reaped = self.physics.step(&mut self.particles);
        if reaped > 0 {
            trace!("tick {}: reaped {} particles", self.tick, reaped);
        }

        self.follow.update(self.dt);

        self.links = match self.variant {
            Variant::Cursor => links(self.particles.iter(), self.link_threshold),
            Variant::Garden => Vec::new(),
        };

        self.tick += 1;
    }

    pub fn snapshot(&self) -> Frame {
        Frame {
            tick: self.tick,
            particles: self.particles.to_vec(),
            links: self.links.clone(),
            cursor: self.follow.cursor(),
            weather: self.emitter.as_ref().map(Emitter::weather),
            tick_rate: 0.0,
        }
    }
}
