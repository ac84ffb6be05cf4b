use glam::Vec2;
use log::trace;
use rand::{seq::SliceRandom, Rng};

use crate::{
    config::SimConfig,
    particle::{ParticleId, ParticleInit, ParticleSet},
    types::{Kind, PALETTE},
};

/// Creates particles around a spawn point. All randomness comes from `R`.
pub struct Spawner<R: Rng> {
    rng: R,

    probability: f64,
    jitter: f32,
    speed: f32,
    size: (f32, f32),
    max_life: u32,
}

impl<R: Rng> Spawner<R> {
    pub fn new(config: &SimConfig, rng: R) -> Self {
        Self {
            rng,

            probability: if config.spawn_probability.is_nan() {
                0.0
            } else {
                config.spawn_probability.clamp(0.0, 1.0)
            },
            jitter: config.jitter,
            speed: config.speed,
            size: (config.min_size, config.max_size),
            max_life: config.max_life,
        }
    }

    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Runs the spawn trial and, if it passes, appends one particle near
    /// `origin`. `drift` is added to the random initial velocity.
    pub fn spawn(&mut self, set: &mut ParticleSet, origin: Vec2, drift: Vec2) -> Option<ParticleId> {
        if !self.rng.gen_bool(self.probability) {
            return None;
        }

        let init = self.create(origin, drift);
        let id = set.insert(init);
        trace!("spawned particle {:?} at {}", id, init.position);
        Some(id)
    }

    /// Draws a particle without inserting it.
    pub fn create(&mut self, origin: Vec2, drift: Vec2) -> ParticleInit {
        let jitter = Vec2::new(
            symmetric(&mut self.rng, self.jitter),
            symmetric(&mut self.rng, self.jitter),
        );
        let velocity = Vec2::new(
            symmetric(&mut self.rng, self.speed),
            symmetric(&mut self.rng, self.speed),
        );

        let (min_size, max_size) = self.size;
        let size = if max_size > min_size && (max_size - min_size).is_finite() {
            self.rng.gen_range(min_size..max_size)
        } else {
            min_size
        };

        ParticleInit {
            position: origin + jitter,
            velocity: velocity + drift,
            size,
            max_life: self.max_life,
            color: *PALETTE.choose(&mut self.rng).unwrap_or(&PALETTE[0]),
            kind: *Kind::ALL.choose(&mut self.rng).unwrap_or(&Kind::Star),
        }
    }
}

/// Uniform draw from `-half..half`, zero for an empty or unrepresentable range.
fn symmetric<R: Rng>(rng: &mut R, half: f32) -> f32 {
    if half > 0.0 && (2.0 * half).is_finite() {
        rng.gen_range(-half..half)
    } else {
        0.0
    }
}
