//! Timer driven emission for the ambient garden background.

use glam::Vec2;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    particle::{ParticleId, ParticleSet},
    spawner::Spawner,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Sparkles,
    Rain,
    Wind,
}

impl Weather {
    pub fn next(self) -> Self {
        match self {
            Weather::Sparkles => Weather::Rain,
            Weather::Rain => Weather::Wind,
            Weather::Wind => Weather::Sparkles,
        }
    }

    fn drift(self) -> Vec2 {
        match self {
            Weather::Sparkles => Vec2::new(0.0, -1.5),
            Weather::Rain => Vec2::new(0.0, 6.0),
            Weather::Wind => Vec2::new(4.0, 0.0),
        }
    }
}

pub struct Emitter {
    viewport: Vec2,
    period: u32,
    weather_ticks: u64,

    weather: Weather,
    weather_elapsed: u64,
    countdown: u32,
}

impl Emitter {
    pub fn new(viewport: Vec2, period: u32, weather_ticks: u64) -> Self {
        let period = period.max(1);
        Self {
            viewport: if viewport.is_finite() {
                viewport.max(Vec2::ONE)
            } else {
                Vec2::ONE
            },
            period,
            weather_ticks: weather_ticks.max(1),

            weather: Weather::Sparkles,
            weather_elapsed: 0,
            countdown: period,
        }
    }

    pub fn weather(&self) -> Weather {
        self.weather
    }

    /// Advances the timers by one tick and emits through `spawner` when due.
    pub fn tick<R: Rng>(
        &mut self,
        spawner: &mut Spawner<R>,
        particles: &mut ParticleSet,
    ) -> Option<ParticleId> {
        self.weather_elapsed += 1;
        if self.weather_elapsed >= self.weather_ticks {
            self.weather_elapsed = 0;
            self.weather = self.weather.next();
            debug!("weather changed to {:?}", self.weather);
        }

        self.countdown -= 1;
        if self.countdown > 0 {
            return None;
        }
        self.countdown = self.period;

        let origin = self.origin(spawner.rng());
        spawner.spawn(particles, origin, self.weather.drift())
    }

    fn origin<R: Rng>(&self, rng: &mut R) -> Vec2 {
        let Vec2 { x: w, y: h } = self.viewport;
        match self.weather {
            Weather::Rain => Vec2::new(rng.gen_range(0.0..w), 0.0),
            Weather::Wind => Vec2::new(0.0, rng.gen_range(0.0..h)),
            Weather::Sparkles => Vec2::new(rng.gen_range(0.0..w), rng.gen_range(0.0..h * 0.55)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use rand::rngs::mock::StepRng;

    fn always_spawner() -> Spawner<StepRng> {
        let config = SimConfig {
            spawn_probability: 1.0,
            jitter: 0.0,
            speed: 0.0,
            ..Default::default()
        };
        Spawner::new(&config, StepRng::new(0, 0))
    }

    #[test]
    fn test_weather_cycle() {
        let mut emitter = Emitter::new(Vec2::new(100.0, 100.0), 1, 3);
        let mut spawner = always_spawner();
        let mut set = ParticleSet::new(4);

        let mut seen = Vec::new();
        for _ in 0..9 {
            emitter.tick(&mut spawner, &mut set);
            seen.push(emitter.weather());
        }

        use Weather::*;
        assert_eq!(
            seen,
            vec![Sparkles, Sparkles, Rain, Rain, Rain, Wind, Wind, Wind, Sparkles]
        );
    }

    #[test]
    fn test_emits_every_period() {
        let mut emitter = Emitter::new(Vec2::new(100.0, 100.0), 4, 1000);
        let mut spawner = always_spawner();
        let mut set = ParticleSet::new(100);

        let emitted = (0..12)
            .filter(|_| emitter.tick(&mut spawner, &mut set).is_some())
            .count();
        assert_eq!(emitted, 3);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_rain_falls_from_top() {
        let mut emitter = Emitter::new(Vec2::new(100.0, 100.0), 1, 1);
        let mut spawner = always_spawner();
        let mut set = ParticleSet::new(1);

        let id = emitter.tick(&mut spawner, &mut set).unwrap();
        assert_eq!(emitter.weather(), Weather::Rain);

        let p = set.get(id).unwrap();
        assert_eq!(p.position.y, 0.0);
        assert_eq!(p.velocity, Vec2::new(0.0, 6.0));
    }

    #[test]
    fn test_unbounded_viewport_never_panics() {
        let mut emitter = Emitter::new(Vec2::new(f32::INFINITY, 720.0), 1, 2);
        let mut spawner = always_spawner();
        let mut set = ParticleSet::new(8);

        for _ in 0..6 {
            assert!(emitter.tick(&mut spawner, &mut set).is_some());
        }
        assert!(set.iter().all(|p| p.position.is_finite()));
    }
}
