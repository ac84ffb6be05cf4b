//! Simulation configuration.
//!
//! Every field has a default, so a JSON file only needs the values it changes.

use std::{path::Path, time::Duration};

use anyhow::{ensure, Context};
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Pointer driven trail with constellation links
    #[default]
    Cursor,
    /// Ambient emitter with cycling weather, no links
    Garden,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 300.0,
            damping: 20.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub variant: Variant,
    pub tick_interval_ms: u64,

    /// Maximum number of live particles
    pub capacity: usize,
    /// Chance that a single spawn request produces a particle
    pub spawn_probability: f64,
    /// Half-width of the square around the origin new particles land in
    pub jitter: f32,
    /// Per-axis bound of the random initial velocity
    pub speed: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Lifetime of a new particle in ticks
    pub max_life: u32,
    /// Added to the vertical velocity every tick, positive is down
    pub gravity: f32,

    pub link_threshold: f32,

    pub viewport: Vec2,
    /// Ticks between ambient emissions
    pub emit_period: u32,
    pub weather_period_ms: u64,

    pub spring: SpringConfig,
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Cursor,
            tick_interval_ms: 16,

            capacity: 20,
            spawn_probability: 0.3,
            jitter: 10.0,
            speed: 1.0,
            min_size: 2.0,
            max_size: 6.0,
            max_life: 60,
            gravity: 0.02,

            link_threshold: 150.0,

            viewport: Vec2::new(1280.0, 720.0),
            emit_period: 4,
            weather_period_ms: 8000,

            spring: SpringConfig::default(),
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config `{}`", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config `{}`", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.capacity > 0, "capacity must be at least 1");
        ensure!(self.max_life > 0, "max_life must be at least 1 tick");
        ensure!(self.tick_interval_ms > 0, "tick_interval_ms must be positive");
        ensure!(self.emit_period > 0, "emit_period must be at least 1 tick");
        ensure!(
            (0.0..=1.0).contains(&self.spawn_probability),
            "spawn_probability must be within [0, 1], got {}",
            self.spawn_probability
        );

        for (name, value) in [
            ("jitter", self.jitter),
            ("speed", self.speed),
            ("min_size", self.min_size),
            ("max_size", self.max_size),
            ("gravity", self.gravity),
            ("link_threshold", self.link_threshold),
            ("spring.stiffness", self.spring.stiffness),
            ("spring.damping", self.spring.damping),
        ] {
            ensure!(value.is_finite(), "{} must be finite, got {}", name, value);
        }
        ensure!(self.viewport.is_finite(), "viewport must be finite");

        ensure!(self.link_threshold >= 0.0, "link_threshold can't be negative");
        ensure!(self.jitter >= 0.0, "jitter can't be negative");
        ensure!(self.speed >= 0.0, "speed can't be negative");
        // Random draws span the whole range, so its width has to fit in an f32 too.
        ensure!(
            (2.0 * self.jitter).is_finite() && (2.0 * self.speed).is_finite(),
            "jitter and speed must be below {}",
            f32::MAX / 2.0
        );
        ensure!(
            self.min_size > 0.0 && self.min_size < self.max_size,
            "size range {}..{} is empty",
            self.min_size,
            self.max_size
        );
        ensure!(
            (self.max_size - self.min_size).is_finite(),
            "size range {}..{} is too wide",
            self.min_size,
            self.max_size
        );
        ensure!(
            self.viewport.x > 0.0 && self.viewport.y > 0.0,
            "viewport must have a positive size"
        );
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Time step handed to the cursor spring, in seconds.
    pub fn tick_seconds(&self) -> f32 {
        self.tick_interval().as_secs_f32()
    }

    /// Number of ticks a weather phase lasts, at least one.
    pub fn weather_ticks(&self) -> u64 {
        (self.weather_period_ms / self.tick_interval_ms.max(1)).max(1)
    }
}
