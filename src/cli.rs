use std::path::PathBuf;

use clap::Parser;

use crate::config::{SimConfig, Variant};

/// Headless run of the particle trail simulation
#[derive(Parser, Debug)]
#[command()]
pub struct Args {
    /// JSON config file, missing fields use the defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    pub variant: Option<Variant>,

    /// Gravitational Constant
    #[arg(short, long)]
    pub gravity: Option<f32>,

    /// Maximum number of live particles
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Milliseconds between ticks
    #[arg(long)]
    pub tick_ms: Option<u64>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// How long to run before stopping
    #[arg(short, long, default_value_t = 5.0)]
    pub seconds: f32,

    /// Write every frame's instance buffer to this file
    #[cfg(feature = "capture")]
    #[arg(long)]
    pub capture: Option<PathBuf>,
}

impl Args {
    /// Loads the config file if given and applies the overrides on top.
    pub fn sim_config(&self) -> anyhow::Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };

        if let Some(variant) = self.variant {
            config.variant = variant;
        }
        if let Some(gravity) = self.gravity {
            config.gravity = gravity;
        }
        if let Some(capacity) = self.capacity {
            config.capacity = capacity;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}
