//! Short-lived decorative particles: spawned around a pointer or by an
//! ambient emitter, pulled down by gravity, linked to their neighbours and
//! reaped when their lifetime runs out.

pub mod cli;
pub mod config;
pub mod emitter;
pub mod follow;
pub mod frame;
pub mod framepace;
pub mod links;
pub mod particle;
pub mod physics;
pub mod scheduler;
pub mod simulation;
pub mod spawner;
pub mod stats;
pub mod types;

#[cfg(feature = "capture")]
pub mod capture;

pub use config::{SimConfig, Variant};
pub use frame::{Frame, ParticleInstance};
pub use links::Link;
pub use particle::{Particle, ParticleId, ParticleInit, ParticleSet};
pub use scheduler::{PointerInput, TickScheduler};
pub use simulation::{PointerEvent, Simulation};
pub use types::{Color, Kind};
