//! Read-only output of one tick, for whatever draws it.

use glam::Vec2;

use crate::{emitter::Weather, links::Link, particle::Particle, stats::Summary};

#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub tick: u64,
    pub particles: Vec<Particle>,
    /// Always empty for the garden variant
    pub links: Vec<Link>,
    pub cursor: Option<Vec2>,
    pub weather: Option<Weather>,
    /// Achieved ticks per second
    pub tick_rate: f32,
}

/// Per-particle instance data laid out for a vertex buffer.
#[repr(C)]
#[derive(bytemuck::Pod, bytemuck::Zeroable, Clone, Copy, Debug, PartialEq)]
pub struct ParticleInstance {
    pub position: Vec2,
    pub size: f32,
    pub fade: f32,
    pub color: [f32; 4],
    pub kind: u32,
}

impl From<&Particle> for ParticleInstance {
    fn from(p: &Particle) -> Self {
        Self {
            position: p.position,
            size: p.render_size(),
            fade: p.fade(),
            color: p.color.to_rgba(),
            kind: p.kind.index(),
        }
    }
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.particles.iter().map(ParticleInstance::from).collect()
    }

    pub fn summary(&self) -> Summary {
        Summary::of(&self.particles)
    }
}
