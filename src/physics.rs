use glam::Vec2;

use crate::particle::ParticleSet;

/// Fixed-step integrator and reaper.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsModule {
    gravity: Vec2,
}

impl PhysicsModule {
    pub fn new(gravitational_constant: f32) -> Self {
        Self {
            gravity: Vec2::new(0.0, gravitational_constant),
        }
    }

    /// Advances every particle by one tick. Particles don't interact, so the
    /// order of updates is irrelevant.
    pub fn integrate(&self, particles: &mut ParticleSet) {
        for particle in particles.iter_mut() {
            particle.position += particle.velocity;
            particle.velocity += self.gravity;
            particle.life = particle.life.saturating_sub(1);
        }
    }

    /// Drops dead particles, keeping the survivors in order. Returns how many
    /// were removed.
    pub fn reap(&self, particles: &mut ParticleSet) -> usize {
        let before = particles.len();
        particles.retain(|p| p.is_alive());
        before - particles.len()
    }

    /// `integrate` followed by `reap`.
    pub fn step(&self, particles: &mut ParticleSet) -> usize {
        self.integrate(particles);
        self.reap(particles)
    }
}

impl Default for PhysicsModule {
    fn default() -> Self {
        Self::new(0.02)
    }
}
