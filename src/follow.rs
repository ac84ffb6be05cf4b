use glam::Vec2;

use crate::config::SpringConfig;

/// Glow that chases the pointer on a damped spring.
pub struct FollowModule {
    pub enabled: bool,

    pub position: Vec2,
    pub velocity: Vec2,
    pub target: Vec2,

    spring: SpringConfig,
}

impl FollowModule {
    pub fn new(spring: SpringConfig) -> Self {
        Self {
            enabled: false,

            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            target: Vec2::ZERO,

            spring,
        }
    }

    pub fn pointer_moved(&mut self, target: Vec2) {
        self.target = target;
        self.enabled = true;
    }

    pub fn pointer_left(&mut self) {
        self.enabled = false;
    }

    /// Semi-implicit Euler step of a unit mass spring.
    pub fn update(&mut self, dt: f32) {
        let displacement = self.position - self.target;
        let acceleration =
            -self.spring.stiffness * displacement - self.spring.damping * self.velocity;

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Glow position, or `None` while the pointer is outside.
    pub fn cursor(&self) -> Option<Vec2> {
        self.enabled.then_some(self.position)
    }
}
