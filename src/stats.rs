use glam::Vec2;

use crate::particle::Particle;

/// Aggregate view of the live particles, mostly for logging.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Summary {
    pub count: usize,
    /// Weighted by particle size
    pub center_of_mass: Vec2,
    pub avg_velocity: Vec2,
    pub min_position: Vec2,
    pub max_position: Vec2,
}

impl Summary {
    pub fn of<'a>(particles: impl IntoIterator<Item = &'a Particle>) -> Self {
        let mut summary = Summary {
            min_position: Vec2::splat(f32::INFINITY),
            max_position: Vec2::splat(f32::NEG_INFINITY),
            ..Default::default()
        };
        let mut total_mass = 0.0;

        for p in particles {
            summary.count += 1;
            summary.center_of_mass += p.position * p.size;
            summary.avg_velocity += p.velocity;
            summary.min_position = summary.min_position.min(p.position);
            summary.max_position = summary.max_position.max(p.position);
            total_mass += p.size;
        }

        if summary.count == 0 {
            return Summary::default();
        }

        if total_mass > 0.0 {
            summary.center_of_mass /= total_mass;
        }
        summary.avg_velocity /= summary.count as f32;
        summary
    }

    pub fn extent(&self) -> Vec2 {
        (self.max_position - self.min_position).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        particle::{ParticleInit, ParticleSet},
        types::{Kind, PALETTE},
    };

    #[test]
    fn test_empty_summary() {
        assert_eq!(Summary::of(&[] as &[Particle]), Summary::default());
    }

    #[test]
    fn test_weighted_center() {
        let mut set = ParticleSet::new(2);
        for (x, size, vx) in [(0.0, 1.0, 2.0), (30.0, 2.0, 4.0)] {
            set.insert(ParticleInit {
                position: Vec2::new(x, 10.0),
                velocity: Vec2::new(vx, 0.0),
                size,
                max_life: 10,
                color: PALETTE[0],
                kind: Kind::Star,
            });
        }

        let summary = Summary::of(set.iter());
        assert_eq!(summary.count, 2);
        assert_eq!(summary.center_of_mass, Vec2::new(20.0, 10.0));
        assert_eq!(summary.avg_velocity, Vec2::new(3.0, 0.0));
        assert_eq!(summary.extent(), Vec2::new(30.0, 0.0));
    }
}
