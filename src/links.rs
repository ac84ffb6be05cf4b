//! Constellation lines between nearby particles.

use crate::particle::{Particle, ParticleId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: ParticleId,
    pub b: ParticleId,
    pub distance: f32,
    /// `1 - distance / threshold`, clamped at zero.
    pub opacity: f32,
}

/// Every unordered pair of distinct particles closer than `threshold`.
///
/// Quadratic in the number of particles, which is bounded by the set capacity.
pub fn links<'a, I>(particles: I, threshold: f32) -> Vec<Link>
where
    I: IntoIterator<Item = &'a Particle>,
{
    let particles: Vec<&Particle> = particles.into_iter().collect();
    let mut links = Vec::new();

    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let distance = a.position.distance(b.position);
            if distance < threshold {
                links.push(Link {
                    a: a.id,
                    b: b.id,
                    distance,
                    opacity: (1.0 - distance / threshold).max(0.0),
                });
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        particle::{ParticleInit, ParticleSet},
        types::{Kind, PALETTE},
    };
    use glam::Vec2;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn set_of(points: &[Vec2]) -> ParticleSet {
        let mut set = ParticleSet::new(points.len().max(1));
        for &position in points {
            set.insert(ParticleInit {
                position,
                velocity: Vec2::ZERO,
                size: 2.0,
                max_life: 60,
                color: PALETTE[4],
                kind: Kind::Sparkle,
            });
        }
        set
    }

    #[test]
    fn test_link_within_threshold() {
        let set = set_of(&[Vec2::ZERO, Vec2::new(100.0, 0.0)]);
        let links = links(set.iter(), 150.0);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].distance, 100.0);
        assert!((links[0].opacity - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_link_at_or_beyond_threshold() {
        let set = set_of(&[Vec2::ZERO, Vec2::new(200.0, 0.0)]);
        assert!(links(set.iter(), 150.0).is_empty());

        let set = set_of(&[Vec2::ZERO, Vec2::new(150.0, 0.0)]);
        assert!(links(set.iter(), 150.0).is_empty());
    }

    #[test]
    fn test_matches_exhaustive_oracle() {
        let mut rng = StdRng::seed_from_u64(3);
        let points: Vec<Vec2> = (0..20)
            .map(|_| Vec2::new(rng.gen_range(0.0..400.0), rng.gen_range(0.0..400.0)))
            .collect();
        let set = set_of(&points);
        let particles = set.to_vec();

        let found = links(set.iter(), 150.0);
        let mut expected = 0;
        for a in &particles {
            for b in &particles {
                if a.id < b.id && a.position.distance(b.position) < 150.0 {
                    expected += 1;
                    assert!(found
                        .iter()
                        .any(|l| (l.a, l.b) == (a.id, b.id) || (l.a, l.b) == (b.id, a.id)));
                }
            }
        }
        assert_eq!(found.len(), expected);
        assert!(found.iter().all(|l| l.a != l.b && l.distance < 150.0));
    }

    #[test]
    fn test_empty_and_single() {
        assert!(links(set_of(&[]).iter(), 150.0).is_empty());
        assert!(links(set_of(&[Vec2::ONE]).iter(), 150.0).is_empty());
    }
}
