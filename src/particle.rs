use std::collections::VecDeque;

use glam::Vec2;
use log::trace;

use crate::types::{Color, Kind};

/// Stable identity of a particle. Never handed out twice by the same set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    /// Ticks left before the reaper removes the particle, in `0..=max_life`.
    pub life: u32,
    pub max_life: u32,
    pub color: Color,
    pub kind: Kind,
}

impl Particle {
    /// Normalized remaining life, `1.0` at birth and `0.0` when dead.
    pub fn fade(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }

        self.life as f32 / self.max_life as f32
    }

    /// Comets are drawn at half their size.
    pub fn render_size(&self) -> f32 {
        match self.kind {
            Kind::Comet => self.size * 0.5,
            _ => self.size,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }
}

/// Everything needed to create a particle except its identity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleInit {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub max_life: u32,
    pub color: Color,
    pub kind: Kind,
}

/// The live particles in insertion order, bounded by `capacity`.
///
/// Inserting into a full set evicts from the front, so the oldest particles go
/// first. Order of the survivors is never changed.
#[derive(Clone, Debug)]
pub struct ParticleSet {
    particles: VecDeque<Particle>,
    capacity: usize,
    next_id: u64,
}

impl ParticleSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: VecDeque::with_capacity(capacity + 1),
            capacity,
            next_id: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Appends a new particle and returns its id, evicting the oldest ones if
    /// the cap would be exceeded.
    pub fn insert(&mut self, init: ParticleInit) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;

        self.particles.push_back(Particle {
            id,
            position: init.position,
            velocity: init.velocity,
            size: init.size,
            life: init.max_life,
            max_life: init.max_life,
            color: init.color,
            kind: init.kind,
        });

        while self.particles.len() > self.capacity {
            if let Some(evicted) = self.particles.pop_front() {
                trace!("evicted particle {:?}", evicted.id);
            }
        }

        id
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut()
    }

    /// Keeps only the particles matching `f`, preserving their order.
    pub fn retain(&mut self, f: impl FnMut(&Particle) -> bool) {
        self.particles.retain(f);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn to_vec(&self) -> Vec<Particle> {
        self.particles.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PALETTE;

    fn init_at(x: f32) -> ParticleInit {
        ParticleInit {
            position: Vec2::new(x, 0.0),
            velocity: Vec2::ZERO,
            size: 4.0,
            max_life: 60,
            color: PALETTE[0],
            kind: Kind::Star,
        }
    }

    #[test]
    fn test_insert_assigns_fresh_ids() {
        let mut set = ParticleSet::new(4);
        let a = set.insert(init_at(0.0));
        let b = set.insert(init_at(1.0));
        assert_ne!(a, b);
        assert_eq!(set.get(a).unwrap().life, 60);
    }

    #[test]
    fn test_insert_evicts_oldest() {
        let mut set = ParticleSet::new(20);
        let ids: Vec<_> = (0..20).map(|i| set.insert(init_at(i as f32))).collect();
        assert_eq!(set.len(), 20);

        let newest = set.insert(init_at(100.0));
        assert_eq!(set.len(), 20);
        assert!(set.get(ids[0]).is_none());
        assert!(set.get(ids[1]).is_some());
        assert_eq!(set.iter().last().unwrap().id, newest);
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut set = ParticleSet::new(2);
        let a = set.insert(init_at(0.0));
        set.clear();
        let b = set.insert(init_at(0.0));
        assert_ne!(a, b);
    }

    #[test]
    fn test_fade_and_render_size() {
        let mut set = ParticleSet::new(2);
        let id = set.insert(ParticleInit {
            kind: Kind::Comet,
            ..init_at(0.0)
        });
        let p = set.iter_mut().next().unwrap();
        p.life = 15;
        let p = set.get(id).unwrap();
        assert!((p.fade() - 0.25).abs() < f32::EPSILON);
        assert_eq!(p.render_size(), 2.0);
    }
}
