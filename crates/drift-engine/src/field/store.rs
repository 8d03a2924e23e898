//! Particle storage: a flat Vec rebuilt wholesale on (re)initialization.

use glam::Vec2;

use super::particle::Particle;
use crate::core::config::FieldConfig;
use crate::core::rng::Rng;

/// Owns the mutable particle set.
/// Designed for small-to-medium counts (hundreds, not millions).
pub struct ParticleField {
    pub particles: Vec<Particle>,
    pub rng: Rng,
    width: f32,
    height: f32,
    /// Count used by `reinitialize`; fixed at construction.
    count: usize,
}

impl ParticleField {
    pub fn new(config: &FieldConfig) -> Self {
        let mut rng = Rng::new(config.seed);
        let particles = build_batch(&mut rng, config.particle_count, config.width, config.height);
        Self {
            particles,
            rng,
            width: config.width,
            height: config.height,
            count: config.particle_count,
        }
    }

    /// Rebuild the whole set with the last-known count and new bounds.
    /// The fresh batch is built fully, then swapped in.
    pub fn reinitialize(&mut self, width: f32, height: f32) {
        let fresh = build_batch(&mut self.rng, self.count, width, height);
        self.particles = fresh;
        self.width = width;
        self.height = height;
    }

    /// Update bounds without rebuilding. Particles left outside are
    /// repaired by the next tick's boundary clamp.
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

fn build_batch(rng: &mut Rng, count: usize, width: f32, height: f32) -> Vec<Particle> {
    let mut batch = Vec::with_capacity(count);
    for _ in 0..count {
        batch.push(Particle::spawn(rng, width, height));
    }
    batch
}
