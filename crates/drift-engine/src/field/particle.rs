//! A single field particle: kinematic state plus cosmetic lifecycle.

use glam::Vec2;

use super::hue::Hue;
use crate::core::rng::Rng;

/// A single particle with physics and rendering state.
///
/// Particles are never destroyed; when `age` passes `lifespan` the age
/// wraps to zero and a fresh base alpha is drawn, so the particle
/// flickers and respawns in place.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub hue: Hue,
    /// Base opacity in (0, 1]; modulated by the lifecycle fade when drawn.
    pub alpha: f32,
    pub age: u32,
    pub lifespan: u32,
}

impl Particle {
    pub const MIN_RADIUS: f32 = 1.0;
    pub const MAX_RADIUS: f32 = 4.0;
    pub const MIN_ALPHA: f32 = 0.5;
    pub const MAX_ALPHA: f32 = 1.0;

    /// Spawn a particle uniformly inside `[0, width] × [0, height]`.
    pub fn spawn(rng: &mut Rng, width: f32, height: f32) -> Self {
        Particle {
            pos: Vec2::new(rng.range(0.0, width), rng.range(0.0, height)),
            vel: Vec2::new(rng.range(-1.0, 1.0), rng.range(-1.0, 1.0)),
            radius: rng.range(Self::MIN_RADIUS, Self::MAX_RADIUS),
            hue: Hue::random(rng),
            alpha: rng.range(Self::MIN_ALPHA, Self::MAX_ALPHA),
            age: rng.int_range(0, 100),
            lifespan: rng.int_range(100, 200),
        }
    }

    /// Advance the cosmetic lifecycle by one tick. Does not affect physics.
    pub fn tick_lifecycle(&mut self, rng: &mut Rng) {
        self.age += 1;
        if self.age > self.lifespan {
            self.age = 0;
            self.alpha = rng.range(Self::MIN_ALPHA, Self::MAX_ALPHA);
        }
    }

    /// Render opacity: base alpha breathing over the lifecycle,
    /// peaking at the midpoint.
    pub fn fade(&self) -> f32 {
        let t = self.age as f32 / self.lifespan as f32;
        self.alpha * (t * std::f32::consts::PI).sin().max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_within_bounds() {
        let mut rng = Rng::new(42);
        for _ in 0..200 {
            let p = Particle::spawn(&mut rng, 800.0, 600.0);
            assert!(p.pos.x >= 0.0 && p.pos.x <= 800.0);
            assert!(p.pos.y >= 0.0 && p.pos.y <= 600.0);
            assert!(p.vel.x >= -1.0 && p.vel.x <= 1.0);
            assert!(p.radius >= 1.0 && p.radius < 4.0);
            assert!(p.alpha >= 0.5 && p.alpha <= 1.0);
            assert!(p.age < 100);
            assert!(p.lifespan >= 100 && p.lifespan < 200);
        }
    }

    #[test]
    fn lifecycle_wraps_and_redraws_alpha() {
        let mut rng = Rng::new(42);
        let mut p = Particle::spawn(&mut rng, 100.0, 100.0);
        p.age = p.lifespan;
        p.tick_lifecycle(&mut rng);
        assert_eq!(p.age, 0);
        assert!(p.alpha >= 0.5 && p.alpha <= 1.0);
    }

    #[test]
    fn fade_peaks_at_midlife() {
        let mut rng = Rng::new(1);
        let mut p = Particle::spawn(&mut rng, 100.0, 100.0);
        p.alpha = 1.0;
        p.lifespan = 100;
        p.age = 50;
        let mid = p.fade();
        p.age = 0;
        let start = p.fade();
        p.age = 100;
        let end = p.fade();
        assert!(mid > start && mid > end);
        assert!((mid - 1.0).abs() < 1e-3);
    }
}
