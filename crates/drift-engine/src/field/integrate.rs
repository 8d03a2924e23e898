//! One simulation tick over the whole field.
//!
//! Per particle, in fixed order: pointer force, pairwise separation,
//! damping, gravity bias, position update, boundary bounce, lifecycle.
//! The pairwise pass is O(n²), which is fine at the reference scale of a
//! few hundred particles; a uniform spatial grid is the extension point
//! for anything larger.

use glam::Vec2;

use super::store::ParticleField;
use crate::input::pointer::PointerState;

/// Pointer interaction parameters, copied from the config each tick.
#[derive(Debug, Clone, Copy)]
pub struct Interaction {
    /// Falloff radius in pixels.
    pub radius: f32,
    /// Force multiplier.
    pub strength: f32,
}

/// Distance under which particles push each other apart.
pub const SEPARATION_RADIUS: f32 = 20.0;
/// Peak separation impulse per tick.
pub const SEPARATION_IMPULSE: f32 = 0.05;
/// Per-tick exponential velocity decay.
pub const DAMPING: f32 = 0.98;
/// Constant downward drift per tick.
pub const GRAVITY: f32 = 0.02;
/// Velocity retained (and inverted) on the axis that hit a wall.
pub const BOUNCE_DAMPING: f32 = 0.5;

/// Advance every particle by one tick.
pub fn step(field: &mut ParticleField, pointer: Option<PointerState>, interaction: Interaction) {
    let bounds = field.bounds();
    let n = field.particles.len();

    for i in 0..n {
        // Pairwise separation is read out before the mutable borrow.
        // Particles earlier in the pass have already moved this tick;
        // that asymmetry is part of the model.
        let pos_i = field.particles[i].pos;
        let mut push = Vec2::ZERO;
        for j in 0..n {
            if j == i {
                continue;
            }
            let delta = field.particles[j].pos - pos_i;
            let d = delta.length();
            if d > 0.0 && d < SEPARATION_RADIUS {
                push -= delta / d * ((SEPARATION_RADIUS - d) / SEPARATION_RADIUS)
                    * SEPARATION_IMPULSE;
            }
        }

        let p = &mut field.particles[i];

        // Pointer force: linear falloff, 1 at the pointer, 0 at the radius
        // edge. An open hand repels, a closed hand attracts. A particle
        // exactly on the pointer gets no force — the direction is
        // undefined at distance zero.
        if let Some(ptr) = pointer {
            let delta = p.pos - ptr.pos;
            let d = delta.length();
            if d > 0.0 && d < interaction.radius {
                let force = (interaction.radius - d) / interaction.radius;
                let dir = if ptr.open { 1.0 } else { -1.0 };
                p.vel += delta / d * (force * interaction.strength * dir);
            }
        }

        p.vel += push;
        p.vel *= DAMPING;
        p.vel.y += GRAVITY;
        p.pos += p.vel;

        // Soft bounce: clamp to the wall and lose energy on that axis.
        if p.pos.x < 0.0 {
            p.pos.x = 0.0;
            p.vel.x *= -BOUNCE_DAMPING;
        } else if p.pos.x > bounds.x {
            p.pos.x = bounds.x;
            p.vel.x *= -BOUNCE_DAMPING;
        }
        if p.pos.y < 0.0 {
            p.pos.y = 0.0;
            p.vel.y *= -BOUNCE_DAMPING;
        } else if p.pos.y > bounds.y {
            p.pos.y = bounds.y;
            p.vel.y *= -BOUNCE_DAMPING;
        }

        p.tick_lifecycle(&mut field.rng);
    }
}
