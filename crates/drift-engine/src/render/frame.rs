//! One frame of the field: trail fade, link lines, particle sprites,
//! pointer halo. One pass per visual family, all into the same surface.

use glam::Vec2;

use super::surface::{Surface, BACKGROUND};
use crate::field::store::ParticleField;
use crate::input::pointer::PointerState;

/// Opacity of the per-frame backdrop overlay. Prior frames fade under it
/// instead of vanishing — this is the trail effect, not a missing clear.
pub const TRAIL_FADE: f32 = 0.15;

/// Pairs closer than this get a connecting line.
pub const LINK_RADIUS: f32 = 50.0;
const LINK_RGB: [u8; 3] = [148, 163, 216];
const LINK_ALPHA: f32 = 0.25;

/// Glow sprite radius relative to the particle core.
const GLOW_SCALE: f32 = 3.0;
const GLOW_ALPHA: f32 = 0.45;

const HALO_OPEN_RGB: [u8; 3] = [251, 146, 60];
const HALO_CLOSED_RGB: [u8; 3] = [34, 211, 238];
const HALO_ALPHA: f32 = 0.10;
const HALO_DOT_RADIUS: f32 = 5.0;
const HALO_DOT_ALPHA: f32 = 0.9;

/// Draw the whole field into the surface.
pub fn draw_frame(
    surface: &mut Surface,
    field: &ParticleField,
    pointer: Option<PointerState>,
    interaction_radius: f32,
) {
    surface.fade(BACKGROUND, TRAIL_FADE);

    // Link pass: same O(n²) ceiling as the separation force. Alpha falls
    // off linearly with distance; purely visual.
    let n = field.particles.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let a = field.particles[i].pos;
            let b = field.particles[j].pos;
            let d = a.distance(b);
            if d < LINK_RADIUS {
                surface.line(a, b, LINK_RGB, (1.0 - d / LINK_RADIUS) * LINK_ALPHA);
            }
        }
    }

    // Each particle twice: soft glow at 3× radius, then the solid core.
    for p in field.iter() {
        let fade = p.fade();
        if fade <= 0.0 {
            continue;
        }
        let rgb = p.hue.rgb();
        surface.glow_circle(p.pos, p.radius * GLOW_SCALE, rgb, fade * GLOW_ALPHA);
        surface.fill_circle(p.pos, p.radius, rgb, fade);
    }

    if let Some(ptr) = pointer {
        let rgb = if ptr.open { HALO_OPEN_RGB } else { HALO_CLOSED_RGB };
        surface.glow_circle(ptr.pos, interaction_radius, rgb, HALO_ALPHA);
        surface.fill_circle(ptr.pos, HALO_DOT_RADIUS, rgb, HALO_DOT_ALPHA);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FieldConfig;
    use crate::field::hue::Hue;

    fn empty_field(w: f32, h: f32) -> ParticleField {
        ParticleField::new(&FieldConfig::default().with_size(w, h).with_particle_count(0))
    }

    #[test]
    fn trail_pass_attenuates_instead_of_clearing() {
        let mut surface = Surface::new(32, 32);
        surface.blend_pixel(16, 16, [255, 255, 255], 1.0);
        let field = empty_field(32.0, 32.0);
        draw_frame(&mut surface, &field, None, 150.0);
        let px = surface.pixel(16, 16);
        assert!(px.r < 255, "overlay must attenuate");
        assert!(px.r > BACKGROUND.r, "previous frame must still show through");
    }

    #[test]
    fn close_pair_gets_a_link_line() {
        let mut surface = Surface::new(100, 100);
        let mut field = ParticleField::new(
            &FieldConfig::default()
                .with_size(100.0, 100.0)
                .with_particle_count(2),
        );
        field.particles[0].pos = Vec2::new(30.0, 50.0);
        field.particles[1].pos = Vec2::new(60.0, 50.0);
        // Make both invisible so only the link pass touches the midpoint.
        for p in field.particles.iter_mut() {
            p.age = 0;
        }
        draw_frame(&mut surface, &field, None, 150.0);
        let mid = surface.pixel(45, 50);
        assert!(mid.b > BACKGROUND.b, "link line missing at midpoint");
    }

    #[test]
    fn distant_pair_gets_no_link_line() {
        let mut surface = Surface::new(200, 50);
        let mut field = ParticleField::new(
            &FieldConfig::default()
                .with_size(200.0, 50.0)
                .with_particle_count(2),
        );
        field.particles[0].pos = Vec2::new(10.0, 25.0);
        field.particles[1].pos = Vec2::new(190.0, 25.0);
        for p in field.particles.iter_mut() {
            p.age = 0;
        }
        draw_frame(&mut surface, &field, None, 150.0);
        assert_eq!(surface.pixel(100, 25), BACKGROUND);
    }

    #[test]
    fn midlife_particle_is_drawn() {
        let mut surface = Surface::new(64, 64);
        let mut field = ParticleField::new(
            &FieldConfig::default()
                .with_size(64.0, 64.0)
                .with_particle_count(1),
        );
        let p = &mut field.particles[0];
        p.pos = Vec2::new(32.0, 32.0);
        p.radius = 3.0;
        p.hue = Hue::Mint;
        p.alpha = 1.0;
        p.lifespan = 100;
        p.age = 50;
        draw_frame(&mut surface, &field, None, 150.0);
        assert!(surface.pixel(32, 32).g > BACKGROUND.g);
    }

    #[test]
    fn halo_hue_encodes_gesture() {
        let field = empty_field(64.0, 64.0);
        let mut open = Surface::new(64, 64);
        draw_frame(&mut open, &field, Some(PointerState::new(32.0, 32.0, true)), 20.0);
        let mut closed = Surface::new(64, 64);
        draw_frame(&mut closed, &field, Some(PointerState::new(32.0, 32.0, false)), 20.0);
        assert_ne!(open.pixel(32, 32), closed.pixel(32, 32));
    }

    #[test]
    fn no_pointer_no_halo() {
        let field = empty_field(64.0, 64.0);
        let mut surface = Surface::new(64, 64);
        draw_frame(&mut surface, &field, None, 20.0);
        assert_eq!(surface.pixel(32, 32), BACKGROUND);
    }

    #[test]
    fn fixed_seed_renders_identically() {
        let cfg = FieldConfig::default()
            .with_size(64.0, 64.0)
            .with_particle_count(20)
            .with_seed(11);
        let field_a = ParticleField::new(&cfg);
        let field_b = ParticleField::new(&cfg);
        let mut sa = Surface::new(64, 64);
        let mut sb = Surface::new(64, 64);
        draw_frame(&mut sa, &field_a, None, 150.0);
        draw_frame(&mut sb, &field_b, None, 150.0);
        assert_eq!(sa.bytes(), sb.bytes());
    }
}
