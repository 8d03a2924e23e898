//! Software RGBA surface.
//!
//! The core owns the frame buffer; the shell blits it to the canvas with
//! `putImageData` after reading it straight out of WASM memory. Keeping
//! the pixels here is what makes the trail effect work: the previous
//! frame is still in the buffer when the next one is composited over it.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// One RGBA8 pixel. 4-byte stride, matches ImageData byte order.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// The near-black backdrop trails fade toward.
pub const BACKGROUND: Rgba = Rgba::opaque(8, 8, 18);

/// A fixed-size pixel grid with alpha-compositing draw primitives.
/// All primitives clip to the surface; off-surface work is dropped.
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![BACKGROUND; (width * height) as usize],
        }
    }

    /// Reallocate for new dimensions and clear to the backdrop.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![BACKGROUND; (width * height) as usize];
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw bytes in RGBA order, `width * height * 4` long.
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Raw pointer for direct reads from WASM linear memory.
    pub fn as_ptr(&self) -> *const u8 {
        self.pixels.as_ptr() as *const u8
    }

    pub fn len_bytes(&self) -> usize {
        self.pixels.len() * 4
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Composite a uniform overlay over every pixel — the trail pass.
    pub fn fade(&mut self, overlay: Rgba, alpha: f32) {
        let a = alpha.clamp(0.0, 1.0);
        for px in &mut self.pixels {
            px.r = mix(px.r, overlay.r, a);
            px.g = mix(px.g, overlay.g, a);
            px.b = mix(px.b, overlay.b, a);
        }
    }

    /// Source-over blend one pixel. Out-of-bounds coordinates are dropped.
    pub fn blend_pixel(&mut self, x: i32, y: i32, rgb: [u8; 3], alpha: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        let px = &mut self.pixels[(y as u32 * self.width + x as u32) as usize];
        px.r = mix(px.r, rgb[0], a);
        px.g = mix(px.g, rgb[1], a);
        px.b = mix(px.b, rgb[2], a);
    }

    /// Solid disc with a one-pixel soft edge.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, rgb: [u8; 3], alpha: f32) {
        if radius <= 0.0 {
            return;
        }
        let (x0, x1, y0, y1) = self.clip_box(center, radius + 1.0);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = Vec2::new(x as f32, y as f32).distance(center);
                let cover = (radius - d + 0.5).clamp(0.0, 1.0);
                if cover > 0.0 {
                    self.blend_pixel(x, y, rgb, alpha * cover);
                }
            }
        }
    }

    /// Radial gradient disc: full strength at the center, quadratic
    /// falloff to nothing at the rim.
    pub fn glow_circle(&mut self, center: Vec2, radius: f32, rgb: [u8; 3], alpha: f32) {
        if radius <= 0.0 {
            return;
        }
        let (x0, x1, y0, y1) = self.clip_box(center, radius);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = Vec2::new(x as f32, y as f32).distance(center);
                let t = 1.0 - d / radius;
                if t > 0.0 {
                    self.blend_pixel(x, y, rgb, alpha * t * t);
                }
            }
        }
    }

    /// Alpha-blended line, stepped one pixel at a time.
    pub fn line(&mut self, from: Vec2, to: Vec2, rgb: [u8; 3], alpha: f32) {
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil() as i32;
        if steps == 0 {
            self.blend_pixel(from.x.round() as i32, from.y.round() as i32, rgb, alpha);
            return;
        }
        for i in 0..=steps {
            let p = from + delta * (i as f32 / steps as f32);
            self.blend_pixel(p.x.round() as i32, p.y.round() as i32, rgb, alpha);
        }
    }

    /// Bounding box of a disc, clipped to the surface.
    fn clip_box(&self, center: Vec2, radius: f32) -> (i32, i32, i32, i32) {
        let x0 = ((center.x - radius).floor() as i32).max(0);
        let x1 = ((center.x + radius).ceil() as i32).min(self.width as i32 - 1);
        let y0 = ((center.y - radius).floor() as i32).max(0);
        let y1 = ((center.y + radius).ceil() as i32).min(self.height as i32 - 1);
        (x0, x1, y0, y1)
    }
}

fn mix(dst: u8, src: u8, a: f32) -> u8 {
    (dst as f32 + (src as f32 - dst as f32) * a).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_background() {
        let s = Surface::new(4, 4);
        assert_eq!(s.pixel(0, 0), BACKGROUND);
        assert_eq!(s.pixel(3, 3), BACKGROUND);
        assert_eq!(s.len_bytes(), 4 * 4 * 4);
    }

    #[test]
    fn rgba_is_four_bytes() {
        assert_eq!(std::mem::size_of::<Rgba>(), 4);
    }

    #[test]
    fn bytes_view_matches_pixels() {
        let mut s = Surface::new(2, 1);
        s.blend_pixel(0, 0, [255, 0, 0], 1.0);
        let bytes = s.bytes();
        assert_eq!(bytes.len(), 8);
        assert_eq!(bytes[0], 255);
        assert_eq!(bytes[3], 255); // alpha channel stays opaque
    }

    #[test]
    fn fade_moves_pixels_toward_overlay() {
        let mut s = Surface::new(2, 2);
        s.blend_pixel(0, 0, [200, 200, 200], 1.0);
        s.fade(BACKGROUND, 0.5);
        let px = s.pixel(0, 0);
        assert!(px.r < 200 && px.r > BACKGROUND.r);
    }

    #[test]
    fn blend_pixel_out_of_bounds_is_dropped() {
        let mut s = Surface::new(4, 4);
        s.blend_pixel(-1, 0, [255, 255, 255], 1.0);
        s.blend_pixel(0, 100, [255, 255, 255], 1.0);
        assert_eq!(s.pixel(0, 0), BACKGROUND);
    }

    #[test]
    fn fill_circle_covers_center() {
        let mut s = Surface::new(16, 16);
        s.fill_circle(Vec2::new(8.0, 8.0), 3.0, [0, 255, 0], 1.0);
        assert_eq!(s.pixel(8, 8).g, 255);
        // Far corner untouched
        assert_eq!(s.pixel(0, 0), BACKGROUND);
    }

    #[test]
    fn glow_fades_toward_rim() {
        let mut s = Surface::new(32, 32);
        s.glow_circle(Vec2::new(16.0, 16.0), 10.0, [255, 255, 255], 1.0);
        let center = s.pixel(16, 16).r;
        let near_rim = s.pixel(24, 16).r;
        assert!(center > near_rim);
        assert!(near_rim >= BACKGROUND.r);
    }

    #[test]
    fn circle_at_edge_clips_without_panic() {
        let mut s = Surface::new(8, 8);
        s.fill_circle(Vec2::new(0.0, 0.0), 5.0, [255, 0, 0], 1.0);
        s.glow_circle(Vec2::new(8.0, 8.0), 20.0, [255, 0, 0], 0.5);
        assert!(s.pixel(0, 0).r > BACKGROUND.r);
    }

    #[test]
    fn line_touches_both_endpoints() {
        let mut s = Surface::new(16, 16);
        s.line(Vec2::new(2.0, 2.0), Vec2::new(12.0, 10.0), [255, 255, 255], 1.0);
        assert!(s.pixel(2, 2).r > BACKGROUND.r);
        assert!(s.pixel(12, 10).r > BACKGROUND.r);
    }

    #[test]
    fn line_off_surface_clips_without_panic() {
        let mut s = Surface::new(8, 8);
        s.line(Vec2::new(-10.0, -10.0), Vec2::new(20.0, 20.0), [255, 255, 255], 1.0);
        assert!(s.pixel(4, 4).r > BACKGROUND.r);
    }

    #[test]
    fn resize_reallocates_and_clears() {
        let mut s = Surface::new(4, 4);
        s.blend_pixel(0, 0, [255, 255, 255], 1.0);
        s.resize(10, 6);
        assert_eq!(s.width(), 10);
        assert_eq!(s.height(), 6);
        assert_eq!(s.len_bytes(), 10 * 6 * 4);
        assert_eq!(s.pixel(0, 0), BACKGROUND);
    }
}
