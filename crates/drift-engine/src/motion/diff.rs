//! Frame differencing over downscaled camera frames.
//!
//! No vision model anywhere: a sampled per-pixel difference against the
//! previous frame, a centroid over the pixels that moved, and a count
//! threshold standing in for "how big is the moving thing".

use glam::Vec2;

use crate::core::config::EstimatorConfig;
use crate::input::pointer::PointerState;

/// Raw result of differencing two frames: how many sampled pixels moved
/// and where their mass sits, in analysis-surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub pixel_count: u32,
    pub centroid: Vec2,
}

/// Compare two RGBA frames of analysis size, sampling every
/// `sample_step`-th pixel on both axes. A sampled pixel whose summed
/// channel difference exceeds `diff_threshold` counts as motion.
/// Returns `None` when nothing moved at all.
pub fn detect(prev: &[u8], curr: &[u8], cfg: &EstimatorConfig) -> Option<Motion> {
    let w = cfg.analysis_width as usize;
    let h = cfg.analysis_height as usize;
    let step = cfg.sample_step.max(1) as usize;

    let mut count = 0u32;
    let mut sum = Vec2::ZERO;
    let mut y = 0;
    while y < h {
        let mut x = 0;
        while x < w {
            let i = (y * w + x) * 4;
            let diff = (curr[i] as i32 - prev[i] as i32).unsigned_abs()
                + (curr[i + 1] as i32 - prev[i + 1] as i32).unsigned_abs()
                + (curr[i + 2] as i32 - prev[i + 2] as i32).unsigned_abs();
            if diff > cfg.diff_threshold {
                count += 1;
                sum += Vec2::new(x as f32, y as f32);
            }
            x += step;
        }
        y += step;
    }

    if count == 0 {
        None
    } else {
        Some(Motion {
            pixel_count: count,
            centroid: sum / count as f32,
        })
    }
}

/// Map raw motion to a pointer estimate: require enough motion pixels,
/// mirror the x axis (the camera view is mirrored relative to natural
/// on-screen interaction), scale analysis space to canvas space, and
/// read the gesture from the motion area — a large moving region reads
/// as an open hand.
pub fn to_pointer(
    motion: Option<Motion>,
    cfg: &EstimatorConfig,
    canvas: Vec2,
) -> Option<PointerState> {
    let m = motion?;
    if m.pixel_count <= cfg.min_motion_pixels {
        return None;
    }
    let mirrored_x = cfg.analysis_width as f32 - m.centroid.x;
    let x = mirrored_x / cfg.analysis_width as f32 * canvas.x;
    let y = m.centroid.y / cfg.analysis_height as f32 * canvas.y;
    Some(PointerState::new(x, y, m.pixel_count > cfg.open_motion_pixels))
}
