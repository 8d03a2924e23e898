//! The shared pointer slot.
//!
//! Exactly one PointerState (or none) is visible to the simulation per
//! tick. The slot is last-writer-wins within the active source; writes
//! from the inactive source are dropped, and switching sources clears
//! the slot so particles never react to a ghost position left behind by
//! the previous source.

use glam::Vec2;

/// Normalized interaction point in canvas-pixel space, regardless of
/// whether it came from mouse/touch or the motion estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub pos: Vec2,
    /// Open hand repels, closed hand attracts.
    pub open: bool,
}

impl PointerState {
    pub fn new(x: f32, y: f32, open: bool) -> Self {
        Self {
            pos: Vec2::new(x, y),
            open,
        }
    }
}

/// Which adapter currently owns the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    /// Mouse/touch adapter (coordinates already in canvas space).
    Direct,
    /// The webcam motion estimator.
    Motion,
}

/// Single-writer pointer cell passed into the tick, not a global.
pub struct PointerSlot {
    state: Option<PointerState>,
    active: PointerSource,
}

impl PointerSlot {
    pub fn new() -> Self {
        Self {
            state: None,
            active: PointerSource::Direct,
        }
    }

    /// The currently published pointer, if any.
    pub fn get(&self) -> Option<PointerState> {
        self.state
    }

    pub fn active_source(&self) -> PointerSource {
        self.active
    }

    /// Switch the owning source, atomically dropping whatever the
    /// previous source last published. No-op when already active.
    pub fn select(&mut self, source: PointerSource) {
        if source != self.active {
            self.active = source;
            self.state = None;
        }
    }

    /// Publish an update from `source`. Ignored unless `source` owns the
    /// slot. `None` means "no interaction" and clears the slot.
    pub fn publish(&mut self, source: PointerSource, state: Option<PointerState>) {
        if source == self.active {
            self.state = state;
        }
    }

    pub fn clear(&mut self) {
        self.state = None;
    }
}

impl Default for PointerSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_and_get() {
        let mut slot = PointerSlot::new();
        slot.publish(PointerSource::Direct, Some(PointerState::new(10.0, 20.0, true)));
        let p = slot.get().unwrap();
        assert_eq!(p.pos, Vec2::new(10.0, 20.0));
        assert!(p.open);
    }

    #[test]
    fn last_writer_wins() {
        let mut slot = PointerSlot::new();
        slot.publish(PointerSource::Direct, Some(PointerState::new(1.0, 1.0, false)));
        slot.publish(PointerSource::Direct, Some(PointerState::new(2.0, 2.0, true)));
        assert_eq!(slot.get().unwrap().pos, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn inactive_source_writes_are_dropped() {
        let mut slot = PointerSlot::new();
        slot.publish(PointerSource::Motion, Some(PointerState::new(5.0, 5.0, false)));
        assert!(slot.get().is_none());
    }

    #[test]
    fn switching_sources_clears_stale_state() {
        let mut slot = PointerSlot::new();
        slot.publish(PointerSource::Direct, Some(PointerState::new(9.0, 9.0, false)));
        slot.select(PointerSource::Motion);
        assert!(slot.get().is_none(), "ghost pointer survived the switch");
        slot.publish(PointerSource::Motion, Some(PointerState::new(3.0, 4.0, true)));
        assert_eq!(slot.get().unwrap().pos, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn reselecting_active_source_keeps_state() {
        let mut slot = PointerSlot::new();
        slot.publish(PointerSource::Direct, Some(PointerState::new(7.0, 7.0, false)));
        slot.select(PointerSource::Direct);
        assert!(slot.get().is_some());
    }

    #[test]
    fn publish_none_clears() {
        let mut slot = PointerSlot::new();
        slot.publish(PointerSource::Direct, Some(PointerState::new(1.0, 1.0, false)));
        slot.publish(PointerSource::Direct, None);
        assert!(slot.get().is_none());
    }
}
