/// Fixed-step tick accumulator.
///
/// The browser shell reports variable frame deltas; simulation constants
/// (damping, gravity, impulses) are expressed per tick, so logic must
/// advance in whole fixed steps regardless of frame timing.
pub struct TickAccumulator {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl TickAccumulator {
    /// Nominal tick rate: one tick per 60 Hz display refresh.
    pub const DEFAULT_DT: f32 = 1.0 / 60.0;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death after a long stall (max 5 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 5.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Discard any accumulated time (used when the loop restarts after a stop).
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

impl Default for TickAccumulator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DT)
    }
}
