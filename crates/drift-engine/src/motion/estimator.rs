//! Motion-based hand estimator: camera lifecycle plus per-tick analysis.

use glam::Vec2;

use super::diff;
use super::source::{CameraError, FramePoll, FrameSource};
use crate::core::config::EstimatorConfig;
use crate::input::pointer::PointerState;

/// Where the estimator is in its camera lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatorPhase {
    /// Not running. Terminal errors land here; `start()` is the only way out.
    Idle,
    /// Camera started, waiting for the first decodable frame.
    Initializing,
    /// Analyzing one frame per tick.
    Active,
}

/// Outcome of one analysis tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Analysis {
    /// Nothing new this tick: idle, still warming up, or a transient
    /// read failure that was swallowed.
    Skipped,
    /// A fresh estimate. `None` means the scene is still — no pointer.
    Estimate(Option<PointerState>),
}

/// Infers a pointer from raw pixel motion. Owns the frame source and
/// the one-frame history buffer; publishes nothing itself — the caller
/// feeds estimates into the pointer slot.
pub struct HandEstimator<S: FrameSource> {
    source: S,
    config: EstimatorConfig,
    phase: EstimatorPhase,
    /// Seconds spent waiting for the first decodable frame.
    waited: f32,
    prev: Vec<u8>,
    curr: Vec<u8>,
    /// Whether `prev` holds a real frame yet.
    primed: bool,
    last_error: Option<CameraError>,
}

impl<S: FrameSource> HandEstimator<S> {
    pub fn new(source: S, config: EstimatorConfig) -> Self {
        let len = config.frame_len();
        Self {
            source,
            config,
            phase: EstimatorPhase::Idle,
            waited: 0.0,
            prev: vec![0; len],
            curr: vec![0; len],
            primed: false,
            last_error: None,
        }
    }

    pub fn phase(&self) -> EstimatorPhase {
        self.phase
    }

    /// The terminal error that sent the estimator back to Idle, if any.
    /// Cleared by the next `start()`.
    pub fn last_error(&self) -> Option<&CameraError> {
        self.last_error.as_ref()
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Begin camera acquisition: Idle → Initializing. A no-op when
    /// already initializing or active. Terminal failures are recorded
    /// and returned; the caller decides how to report them.
    pub fn start(&mut self) -> Result<(), CameraError> {
        if self.phase != EstimatorPhase::Idle {
            return Ok(());
        }
        self.last_error = None;
        self.waited = 0.0;
        self.primed = false;
        match self.source.start() {
            Ok(()) => {
                self.phase = EstimatorPhase::Initializing;
                log::info!("hand estimator: waiting for camera");
                Ok(())
            }
            Err(err) => {
                self.fail(err.clone());
                Err(err)
            }
        }
    }

    /// Halt analysis and release the camera. Idempotent, safe from any
    /// state, including mid-initialization.
    pub fn stop(&mut self) {
        self.source.stop();
        self.phase = EstimatorPhase::Idle;
        self.primed = false;
        self.waited = 0.0;
    }

    /// One analysis tick. `canvas` is the canvas size the estimate is
    /// scaled into.
    pub fn tick(&mut self, dt: f32, canvas: Vec2) -> Analysis {
        match self.phase {
            EstimatorPhase::Idle => Analysis::Skipped,
            EstimatorPhase::Initializing => self.tick_initializing(dt),
            EstimatorPhase::Active => self.tick_active(canvas),
        }
    }

    fn tick_initializing(&mut self, dt: f32) -> Analysis {
        match self.source.poll_frame(&mut self.curr) {
            Ok(FramePoll::Frame) => {
                std::mem::swap(&mut self.prev, &mut self.curr);
                self.primed = true;
                self.phase = EstimatorPhase::Active;
                log::info!("hand estimator: camera ready");
                Analysis::Skipped
            }
            Ok(FramePoll::Pending) => {
                self.wait(dt);
                Analysis::Skipped
            }
            Err(err) if err.is_transient() => {
                // A frame that has not decoded yet counts as still waiting.
                self.wait(dt);
                Analysis::Skipped
            }
            Err(err) => {
                self.fail(err);
                Analysis::Skipped
            }
        }
    }

    fn tick_active(&mut self, canvas: Vec2) -> Analysis {
        match self.source.poll_frame(&mut self.curr) {
            Ok(FramePoll::Frame) => {
                let estimate = if self.primed {
                    diff::to_pointer(
                        diff::detect(&self.prev, &self.curr, &self.config),
                        &self.config,
                        canvas,
                    )
                } else {
                    None
                };
                // The current frame becomes the history regardless of outcome.
                std::mem::swap(&mut self.prev, &mut self.curr);
                self.primed = true;
                Analysis::Estimate(estimate)
            }
            Ok(FramePoll::Pending) => Analysis::Skipped,
            Err(err) if err.is_transient() => {
                log::debug!("hand estimator: {}", err);
                Analysis::Skipped
            }
            Err(err) => {
                self.fail(err);
                Analysis::Skipped
            }
        }
    }

    fn wait(&mut self, dt: f32) {
        self.waited += dt;
        if self.waited > self.config.ready_timeout {
            self.fail(CameraError::Timeout);
        }
    }

    fn fail(&mut self, err: CameraError) {
        log::warn!("hand estimator: {}", err);
        self.last_error = Some(err);
        self.source.stop();
        self.phase = EstimatorPhase::Idle;
        self.primed = false;
    }
}
