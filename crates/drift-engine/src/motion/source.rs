//! Camera capability seam.
//!
//! The estimator never talks to hardware directly; it polls an injected
//! `FrameSource`. The web bridge implements one fed by the shell, tests
//! implement one over synthetic frame sequences.

use thiserror::Error;

/// Camera failure taxonomy. The first three are terminal and
/// user-reportable; they are never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    /// Permission was refused.
    #[error("camera access denied")]
    Unavailable,
    /// No capture device exists.
    #[error("no camera device found")]
    NotFound,
    /// The stream never produced a decodable frame in time.
    #[error("camera stream never became ready")]
    Timeout,
    /// A per-tick decode/read failure. Expected and transient.
    #[error("frame read failed: {0}")]
    Frame(String),
}

impl CameraError {
    /// Transient errors are swallowed per tick; everything else tears
    /// the estimator down.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Frame(_))
    }
}

/// Result of polling a source for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePoll {
    /// No new frame has decoded yet.
    Pending,
    /// `dest` now holds the current downscaled RGBA frame.
    Frame,
}

/// An injected frame provider.
pub trait FrameSource {
    /// Begin producing frames. Immediate acquisition failures surface here.
    fn start(&mut self) -> Result<(), CameraError>;

    /// Release the device and any in-flight frame. Must be idempotent.
    fn stop(&mut self);

    /// Copy the current frame into `dest` if one is available.
    /// `dest` is exactly one RGBA analysis frame long.
    fn poll_frame(&mut self, dest: &mut [u8]) -> Result<FramePoll, CameraError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_frame_errors_are_transient() {
        assert!(CameraError::Frame("decode".into()).is_transient());
        assert!(!CameraError::Unavailable.is_transient());
        assert!(!CameraError::NotFound.is_transient());
        assert!(!CameraError::Timeout.is_transient());
    }

    #[test]
    fn errors_render_user_readable_messages() {
        assert_eq!(CameraError::Unavailable.to_string(), "camera access denied");
        assert_eq!(
            CameraError::Frame("not ready".into()).to_string(),
            "frame read failed: not ready"
        );
    }
}
