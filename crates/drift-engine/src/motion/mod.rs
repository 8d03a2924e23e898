pub mod diff;
pub mod estimator;
pub mod source;

pub use diff::{detect, to_pointer, Motion};
pub use estimator::{Analysis, EstimatorPhase, HandEstimator};
pub use source::{CameraError, FramePoll, FrameSource};
