pub mod api;
pub mod core;
pub mod field;
pub mod input;
pub mod motion;
pub mod render;

// Re-export key types at crate root for convenience
pub use api::sim::Simulation;
pub use core::config::{EstimatorConfig, FieldConfig};
pub use core::rng::Rng;
pub use core::time::TickAccumulator;
pub use field::hue::Hue;
pub use field::integrate::{step, Interaction};
pub use field::particle::Particle;
pub use field::store::ParticleField;
pub use input::pointer::{PointerSlot, PointerSource, PointerState};
pub use motion::estimator::{Analysis, EstimatorPhase, HandEstimator};
pub use motion::source::{CameraError, FramePoll, FrameSource};
pub use render::frame::draw_frame;
pub use render::surface::{Rgba, Surface};
