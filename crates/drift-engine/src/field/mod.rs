pub mod hue;
pub mod integrate;
pub mod particle;
pub mod store;

pub use hue::Hue;
pub use integrate::{step, Interaction};
pub use particle::Particle;
pub use store::ParticleField;
