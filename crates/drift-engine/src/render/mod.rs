pub mod frame;
pub mod surface;

pub use frame::draw_frame;
pub use surface::{Rgba, Surface, BACKGROUND};
