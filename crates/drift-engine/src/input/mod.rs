pub mod pointer;

pub use pointer::{PointerSlot, PointerSource, PointerState};
