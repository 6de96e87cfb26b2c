//! Operators tract-core does not ship and the preprocessing graph needs.
pub mod resize;

pub use resize::ResizeBilinear;
