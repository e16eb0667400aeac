//! Grid module - cell coordinates, bounds, and movement directions

mod direction;
mod position;

pub use direction::Direction;
pub use position::{Bounds, Position};
