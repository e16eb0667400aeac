//! Homebound - a turn-driven grid pursuit game
//!
//! Guide the player across a bounded grid to the home cell while
//! zombies chase every sound you make and hidden bombs wait underfoot.

pub mod data;
pub mod entities;
pub mod error;
pub mod game;
pub mod grid;
pub mod ui;

// Re-export commonly used types
pub use error::GameError;
pub use game::{Game, GameEvent, GameStatus};
pub use grid::{Bounds, Direction, Position};
