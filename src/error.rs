//! Error types for the simulation core
//!
//! All of these are precondition violations raised while starting a
//! level; they abort the start rather than leave a half-built game.
//! Move input submitted while the game is over is a silent no-op, not
//! an error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The level counter points past the end of the level table
    #[error("no level {level} in a table of {table_len} levels")]
    InvalidConfiguration { level: u32, table_len: usize },

    /// The placement generator ran out of free cells
    #[error("no free cell left: {occupied} occupants on a {width}x{height} grid")]
    UnplaceableEntity {
        occupied: usize,
        width: i32,
        height: i32,
    },
}
