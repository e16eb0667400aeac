//! Game module - the simulation core
//!
//! Owns all entities and resolves one move intent at a time: player
//! step, zombie pursuit, collision passes, win/lose transitions.

mod ai;
mod events;
mod spawn;
mod state;

pub use ai::approach_step;
pub use events::GameEvent;
pub use spawn::random_free_position;
pub use state::{Game, GameStatus};
