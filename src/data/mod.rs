//! Data module - external game configuration

mod levels;

pub use levels::{default_level_table, LevelSpec, LevelTable};
