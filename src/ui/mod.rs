//! UI module - terminal front-end around the simulation core

mod app;

pub use app::App;
