//! Core game state, rules, and the turn engine.

pub mod command;
pub mod config;
pub mod constants;
pub mod events;
pub mod game;
pub mod rolls;

pub use command::*;
pub use config::*;
pub use events::*;
pub use game::*;
