//! Plain-text rendering of game state.

pub mod dungeon_map;
pub mod stats_panel;

pub use dungeon_map::*;
pub use stats_panel::*;
