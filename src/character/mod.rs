//! Player character: stats, equipment, and inventory.

pub mod player;

pub use player::*;
