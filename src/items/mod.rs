//! Item system: types, equipment, and loot generation.

pub mod equipment;
pub mod generation;
pub mod types;

pub use equipment::*;
pub use generation::*;
pub use types::*;
