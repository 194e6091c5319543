//! Dungeon Crawler - turn-based text adventure library
//!
//! The [`core::Game`] engine consumes one line of input at a time and
//! reports what happened; the binary is a thin terminal loop around it.

pub mod character;
pub mod combat;
pub mod core;
pub mod dungeon;
pub mod items;
pub mod ui;
