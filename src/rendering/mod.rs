//! # Rendering Module
//!
//! Text rendering of the dungeon map for terminal shells.

pub mod display;

pub use display::*;
