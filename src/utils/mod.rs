//! # Utilities Module
//!
//! Graph utilities over the dungeon, chiefly the bounds mapper.

pub mod bounds;

pub use bounds::*;
