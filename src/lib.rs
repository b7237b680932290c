//! # Crawl
//!
//! A small dungeon-crawl adventure: the player walks between rooms joined by
//! cardinal exits, picks things up, fights creatures and watches a top-down
//! map of the level fill in.
//!
//! ## Architecture Overview
//!
//! - **Game**: the entity model, the room graph and the [`GameState`] session
//!   that exposes the player's actions
//! - **Bounds mapping**: a walk over the room graph that lays every reachable
//!   room out on a 2D grid
//! - **Persistence**: the line-based save format and its two-pass decoder
//! - **Rendering**: a text cartographer that draws the bounds map
//! - **Input**: parsing of typed commands into actions
//!
//! The shell (see `main.rs`) is deliberately thin; everything it does goes
//! through the public API re-exported here.

pub mod game;
pub mod input;
pub mod persistence;
pub mod rendering;
pub mod utils;

pub use game::*;
pub use input::*;
pub use persistence::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the crawl engine.
#[derive(thiserror::Error, Debug)]
pub enum CrawlError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A save file could not be parsed
    #[error("Malformed save at line {line}: {reason}")]
    MalformedSave { line: usize, reason: String },

    /// An entity or room was constructed with an invalid attribute
    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),

    /// JSON export failed
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl CrawlError {
    /// Shorthand for a [`CrawlError::MalformedSave`] at a 1-based line number.
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        CrawlError::MalformedSave {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type used throughout the crawl codebase.
pub type CrawlResult<T> = Result<T, CrawlError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Field separator used by every record in a save file
    pub const FIELD_DELIMITER: char = ':';

    /// Line closing a room block in a save file
    pub const ROOM_TERMINATOR: &str = "---";

    /// Tag opening the player header record
    pub const PLAYER_TAG: &str = "Player";

    /// Short name every player carries
    pub const PLAYER_NAME: &str = "Player";

    /// Width of one room cell on the text map, in characters
    pub const MAP_CELL_WIDTH: usize = 7;

    /// Height of one room cell on the text map, in lines
    pub const MAP_CELL_HEIGHT: usize = 5;
}
