//! # Game Module
//!
//! Core game state, the room graph and the entity model.
//!
//! This module contains the fundamental building blocks of the crawl:
//! - The closed entity taxonomy (items, valuables, creatures, the player)
//! - Rooms and the dungeon arena that owns them
//! - The session state and the actions the shell can invoke on it

pub mod actions;
pub mod entities;
pub mod state;
pub mod world;

pub use actions::*;
pub use entities::*;
pub use state::*;
pub use world::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents a 2D coordinate on the dungeon map.
///
/// `y` grows southwards, so North is `(0, -1)`.
///
/// # Examples
///
/// ```
/// use crawl::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Returns the position one step away in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        self + direction.to_delta()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Cardinal directions an exit can lead in.
///
/// The declaration order is the canonical order (North, East, South, West)
/// used wherever exits are iterated, so `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All four directions in canonical order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use crawl::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// The direction pointing the other way.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// The literal name used in save files.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::East => "East",
            Direction::South => "South",
            Direction::West => "West",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no direction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction '{0}'")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Parses the exact save-file spelling (`North`, `East`, `South`, `West`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "North" => Ok(Direction::North),
            "East" => Ok(Direction::East),
            "South" => Ok(Direction::South),
            "West" => Ok(Direction::West),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_arithmetic() {
        let pos1 = Position::new(5, 10);
        let pos2 = Position::new(3, 2);
        assert_eq!(pos1 + pos2, Position::new(8, 12));
        assert_eq!(pos1 - pos2, Position::new(2, 8));
    }

    #[test]
    fn test_direction_to_delta() {
        assert_eq!(Direction::North.to_delta(), Position::new(0, -1));
        assert_eq!(Direction::South.to_delta(), Position::new(0, 1));
        assert_eq!(Direction::East.to_delta(), Position::new(1, 0));
        assert_eq!(Direction::West.to_delta(), Position::new(-1, 0));
    }

    #[test]
    fn test_direction_delta_inverse() {
        for direction in Direction::ALL {
            assert_eq!(direction.to_delta() + direction.opposite().to_delta(), Position::origin());
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn test_direction_canonical_order() {
        let mut shuffled = vec![
            Direction::West,
            Direction::South,
            Direction::North,
            Direction::East,
        ];
        shuffled.sort();
        assert_eq!(shuffled, Direction::ALL.to_vec());
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("North".parse::<Direction>(), Ok(Direction::North));
        assert_eq!("West".parse::<Direction>(), Ok(Direction::West));
        assert!("north".parse::<Direction>().is_err());
        assert!("Up".parse::<Direction>().is_err());
        assert_eq!(Direction::East.to_string(), "East");
    }

    #[test]
    fn test_position_step() {
        let pos = Position::origin().step(Direction::West).step(Direction::North);
        assert_eq!(pos, Position::new(-1, -1));
    }
}
