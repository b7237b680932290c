//! # Bounds Mapping
//!
//! Lays the rooms reachable from a start room out on an integer grid.
//!
//! The walk is breadth-first and follows exits in canonical order, so the
//! first path found to a room fixes its coordinate. Cycles that don't close
//! geometrically (three rooms in a loop, say) are tolerated: a room that is
//! already mapped is never moved, and nothing is reported.

use crate::game::{Dungeon, Position, RoomId};
use log::{debug, warn};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

/// Inclusive axis-aligned bounding box of a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Bounds {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl Bounds {
    /// Number of columns covered.
    pub fn width(&self) -> usize {
        (self.x_max - self.x_min + 1) as usize
    }

    /// Number of rows covered.
    pub fn height(&self) -> usize {
        (self.y_max - self.y_min + 1) as usize
    }

    pub fn contains(&self, position: Position) -> bool {
        (self.x_min..=self.x_max).contains(&position.x)
            && (self.y_min..=self.y_max).contains(&position.y)
    }
}

/// A mapped room and where it sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MappedRoom {
    pub room: RoomId,
    pub position: Position,
}

/// Coordinates of every room reachable from a start room.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CoordinateMap {
    /// Rooms in discovery order; the start room comes first
    rooms: Vec<MappedRoom>,
    bounds: Bounds,
    #[serde(skip)]
    index: HashMap<RoomId, usize>,
}

impl CoordinateMap {
    /// Coordinate of a room, if it was reached.
    pub fn get(&self, room: RoomId) -> Option<Position> {
        self.index.get(&room).map(|&slot| self.rooms[slot].position)
    }

    pub fn contains(&self, room: RoomId) -> bool {
        self.index.contains_key(&room)
    }

    /// Mapped rooms in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (RoomId, Position)> + '_ {
        self.rooms.iter().map(|mapped| (mapped.room, mapped.position))
    }

    /// Room handles in discovery order.
    pub fn room_order(&self) -> Vec<RoomId> {
        self.rooms.iter().map(|mapped| mapped.room).collect()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Serializes the map for external renderers.
    pub fn to_json(&self) -> crate::CrawlResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn insert(&mut self, room: RoomId, position: Position) {
        if self.rooms.is_empty() {
            self.bounds = Bounds {
                x_min: position.x,
                y_min: position.y,
                x_max: position.x,
                y_max: position.y,
            };
        } else {
            self.bounds.x_min = self.bounds.x_min.min(position.x);
            self.bounds.y_min = self.bounds.y_min.min(position.y);
            self.bounds.x_max = self.bounds.x_max.max(position.x);
            self.bounds.y_max = self.bounds.y_max.max(position.y);
        }
        self.index.insert(room, self.rooms.len());
        self.rooms.push(MappedRoom { room, position });
    }
}

/// Walks a dungeon from a start room and assigns coordinates.
///
/// # Examples
///
/// ```
/// use crawl::{BoundsMapper, Direction, Dungeon, Position, Room};
///
/// let mut dungeon = Dungeon::new();
/// let hall = dungeon.add_room(Room::new("Hall").unwrap());
/// let crypt = dungeon.add_room(Room::new("Crypt").unwrap());
/// dungeon.connect_both(hall, Direction::East, crypt).unwrap();
///
/// let map = BoundsMapper::new(&dungeon, hall).walk();
/// assert_eq!(map.get(crypt), Some(Position::new(1, 0)));
/// assert_eq!(map.bounds().width(), 2);
/// ```
pub struct BoundsMapper<'a> {
    dungeon: &'a Dungeon,
    start: RoomId,
}

impl<'a> BoundsMapper<'a> {
    pub fn new(dungeon: &'a Dungeon, start: RoomId) -> Self {
        Self { dungeon, start }
    }

    /// Performs the walk.
    ///
    /// A start room missing from the dungeon yields an empty map.
    pub fn walk(&self) -> CoordinateMap {
        let mut map = CoordinateMap::default();
        if self.dungeon.room(self.start).is_none() {
            warn!("Start room {} is not in the dungeon; nothing to map", self.start);
            return map;
        }

        map.insert(self.start, Position::origin());
        let mut frontier = VecDeque::from([self.start]);

        while let Some(current) = frontier.pop_front() {
            let (Some(room), Some(here)) = (self.dungeon.room(current), map.get(current)) else {
                continue;
            };
            for (direction, neighbor) in room.exits() {
                if map.contains(neighbor) {
                    continue;
                }
                if self.dungeon.room(neighbor).is_none() {
                    warn!(
                        "Room {} has a {} exit to missing room {}",
                        current, direction, neighbor
                    );
                    continue;
                }
                map.insert(neighbor, here.step(direction));
                frontier.push_back(neighbor);
            }
        }

        debug!(
            "Mapped {} rooms within {:?}",
            map.len(),
            map.bounds()
        );
        map
    }
}
