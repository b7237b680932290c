//! # World Representation
//!
//! Rooms and the dungeon arena that owns them.
//!
//! Rooms form a directed graph that may contain cycles. The [`Dungeon`] owns
//! every room in a vector and exits refer to their targets by [`RoomId`], so
//! the graph can be walked, saved and rebuilt without shared pointers.

use crate::config::{FIELD_DELIMITER, ROOM_TERMINATOR};
use crate::game::{find_named, ConcreteEntity, Direction, Lookup};
use crate::{CrawlError, CrawlResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable handle of a room inside its [`Dungeon`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub usize);

impl RoomId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node of the dungeon graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    description: String,
    contents: Vec<ConcreteEntity>,
    exits: BTreeMap<Direction, RoomId>,
}

impl Room {
    /// Creates an empty room with no exits.
    ///
    /// The description must be a single non-empty line without the save-file
    /// delimiter, and must not read as a room terminator.
    ///
    /// # Examples
    ///
    /// ```
    /// use crawl::Room;
    ///
    /// let room = Room::new("Entrance").unwrap();
    /// assert_eq!(room.description(), "Entrance");
    /// assert!(Room::new("Hall: east wing").is_err());
    /// ```
    pub fn new(description: impl Into<String>) -> CrawlResult<Self> {
        let description = description.into();
        if description.is_empty()
            || description.contains(FIELD_DELIMITER)
            || description.contains(['\n', '\r'])
            || description == ROOM_TERMINATOR
        {
            return Err(CrawlError::InvalidAttribute(format!(
                "room description '{}' must be one non-empty line without '{}'",
                description.escape_debug(),
                FIELD_DELIMITER
            )));
        }
        Ok(Self {
            description,
            contents: Vec::new(),
            exits: BTreeMap::new(),
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Room contents in the order they entered.
    pub fn contents(&self) -> &[ConcreteEntity] {
        &self.contents
    }

    /// Mutable access to one occupant, for combat.
    pub fn entity_mut(&mut self, index: usize) -> Option<&mut ConcreteEntity> {
        self.contents.get_mut(index)
    }

    /// Adds an entity to the room. Always succeeds.
    pub fn enter(&mut self, entity: ConcreteEntity) {
        self.contents.push(entity);
    }

    /// Removes the occupant at `index` if it is willing to leave.
    ///
    /// Returns None if there is no such occupant or it refuses (a living
    /// creature); the room is unchanged in that case.
    pub fn leave(&mut self, index: usize) -> Option<ConcreteEntity> {
        if self.contents.get(index)?.may_leave() {
            Some(self.contents.remove(index))
        } else {
            None
        }
    }

    /// Removes the player marker. Returns false if the player isn't here.
    pub fn leave_player(&mut self) -> bool {
        match self.contents.iter().position(ConcreteEntity::is_player) {
            Some(index) => self.leave(index).is_some(),
            None => false,
        }
    }

    /// Index of the first occupant named `name` that passes `lookup`.
    pub fn find(&self, name: &str, lookup: Lookup) -> Option<usize> {
        find_named(&self.contents, name, lookup)
    }

    /// Exits in canonical order (North, East, South, West).
    pub fn exits(&self) -> impl Iterator<Item = (Direction, RoomId)> + '_ {
        self.exits.iter().map(|(direction, room)| (*direction, *room))
    }

    /// The room an exit leads to, if there is one.
    pub fn exit(&self, direction: Direction) -> Option<RoomId> {
        self.exits.get(&direction).copied()
    }

    /// Sets or replaces the exit in `direction`.
    pub fn set_exit(&mut self, direction: Direction, neighbor: RoomId) {
        self.exits.insert(direction, neighbor);
    }
}

/// Owner of every room in a level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dungeon {
    rooms: Vec<Room>,
}

impl Dungeon {
    /// Creates an empty dungeon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a room and returns its handle.
    pub fn add_room(&mut self, room: Room) -> RoomId {
        self.rooms.push(room);
        RoomId(self.rooms.len() - 1)
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.index())
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id.index())
    }

    /// Sets a one-way exit from `from` to `to`.
    pub fn connect(&mut self, from: RoomId, direction: Direction, to: RoomId) -> CrawlResult<()> {
        if self.room(to).is_none() {
            return Err(CrawlError::InvalidAttribute(format!(
                "exit target room {} does not exist",
                to
            )));
        }
        let room = self.room_mut(from).ok_or_else(|| {
            CrawlError::InvalidAttribute(format!("exit source room {} does not exist", from))
        })?;
        room.set_exit(direction, to);
        Ok(())
    }

    /// Sets an exit from `from` to `to` and the opposite exit back.
    pub fn connect_both(&mut self, from: RoomId, direction: Direction, to: RoomId) -> CrawlResult<()> {
        self.connect(from, direction, to)?;
        self.connect(to, direction.opposite(), from)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// All rooms with their handles, in arena order.
    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> + '_ {
        self.rooms.iter().enumerate().map(|(index, room)| (RoomId(index), room))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Creature, Entity, Item};

    #[test]
    fn test_room_description_validation() {
        assert!(Room::new("").is_err());
        assert!(Room::new("---").is_err());
        assert!(Room::new("two\nlines").is_err());
        assert!(Room::new("a:b").is_err());
        assert!(Room::new("Crypt").is_ok());
    }

    #[test]
    fn test_room_description_rejects_carriage_return() {
        assert!(Room::new("---\r").is_err());
        assert!(Room::new("Hall\r").is_err());
        assert!(Room::new("Hall\r\nCrypt").is_err());
    }

    #[test]
    fn test_enter_preserves_order_and_duplicates() {
        let mut room = Room::new("Hall").unwrap();
        room.enter(Item::new("rope", "a rope").unwrap().into());
        room.enter(Item::new("rope", "another rope").unwrap().into());
        room.enter(ConcreteEntity::Player);
        let names: Vec<&str> = room.contents().iter().map(|e| e.short_name()).collect();
        assert_eq!(names, vec!["rope", "rope", "Player"]);
    }

    #[test]
    fn test_living_creature_refuses_to_leave() {
        let mut room = Room::new("Den").unwrap();
        room.enter(Creature::new("rat", "a rat", 2).unwrap().into());
        assert!(room.leave(0).is_none());
        assert_eq!(room.contents().len(), 1);
        assert!(room.leave(5).is_none());
    }

    #[test]
    fn test_leave_player() {
        let mut room = Room::new("Den").unwrap();
        assert!(!room.leave_player());
        room.enter(Creature::new("rat", "a rat", 2).unwrap().into());
        room.enter(ConcreteEntity::Player);
        assert!(room.leave_player());
        assert_eq!(room.contents().len(), 1);
    }

    #[test]
    fn test_exits_canonical_order() {
        let mut room = Room::new("Hub").unwrap();
        room.set_exit(Direction::West, RoomId(4));
        room.set_exit(Direction::North, RoomId(1));
        room.set_exit(Direction::South, RoomId(3));
        room.set_exit(Direction::East, RoomId(2));
        let directions: Vec<Direction> = room.exits().map(|(d, _)| d).collect();
        assert_eq!(directions, Direction::ALL.to_vec());
    }

    #[test]
    fn test_set_exit_is_upsert() {
        let mut room = Room::new("Hub").unwrap();
        room.set_exit(Direction::North, RoomId(1));
        room.set_exit(Direction::North, RoomId(2));
        assert_eq!(room.exit(Direction::North), Some(RoomId(2)));
        assert_eq!(room.exits().count(), 1);
    }

    #[test]
    fn test_dungeon_connect_both() {
        let mut dungeon = Dungeon::new();
        let hall = dungeon.add_room(Room::new("Hall").unwrap());
        let crypt = dungeon.add_room(Room::new("Crypt").unwrap());
        dungeon.connect_both(hall, Direction::East, crypt).unwrap();
        assert_eq!(dungeon.room(hall).unwrap().exit(Direction::East), Some(crypt));
        assert_eq!(dungeon.room(crypt).unwrap().exit(Direction::West), Some(hall));
        assert!(dungeon.connect(hall, Direction::North, RoomId(9)).is_err());
    }
}
