//! # Game State Module
//!
//! The game session and the actions the shell invokes on it.
//!
//! [`GameState`] owns the dungeon, the player and the cursor marking the
//! room the player stands in. Each action method returns the events it
//! produced; nothing here prompts or prints.

use crate::game::{
    exchange_blows, ConcreteEntity, Direction, Dungeon, Entity, GameEvent, Lookup, Mob, Player,
    Room, RoomId,
};
use crate::persistence::{save_map, SaveGame};
use crate::utils::{BoundsMapper, CoordinateMap};
use crate::{CrawlError, CrawlResult};
use log::{debug, warn};
use std::path::Path;

/// A running game.
#[derive(Debug, Clone)]
pub struct GameState {
    dungeon: Dungeon,
    player: Player,
    start: RoomId,
    current: RoomId,
}

impl GameState {
    /// Starts a session from a decoded save, placing the player in the start room.
    pub fn new(save: SaveGame) -> CrawlResult<Self> {
        Self::from_parts(save.dungeon, save.player, save.start)
    }

    /// Starts a session with the player standing in `start`.
    pub fn from_parts(mut dungeon: Dungeon, player: Player, start: RoomId) -> CrawlResult<Self> {
        let room = dungeon.room_mut(start).ok_or_else(|| {
            CrawlError::InvalidAttribute(format!("start room {} is not in the dungeon", start))
        })?;
        room.enter(ConcreteEntity::Player);
        Ok(Self {
            dungeon,
            player,
            start,
            current: start,
        })
    }

    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn start_room_id(&self) -> RoomId {
        self.start
    }

    pub fn current_room_id(&self) -> RoomId {
        self.current
    }

    /// The room the player stands in.
    pub fn current_room(&self) -> &Room {
        // The cursor only ever holds ids handed out by this dungeon.
        match self.dungeon.room(self.current) {
            Some(room) => room,
            None => unreachable!("cursor {} points outside the dungeon", self.current),
        }
    }

    fn current_room_mut(&mut self) -> &mut Room {
        let current = self.current;
        match self.dungeon.room_mut(current) {
            Some(room) => room,
            None => unreachable!("cursor {} points outside the dungeon", current),
        }
    }

    /// Whether the player has died.
    pub fn is_game_over(&self) -> bool {
        !self.player.is_alive()
    }

    /// The opening line shown when the game starts.
    pub fn welcome(&self) -> String {
        format!("You find yourself in {}", self.current_room().description())
    }

    /// Lays out every room reachable from the start room.
    pub fn map(&self) -> CoordinateMap {
        BoundsMapper::new(&self.dungeon, self.start).walk()
    }

    /// Describes the current room, its contents and the inventory.
    pub fn look(&self) -> Vec<GameEvent> {
        let room = self.current_room();
        let mut events = vec![GameEvent::message(format!(
            "{} - you see:",
            room.description()
        ))];
        events.extend(
            room.contents()
                .iter()
                .map(|entity| GameEvent::message(format!(" {}", entity.short_name()))),
        );
        events.push(GameEvent::message("You are carrying:"));
        events.extend(
            self.player
                .inventory()
                .iter()
                .map(|entity| GameEvent::message(format!(" {}", entity.short_name()))),
        );
        events.push(GameEvent::message(format!(
            "worth {} in total",
            display_total(self.player.worth())
        )));
        events
    }

    /// Shows the long description of the first match, inventory first.
    pub fn examine(&self, name: &str) -> Vec<GameEvent> {
        let found = self.player.find(name).or_else(|| {
            let room = self.current_room();
            room.find(name, Lookup::Any).map(|index| &room.contents()[index])
        });
        let text = match found {
            Some(ConcreteEntity::Player) => self.player.long_description(),
            Some(entity) => entity.long_description(),
            None => "Nothing found with that name",
        };
        vec![GameEvent::message(text)]
    }

    /// Moves an entity from the current room into the inventory.
    ///
    /// Silently does nothing if there is no such entity or it refuses to
    /// leave (a living creature). The player can't be taken.
    pub fn take(&mut self, name: &str) -> Vec<GameEvent> {
        let room = self.current_room_mut();
        let Some(index) = room.find(name, Lookup::SkipPlayer) else {
            debug!("Nothing named '{}' to take", name);
            return Vec::new();
        };
        let Some(entity) = room.leave(index) else {
            debug!("'{}' refuses to be taken", name);
            return Vec::new();
        };
        self.player.add(entity);
        vec![GameEvent::ItemPickedUp {
            name: name.to_string(),
        }]
    }

    /// Moves the first matching inventory entry into the current room.
    pub fn drop(&mut self, name: &str) -> Vec<GameEvent> {
        let Some(entity) = self.player.drop(name) else {
            debug!("Nothing named '{}' to drop", name);
            return Vec::new();
        };
        self.current_room_mut().enter(entity);
        vec![GameEvent::ItemDropped {
            name: name.to_string(),
        }]
    }

    /// Fights the first creature with this name in the current room.
    ///
    /// If both sides are alive they trade one round of blows. Afterwards the
    /// player's death is reported as "Game over", the creature's as "You won".
    pub fn fight(&mut self, name: &str) -> Vec<GameEvent> {
        let current = self.current;
        let Some(room) = self.dungeon.room_mut(current) else {
            return Vec::new();
        };
        let Some(creature) = room
            .find(name, Lookup::CreaturesOnly)
            .and_then(|index| room.entity_mut(index))
            .and_then(ConcreteEntity::as_creature_mut)
        else {
            debug!("No creature named '{}' here", name);
            return Vec::new();
        };

        let mut events = Vec::new();
        if exchange_blows(&mut self.player, &mut *creature) {
            events.push(GameEvent::CombatResolved {
                creature: name.to_string(),
                creature_alive: creature.is_alive(),
                player_alive: self.player.is_alive(),
            });
        }
        if !self.player.is_alive() {
            events.push(GameEvent::important("Game over"));
        } else if !creature.is_alive() {
            events.push(GameEvent::important("You won"));
        }
        events
    }

    /// Walks through the exit in `direction`.
    pub fn move_player(&mut self, direction: Direction) -> Vec<GameEvent> {
        let Some(next) = self.current_room().exit(direction) else {
            return vec![GameEvent::message("No door that way")];
        };
        if self.dungeon.room(next).is_none() {
            warn!("{} exit of room {} leads nowhere", direction, self.current);
            return vec![GameEvent::message("No door that way")];
        }
        if !self.current_room_mut().leave_player() {
            return vec![GameEvent::message("Something prevents you from leaving")];
        }
        self.current = next;
        self.current_room_mut().enter(ConcreteEntity::Player);
        vec![
            GameEvent::message("You enter"),
            GameEvent::RoomEntered { room: next },
        ]
    }

    /// Saves everything reachable from the start room.
    pub fn save(&self, path: impl AsRef<Path>) -> Vec<GameEvent> {
        let path = path.as_ref();
        match save_map(path, &self.dungeon, self.start, &self.player) {
            Ok(()) => vec![
                GameEvent::message("Saved"),
                GameEvent::GameSaved {
                    path: path.to_path_buf(),
                },
            ],
            Err(e) => {
                warn!("Save to {} failed: {}", path.display(), e);
                vec![GameEvent::message("Unable to save")]
            }
        }
    }
}

/// Rounds a summed value to millionths so float noise from adding
/// decimal values (0.1 + 0.2) doesn't reach the player.
fn display_total(total: f64) -> f64 {
    let scaled = (total * 1e6).round();
    if scaled.is_finite() {
        scaled / 1e6
    } else {
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{messages, Creature, Item, Valuable};

    fn two_rooms() -> GameState {
        let mut dungeon = Dungeon::new();
        let hall = dungeon.add_room(Room::new("Hall").unwrap());
        let crypt = dungeon.add_room(Room::new("Crypt").unwrap());
        dungeon.connect_both(hall, Direction::East, crypt).unwrap();
        if let Some(room) = dungeon.room_mut(hall) {
            room.enter(Valuable::new("coin", "a gold coin", 10.0).unwrap().into());
            room.enter(Creature::new("rat", "a scruffy rat", 2).unwrap().into());
        }
        let player = Player::new("Adventurer", 5).unwrap();
        GameState::from_parts(dungeon, player, hall).unwrap()
    }

    #[test]
    fn test_player_enters_start_room() {
        let state = two_rooms();
        let last = state.current_room().contents().last().unwrap();
        assert!(last.is_player());
        assert_eq!(state.welcome(), "You find yourself in Hall");
    }

    #[test]
    fn test_look_output() {
        let mut state = two_rooms();
        state.take("coin");
        let events = state.look();
        assert_eq!(
            messages(&events),
            vec![
                "Hall - you see:",
                " rat",
                " Player",
                "You are carrying:",
                " coin",
                "worth 10 in total"
            ]
        );
    }

    #[test]
    fn test_look_total_hides_float_noise() {
        let mut state = two_rooms();
        state.player.add(Valuable::new("shard", "a glass shard", 0.1).unwrap().into());
        state.player.add(Valuable::new("bead", "a glass bead", 0.2).unwrap().into());
        let events = state.look();
        assert_eq!(messages(&events).last(), Some(&"worth 0.3 in total"));
        assert_eq!(display_total(2.5), 2.5);
        assert_eq!(display_total(f64::MAX), f64::MAX);
    }

    #[test]
    fn test_examine_prefers_inventory() {
        let mut state = two_rooms();
        state.take("coin");
        state
            .current_room_mut()
            .enter(Valuable::new("coin", "a fake coin", 0.0).unwrap().into());
        assert_eq!(messages(&state.examine("coin")), vec!["a gold coin"]);
        assert_eq!(messages(&state.examine("rat")), vec!["a scruffy rat"]);
        assert_eq!(messages(&state.examine("Player")), vec!["Adventurer"]);
        assert_eq!(
            messages(&state.examine("dragon")),
            vec!["Nothing found with that name"]
        );
    }

    #[test]
    fn test_take_and_drop() {
        let mut state = two_rooms();
        let events = state.take("coin");
        assert!(events[0].changes_world());
        assert_eq!(state.player().inventory().len(), 1);
        assert!(state.take("Player").is_empty());

        state.move_player(Direction::East);
        state.drop("coin");
        assert!(state.player().inventory().is_empty());
        assert_eq!(state.current_room().contents()[1].short_name(), "coin");
        assert!(state.drop("coin").is_empty());
    }

    #[test]
    fn test_take_dead_creature() {
        let mut state = two_rooms();
        state.fight("rat");
        state.take("rat");
        assert_eq!(state.player().inventory()[0].is_alive(), Some(false));
    }

    #[test]
    fn test_fight_ignores_non_creatures() {
        let mut state = two_rooms();
        state
            .current_room_mut()
            .enter(Item::new("statue", "a stone statue").unwrap().into());
        assert!(state.fight("statue").is_empty());
        assert!(state.fight("coin").is_empty());
    }

    #[test]
    fn test_fight_dead_creature_reports_win_without_exchange() {
        let mut state = two_rooms();
        state.fight("rat");
        let events = state.fight("rat");
        assert_eq!(messages(&events), vec!["You won"]);
        assert_eq!(state.player().health(), 3);
    }

    #[test]
    fn test_game_over() {
        let mut dungeon = Dungeon::new();
        let den = dungeon.add_room(Room::new("Den").unwrap());
        if let Some(room) = dungeon.room_mut(den) {
            room.enter(Creature::new("troll", "a huge troll", 9).unwrap().into());
        }
        let player = Player::new("Adventurer", 2).unwrap();
        let mut state = GameState::from_parts(dungeon, player, den).unwrap();
        assert_eq!(messages(&state.fight("troll")), vec!["Game over"]);
        assert!(state.is_game_over());
    }

    #[test]
    fn test_move_between_rooms() {
        let mut state = two_rooms();
        let events = state.move_player(Direction::East);
        assert_eq!(messages(&events), vec!["You enter"]);
        assert_eq!(state.current_room().description(), "Crypt");
        assert!(state.current_room().contents()[0].is_player());
        assert!(!state
            .dungeon()
            .room(state.start_room_id())
            .unwrap()
            .contents()
            .iter()
            .any(ConcreteEntity::is_player));

        state.move_player(Direction::West);
        assert_eq!(state.current_room_id(), state.start_room_id());
    }

    #[test]
    fn test_from_parts_rejects_missing_start() {
        let player = Player::new("Adventurer", 2).unwrap();
        assert!(GameState::from_parts(Dungeon::new(), player, RoomId(0)).is_err());
    }
}
