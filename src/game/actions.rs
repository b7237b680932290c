//! # Action System
//!
//! The command vocabulary the shell can invoke and the events actions emit.
//!
//! Every action arrives with its argument already resolved (the shell does
//! any prompting), executes against a [`GameState`] and reports what
//! happened as a list of [`GameEvent`]s. In-game failures never surface as
//! errors; they become messages.

use crate::game::{Direction, GameState, RoomId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An action the player can take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    /// Describe the current room and the inventory
    Look,
    /// Show the long description of something carried or nearby
    Examine(String),
    /// Pick something up from the current room
    Take(String),
    /// Put something from the inventory into the current room
    Drop(String),
    /// Fight a creature in the current room
    Fight(String),
    /// Walk through an exit
    Move(Direction),
    /// Write the dungeon to a save file
    Save(PathBuf),
}

impl ActionType {
    /// Executes the action against the game state.
    ///
    /// # Examples
    ///
    /// ```
    /// use crawl::{ActionType, Dungeon, GameState, Player, Room};
    ///
    /// let mut dungeon = Dungeon::new();
    /// let start = dungeon.add_room(Room::new("Cell").unwrap());
    /// let player = Player::new("Adventurer", 3).unwrap();
    /// let mut state = GameState::from_parts(dungeon, player, start).unwrap();
    ///
    /// let events = ActionType::Look.execute(&mut state);
    /// assert_eq!(events[0].text(), Some("Cell - you see:"));
    /// ```
    pub fn execute(&self, state: &mut GameState) -> Vec<GameEvent> {
        match self {
            ActionType::Look => state.look(),
            ActionType::Examine(name) => state.examine(name),
            ActionType::Take(name) => state.take(name),
            ActionType::Drop(name) => state.drop(name),
            ActionType::Fight(name) => state.fight(name),
            ActionType::Move(direction) => state.move_player(*direction),
            ActionType::Save(path) => state.save(path),
        }
    }
}

/// How prominently a message should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageImportance {
    Normal,
    Important,
}

/// Something that happened while executing an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Text for the player
    Message {
        text: String,
        importance: MessageImportance,
    },
    /// An entity moved from the room into the inventory
    ItemPickedUp { name: String },
    /// An entity moved from the inventory into the room
    ItemDropped { name: String },
    /// One combat exchange took place
    CombatResolved {
        creature: String,
        creature_alive: bool,
        player_alive: bool,
    },
    /// The player walked into another room
    RoomEntered { room: RoomId },
    /// The dungeon was written to disk
    GameSaved { path: PathBuf },
}

impl GameEvent {
    /// A normal message.
    pub fn message(text: impl Into<String>) -> Self {
        GameEvent::Message {
            text: text.into(),
            importance: MessageImportance::Normal,
        }
    }

    /// A message the shell should make stand out.
    pub fn important(text: impl Into<String>) -> Self {
        GameEvent::Message {
            text: text.into(),
            importance: MessageImportance::Important,
        }
    }

    /// The message text, if this is a message.
    pub fn text(&self) -> Option<&str> {
        match self {
            GameEvent::Message { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Whether the map needs redrawing after this event.
    pub fn changes_world(&self) -> bool {
        matches!(
            self,
            GameEvent::ItemPickedUp { .. }
                | GameEvent::ItemDropped { .. }
                | GameEvent::CombatResolved { .. }
                | GameEvent::RoomEntered { .. }
        )
    }
}

/// Collects the message texts from a batch of events.
pub fn messages(events: &[GameEvent]) -> Vec<&str> {
    events.iter().filter_map(GameEvent::text).collect()
}
