//! # Command Definitions
//!
//! The typed command vocabulary and its parser.

use crate::game::Direction;

/// A command typed by the player, before any prompting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    Move(Direction),
    Look,
    Examine(Option<String>),
    Take(Option<String>),
    Drop(Option<String>),
    Fight(Option<String>),
    Save(Option<String>),
    /// Redraw the map
    Map,
    Help,
    Quit,
    /// Anything the parser didn't recognise
    Unknown(String),
}

impl PlayerInput {
    /// Parses one line of input. Blank lines yield None.
    ///
    /// Verbs are case-insensitive; everything after the verb is the
    /// argument, so names may contain spaces.
    ///
    /// # Examples
    ///
    /// ```
    /// use crawl::{Direction, PlayerInput};
    ///
    /// assert_eq!(PlayerInput::parse("n"), Some(PlayerInput::Move(Direction::North)));
    /// assert_eq!(
    ///     PlayerInput::parse("take gold coin"),
    ///     Some(PlayerInput::Take(Some("gold coin".to_string())))
    /// );
    /// assert_eq!(PlayerInput::parse("fight"), Some(PlayerInput::Fight(None)));
    /// ```
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let argument = (!rest.is_empty()).then(|| rest.to_string());

        let input = match verb.to_lowercase().as_str() {
            "north" | "n" => PlayerInput::Move(Direction::North),
            "east" | "e" => PlayerInput::Move(Direction::East),
            "south" | "s" => PlayerInput::Move(Direction::South),
            "west" | "w" => PlayerInput::Move(Direction::West),
            "look" | "l" => PlayerInput::Look,
            "examine" | "x" => PlayerInput::Examine(argument),
            "take" | "t" => PlayerInput::Take(argument),
            "drop" | "d" => PlayerInput::Drop(argument),
            "fight" | "f" => PlayerInput::Fight(argument),
            "save" => PlayerInput::Save(argument),
            "map" | "m" => PlayerInput::Map,
            "help" | "?" => PlayerInput::Help,
            "quit" | "q" | "exit" => PlayerInput::Quit,
            _ => PlayerInput::Unknown(line.to_string()),
        };
        Some(input)
    }

    /// Question to ask when a command arrived without its argument.
    pub fn prompt(&self) -> Option<&'static str> {
        match self {
            PlayerInput::Examine(None) => Some("Examine what?"),
            PlayerInput::Take(None) => Some("Take what?"),
            PlayerInput::Drop(None) => Some("Item to drop?"),
            PlayerInput::Fight(None) => Some("Fight what?"),
            PlayerInput::Save(None) => Some("Save filename?"),
            _ => None,
        }
    }
}

/// One-line summaries of every command, for `help`.
pub const HELP_LINES: &[&str] = &[
    "north | east | south | west (n/e/s/w)  walk through a door",
    "look                                    describe the room and your pack",
    "examine [name]                          read something's description",
    "take [name]                             pick something up",
    "drop [name]                             put something down",
    "fight [name]                            attack a creature",
    "save [file]                             write the dungeon to a file",
    "map                                     redraw the map",
    "quit                                    leave the game",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directions() {
        assert_eq!(PlayerInput::parse("North"), Some(PlayerInput::Move(Direction::North)));
        assert_eq!(PlayerInput::parse(" WEST "), Some(PlayerInput::Move(Direction::West)));
        assert_eq!(PlayerInput::parse("s"), Some(PlayerInput::Move(Direction::South)));
    }

    #[test]
    fn test_parse_arguments() {
        assert_eq!(
            PlayerInput::parse("examine   old  map "),
            Some(PlayerInput::Examine(Some("old  map".to_string())))
        );
        assert_eq!(PlayerInput::parse("drop"), Some(PlayerInput::Drop(None)));
        assert_eq!(
            PlayerInput::parse("save level.map"),
            Some(PlayerInput::Save(Some("level.map".to_string())))
        );
    }

    #[test]
    fn test_parse_blank_and_unknown() {
        assert_eq!(PlayerInput::parse("   "), None);
        assert_eq!(
            PlayerInput::parse("dance wildly"),
            Some(PlayerInput::Unknown("dance wildly".to_string()))
        );
    }

    #[test]
    fn test_prompts() {
        assert_eq!(PlayerInput::Take(None).prompt(), Some("Take what?"));
        assert_eq!(PlayerInput::Take(Some("rat".into())).prompt(), None);
        assert_eq!(PlayerInput::Look.prompt(), None);
    }
}
