//! # Input Module
//!
//! Input handling and command parsing for player interactions.

pub mod commands;

pub use commands::*;

use crate::game::ActionType;
use std::path::PathBuf;

/// Turns typed commands into game actions.
///
/// Commands that arrive without their argument are completed through an
/// `ask` callback; an empty or missing answer cancels the command.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler.
    pub fn new() -> Self {
        Self
    }

    /// Converts input to an action, prompting for a missing argument.
    ///
    /// Returns None for inputs that aren't game actions (map, help, quit,
    /// unknown) and for cancelled prompts.
    ///
    /// # Examples
    ///
    /// ```
    /// use crawl::{ActionType, InputHandler, PlayerInput};
    ///
    /// let handler = InputHandler::new();
    /// let action = handler.input_to_action(PlayerInput::Take(None), |_| Some("rat".to_string()));
    /// assert_eq!(action, Some(ActionType::Take("rat".to_string())));
    ///
    /// let cancelled = handler.input_to_action(PlayerInput::Take(None), |_| None);
    /// assert_eq!(cancelled, None);
    /// ```
    pub fn input_to_action<F>(&self, input: PlayerInput, mut ask: F) -> Option<ActionType>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let prompt = input.prompt();
        let mut resolve = |argument: Option<String>| -> Option<String> {
            let answer = match argument {
                Some(argument) => Some(argument),
                None => ask(prompt?),
            }?;
            let answer = answer.trim();
            (!answer.is_empty()).then(|| answer.to_string())
        };

        match input {
            PlayerInput::Move(direction) => Some(ActionType::Move(direction)),
            PlayerInput::Look => Some(ActionType::Look),
            PlayerInput::Examine(name) => resolve(name).map(ActionType::Examine),
            PlayerInput::Take(name) => resolve(name).map(ActionType::Take),
            PlayerInput::Drop(name) => resolve(name).map(ActionType::Drop),
            PlayerInput::Fight(name) => resolve(name).map(ActionType::Fight),
            PlayerInput::Save(file) => resolve(file).map(|file| ActionType::Save(PathBuf::from(file))),
            PlayerInput::Map | PlayerInput::Help | PlayerInput::Quit | PlayerInput::Unknown(_) => None,
        }
    }
}
