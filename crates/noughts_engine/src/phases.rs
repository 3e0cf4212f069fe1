//! Game phases and outcomes.

use super::Player;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// State of a game, derived from the board on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// No winner and at least one empty square.
    Ongoing,
    /// The human completed a line.
    HumanWin,
    /// The computer completed a line.
    ComputerWin,
    /// Full board, no line.
    Draw,
}

impl GameState {
    /// Returns the outcome if the game has ended.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            GameState::Ongoing => None,
            GameState::HumanWin => Some(Outcome::Winner(Player::Human)),
            GameState::ComputerWin => Some(Outcome::Winner(Player::Computer)),
            GameState::Draw => Some(Outcome::Draw),
        }
    }

    /// Returns true once the game cannot continue.
    pub fn is_terminal(self) -> bool {
        self != GameState::Ongoing
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player won the game.
    Winner(Player),
    /// Game ended in a draw.
    Draw,
}

impl Outcome {
    /// The dialog shown to the human for this outcome.
    pub fn alert(&self) -> Alert {
        match self {
            Outcome::Winner(Player::Human) => {
                Alert::new("You Win!", "Wow! you're so smart", "Retry")
            }
            Outcome::Winner(Player::Computer) => {
                Alert::new("You Lost!", "Better luck next time", "Retry")
            }
            Outcome::Draw => Alert::new("You Draw!", "That was close!", "Retry"),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "{:?} wins", player),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Modal dialog text for a finished game. Dismissing it resets the board.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Alert {
    /// Dialog title.
    title: String,
    /// Body text.
    message: String,
    /// Label of the dismiss button.
    button_title: String,
}

impl Alert {
    fn new(title: &str, message: &str, button_title: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            button_title: button_title.to_string(),
        }
    }
}
