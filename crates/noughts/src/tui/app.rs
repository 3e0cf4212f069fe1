//! Application state and key handling.

use super::input::move_cursor;
use crate::controller::Controller;
use crossterm::event::KeyCode;
use noughts_engine::{Alert, Outcome, Position, SessionError};
use tracing::{debug, warn};

/// Main application state.
pub struct App {
    controller: Controller,
    cursor: Position,
    status_message: String,
    alert: Option<Alert>,
    should_quit: bool,
}

impl App {
    /// Creates a new application around a running controller.
    pub fn new(controller: Controller) -> Self {
        let mut app = Self {
            controller,
            cursor: Position::Center,
            status_message: String::new(),
            alert: None,
            should_quit: false,
        };
        app.status_message = app.turn_message();
        app
    }

    /// The controller driving the game.
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Square under the cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Dialog for a finished game, if one is showing.
    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// True once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        debug!(?key, "Key pressed");

        if key == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        if self.alert.is_some() {
            if matches!(
                key,
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('r')
            ) {
                self.dismiss_alert();
            }
            return;
        }

        match key {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.tap(self.cursor),
            KeyCode::Char(c) => {
                if let Some(position) = Position::from_key(c) {
                    self.cursor = position;
                    self.tap(position);
                }
            }
            _ => {}
        }
    }

    /// Picks up the computer's move once its thinking delay is over.
    pub fn tick(&mut self) {
        match self.controller.poll_computer() {
            Ok(Some(turn)) => match turn.outcome {
                Some(outcome) => self.finish(outcome),
                None => {
                    self.status_message =
                        format!("Computer played {}. {}", turn.position(), self.turn_message());
                }
            },
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "Computer move failed");
                self.status_message = e.to_string();
            }
        }
    }

    fn tap(&mut self, position: Position) {
        match self.controller.on_cell_tapped(position) {
            Ok(Some(outcome)) => self.finish(outcome),
            Ok(None) => self.status_message = self.turn_message(),
            Err(SessionError::BoardLocked) => {
                self.status_message = "Wait, the computer is thinking...".to_string();
            }
            Err(SessionError::SquareOccupied(_)) => {
                self.status_message = format!("{} is taken. {}", position, self.turn_message());
            }
            Err(e) => {
                warn!(error = %e, "Tap failed");
                self.status_message = e.to_string();
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        debug!(%outcome, "Showing outcome");
        let alert = outcome.alert();
        self.status_message = format!("{} Press Enter to play again.", alert.message());
        self.alert = Some(alert);
    }

    fn dismiss_alert(&mut self) {
        self.alert = None;
        self.controller.new_game();
        self.cursor = Position::Center;
        self.status_message = self.turn_message();
    }

    fn turn_message(&self) -> String {
        if self.controller.session().is_locked() {
            "Computer is thinking...".to_string()
        } else {
            "Your move: 1-9 or arrows + Enter. 'q' quits.".to_string()
        }
    }
}
