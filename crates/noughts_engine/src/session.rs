//! Game session: the state a presentation layer holds between taps.
//!
//! The session owns the board, the move history, the turn-order flag and
//! the random source. The computer's reply is a two-phase transition:
//!
//! 1. [`GameSession::tap`] applies the human move and, if the game goes on,
//!    locks the board and hands out a [`PendingComputerMove`] ticket.
//! 2. The caller waits out the thinking delay however it likes, then redeems
//!    the ticket with [`GameSession::complete_computer_move`], which applies
//!    the heuristic move and unlocks the board.
//!
//! While locked, taps are refused with [`SessionError::BoardLocked`].

use super::action::Move;
use super::engine::{apply_human_move, place, reset_game};
#[cfg(debug_assertions)]
use super::invariants::{InvariantSet, SessionInvariants};
use super::phases::{Alert, GameState, Outcome};
use super::rng::MoveRng;
use super::rules::{check_draw, check_win, game_state};
use super::strategy::{Decision, decide};
use super::{Board, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Who opens the next game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnOrder {
    /// The human taps first.
    HumanFirst,
    /// The computer opens with a random square.
    ComputerFirst,
}

impl TurnOrder {
    /// The other order.
    pub fn toggle(self) -> Self {
        match self {
            TurnOrder::HumanFirst => TurnOrder::ComputerFirst,
            TurnOrder::ComputerFirst => TurnOrder::HumanFirst,
        }
    }

    /// Player making the first move.
    pub fn opener(self) -> Player {
        match self {
            TurnOrder::HumanFirst => Player::Human,
            TurnOrder::ComputerFirst => Player::Computer,
        }
    }
}

/// Ticket for a computer move the session is waiting on.
///
/// Only the session mints these, and redeeming one consumes it. A ticket
/// from a game that has since been reset is refused.
#[must_use = "the board stays locked until the computer move is completed"]
#[derive(Debug, PartialEq, Eq)]
pub struct PendingComputerMove {
    game: u64,
}

impl PendingComputerMove {
    /// Game number the ticket belongs to.
    pub fn game(&self) -> u64 {
        self.game
    }
}

/// Result of a human tap.
#[derive(Debug, PartialEq, Eq)]
pub enum TapOutcome {
    /// The game goes on; the board is locked until the ticket is redeemed.
    ComputerToMove(PendingComputerMove),
    /// The human's move ended the game.
    Finished(Outcome),
}

/// Result of a completed computer move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputerTurn {
    /// Square chosen and the rule behind it.
    pub decision: Decision,
    /// Set when the move ended the game.
    pub outcome: Option<Outcome>,
}

impl ComputerTurn {
    /// Square the computer played.
    pub fn position(&self) -> Position {
        self.decision.position
    }
}

/// Error that can occur when driving a session.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// A computer move is pending.
    #[display("Board is locked while the computer is thinking")]
    BoardLocked,

    /// The game has ended; reset first.
    #[display("Game is already over: {}", _0)]
    GameOver(Outcome),

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The computer was asked to move on a full board.
    #[display("No empty square left for the computer")]
    NoEmptySquare,

    /// The ticket belongs to an earlier game.
    #[display("Computer move from game {} is stale", _0)]
    StaleMove(u64),

    /// A ticket was redeemed while no computer move was pending.
    #[display("It's not the computer's turn")]
    NotComputersTurn,

    /// An invariant was violated after a transition.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for SessionError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    AwaitingHuman,
    ComputerThinking,
    Finished(Outcome),
}

/// A running series of games between the human and the computer.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) board: Board,
    pub(crate) history: Vec<Move>,
    turn_order: TurnOrder,
    phase: Phase,
    game: u64,
    rng: MoveRng,
}

impl GameSession {
    /// Creates a session whose first game the human opens.
    #[instrument(skip(rng))]
    pub fn new(rng: MoveRng) -> Self {
        info!(seed = ?rng.seed(), "Creating game session");
        Self {
            board: reset_game(),
            history: Vec::new(),
            turn_order: TurnOrder::HumanFirst,
            phase: Phase::AwaitingHuman,
            game: 1,
            rng,
        }
    }

    /// Creates a session whose first game is opened per `turn_order`.
    ///
    /// Returns a ticket when the computer opens.
    #[instrument(skip(rng))]
    pub fn start(turn_order: TurnOrder, rng: MoveRng) -> (Self, Option<PendingComputerMove>) {
        let mut session = Self::new(rng);
        session.turn_order = turn_order;
        session.game = 0;
        let pending = session.reset();
        (session, pending)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the moves of the current game in play order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Who opens the next game started by [`reset`](Self::reset).
    pub fn turn_order(&self) -> TurnOrder {
        self.turn_order
    }

    /// True while a computer move is pending.
    pub fn is_locked(&self) -> bool {
        self.phase == Phase::ComputerThinking
    }

    /// Number of the current game, starting at 1.
    pub fn game_number(&self) -> u64 {
        self.game
    }

    /// State derived from the board.
    pub fn state(&self) -> GameState {
        game_state(&self.board)
    }

    /// Outcome once the game has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Dialog to show once the game has ended.
    pub fn alert(&self) -> Option<Alert> {
        self.outcome().map(|outcome| outcome.alert())
    }

    /// Player expected to move next, if any.
    pub fn to_move(&self) -> Option<Player> {
        match self.phase {
            Phase::AwaitingHuman => Some(Player::Human),
            Phase::ComputerThinking => Some(Player::Computer),
            Phase::Finished(_) => None,
        }
    }

    /// Applies a human tap.
    ///
    /// # Errors
    ///
    /// - [`SessionError::BoardLocked`] while a computer move is pending
    /// - [`SessionError::GameOver`] after the game has ended
    /// - [`SessionError::SquareOccupied`] if the square is taken; the board
    ///   is left unchanged
    /// - [`SessionError::InvariantViolation`] if the move would leave the
    ///   session inconsistent; the move is not applied
    #[instrument(skip(self), fields(game = self.game))]
    pub fn tap(&mut self, position: Position) -> Result<TapOutcome, SessionError> {
        match self.phase {
            Phase::ComputerThinking => {
                debug!(%position, "Tap rejected, board locked");
                return Err(SessionError::BoardLocked);
            }
            Phase::Finished(outcome) => return Err(SessionError::GameOver(outcome)),
            Phase::AwaitingHuman => {}
        }

        if !self.board.is_empty(position) {
            debug!(%position, "Tap on occupied square");
            return Err(SessionError::SquareOccupied(position));
        }

        self.commit(
            apply_human_move(&self.board, position),
            Move::new(Player::Human, position),
        )?;
        debug!(%position, "Human moved");

        if let Some(outcome) = self.settle(Player::Human) {
            return Ok(TapOutcome::Finished(outcome));
        }

        self.phase = Phase::ComputerThinking;
        Ok(TapOutcome::ComputerToMove(self.ticket()))
    }

    /// Redeems a ticket: the computer moves and the board unlocks.
    ///
    /// # Errors
    ///
    /// - [`SessionError::StaleMove`] if the ticket predates the last reset
    /// - [`SessionError::NotComputersTurn`] if no computer move is pending
    /// - [`SessionError::NoEmptySquare`] if the board is full
    /// - [`SessionError::InvariantViolation`] if the move would leave the
    ///   session inconsistent; the move is not applied and the board stays
    ///   locked until [`reset`](Self::reset)
    #[instrument(skip(self), fields(game = self.game))]
    pub fn complete_computer_move(
        &mut self,
        ticket: PendingComputerMove,
    ) -> Result<ComputerTurn, SessionError> {
        if ticket.game != self.game {
            warn!(ticket_game = ticket.game, "Dropping stale computer move");
            return Err(SessionError::StaleMove(ticket.game));
        }
        if self.phase != Phase::ComputerThinking {
            return Err(SessionError::NotComputersTurn);
        }

        let decision = decide(&self.board, &mut self.rng).ok_or(SessionError::NoEmptySquare)?;
        self.commit(
            place(&self.board, Player::Computer, decision.position),
            Move::new(Player::Computer, decision.position),
        )?;

        let outcome = self.settle(Player::Computer);
        if outcome.is_none() {
            self.phase = Phase::AwaitingHuman;
        }

        Ok(ComputerTurn { decision, outcome })
    }

    /// Clears the board for the next game.
    ///
    /// When the computer opens, the board is locked and the returned ticket
    /// must be redeemed before the human can tap.
    #[instrument(skip(self), fields(game = self.game))]
    pub fn reset(&mut self) -> Option<PendingComputerMove> {
        self.board = reset_game();
        self.history.clear();
        self.game += 1;
        info!(game = self.game, turn_order = ?self.turn_order, "New game");

        match self.turn_order.opener() {
            Player::Human => {
                self.phase = Phase::AwaitingHuman;
                None
            }
            Player::Computer => {
                self.phase = Phase::ComputerThinking;
                Some(self.ticket())
            }
        }
    }

    fn ticket(&self) -> PendingComputerMove {
        PendingComputerMove { game: self.game }
    }

    /// Installs `board` and records `mv`, keeping the previous state if
    /// the result breaks a session invariant.
    fn commit(&mut self, board: Board, mv: Move) -> Result<(), SessionError> {
        let previous = std::mem::replace(&mut self.board, board);
        self.history.push(mv);

        if let Err(e) = self.verify() {
            warn!(error = %e, "Rolling back move");
            self.board = previous;
            self.history.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Checks for a terminal state after `mover` played.
    ///
    /// Win before draw. On a terminal state the turn order flips.
    fn settle(&mut self, mover: Player) -> Option<Outcome> {
        let outcome = if check_win(&self.board, mover) {
            Some(Outcome::Winner(mover))
        } else if check_draw(&self.board) {
            Some(Outcome::Draw)
        } else {
            None
        };

        if let Some(outcome) = outcome {
            self.phase = Phase::Finished(outcome);
            self.turn_order = self.turn_order.toggle();
            info!(%outcome, next = ?self.turn_order, "Game over");
        }
        outcome
    }

    #[cfg(debug_assertions)]
    fn verify(&self) -> Result<(), SessionError> {
        SessionInvariants::check_all(self).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            SessionError::InvariantViolation(descriptions)
        })
    }

    #[cfg(not(debug_assertions))]
    fn verify(&self) -> Result<(), SessionError> {
        Ok(())
    }
}
