//! Noughts engine - tic-tac-toe against a heuristic computer opponent.
//!
//! # Architecture
//!
//! - **Types**: board, squares, players and typed positions
//! - **Rules**: win patterns, win and draw detection, derived game state
//! - **Strategy**: the computer's priority heuristic (win, block, center, random)
//! - **Session**: explicit game state with turn order and the thinking lock
//!
//! # Example
//!
//! ```
//! use noughts_engine::{apply_human_move, check_win, determine_computer_move, reset_game};
//! use noughts_engine::{MoveRng, Player, Position};
//!
//! let mut rng = MoveRng::seeded(7);
//! let board = apply_human_move(&reset_game(), Position::TopLeft);
//! let reply = determine_computer_move(&board, &mut rng);
//!
//! // With a single human move on the board the computer takes the center.
//! assert_eq!(reply, Some(Position::Center));
//! assert!(!check_win(&board, Player::Human));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod engine;
mod invariants;
mod phases;
mod position;
mod rng;
mod rules;
mod session;
mod strategy;
mod types;

pub use action::Move;
pub use engine::{apply_human_move, reset_game};
pub use invariants::{
    BoardConsistentInvariant, HistoryConsistentInvariant, Invariant, InvariantSet,
    InvariantViolation, SessionInvariants,
};
pub use phases::{Alert, GameState, Outcome};
pub use position::Position;
pub use rng::MoveRng;
pub use rules::{WIN_PATTERNS, WinPattern, check_draw, check_win, game_state};
pub use session::{
    ComputerTurn, GameSession, PendingComputerMove, SessionError, TapOutcome, TurnOrder,
};
pub use strategy::{Decision, Rule, decide, determine_computer_move};
pub use types::{Board, Player, Square};
