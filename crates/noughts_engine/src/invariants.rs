//! First-class session invariants.
//!
//! Invariants are logical properties that must hold after every session
//! transition. Debug builds check them; tests exercise them directly.

use super::session::GameSession;
use super::{Player, Square};
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Mark counts never differ by more than one.
pub struct BoardConsistentInvariant;

impl Invariant<GameSession> for BoardConsistentInvariant {
    fn holds(session: &GameSession) -> bool {
        let human = session.board().count(Player::Human);
        let computer = session.board().count(Player::Computer);
        let valid = human.abs_diff(computer) <= 1;
        if !valid {
            warn!(human, computer, "Board consistency violated");
        }
        valid
    }

    fn description() -> &'static str {
        "Human and computer mark counts differ by at most one"
    }
}

/// The history replays to the board and players alternate.
pub struct HistoryConsistentInvariant;

impl Invariant<GameSession> for HistoryConsistentInvariant {
    fn holds(session: &GameSession) -> bool {
        let history = session.history();
        let board = session.board();

        let matches_board = history.len() == board.occupied()
            && history
                .iter()
                .all(|m| board.get(m.position()) == Square::Occupied(m.player()));
        let alternates = history
            .windows(2)
            .all(|pair| pair[1].player() == pair[0].player().opponent());

        let valid = matches_board && alternates;
        if !valid {
            warn!(
                history_len = history.len(),
                occupied = board.occupied(),
                alternates,
                "History consistency violated"
            );
        }
        valid
    }

    fn description() -> &'static str {
        "Move history matches the board and players alternate"
    }
}

/// All session invariants as a composable set.
pub type SessionInvariants = (BoardConsistentInvariant, HistoryConsistentInvariant);
