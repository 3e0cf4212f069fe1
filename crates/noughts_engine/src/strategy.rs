//! Move selection for the computer player.
//!
//! Rules are tried in strict priority order and the first that applies
//! decides the move:
//!
//! 1. [`Rule::Win`]: complete a line where the computer already holds two
//!    squares and the third is empty.
//! 2. [`Rule::Block`]: take the open square of a line where the human holds
//!    two squares.
//! 3. [`Rule::Center`]: take the center, except on a blank board so the
//!    computer does not always open there.
//! 4. [`Rule::Random`]: any empty square, uniformly.
//!
//! Rules 1 and 2 scan [`WIN_PATTERNS`] in order and stop at the first match.

use super::rules::WIN_PATTERNS;
use super::{Board, Player, Position};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Which rule produced a decision.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Rule {
    /// Completed one of the computer's own lines.
    #[display("win")]
    Win,
    /// Blocked one of the human's lines.
    #[display("block")]
    Block,
    /// Took the center square.
    #[display("center")]
    Center,
    /// Fell back to a random empty square.
    #[display("random")]
    Random,
}

/// A chosen square and the rule that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decision {
    /// Square to play.
    pub position: Position,
    /// Rule that fired.
    pub rule: Rule,
}

/// Decides the computer's next move and reports which rule fired.
///
/// Returns `None` only when the board has no empty square. The board is
/// not modified; the caller applies the move.
#[instrument(skip(board, rng))]
pub fn decide<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Decision> {
    let decision = completion(board, Player::Computer)
        .map(|position| Decision {
            position,
            rule: Rule::Win,
        })
        .or_else(|| {
            completion(board, Player::Human).map(|position| Decision {
                position,
                rule: Rule::Block,
            })
        })
        .or_else(|| {
            (board.is_empty(Position::Center) && !board.is_blank()).then_some(Decision {
                position: Position::Center,
                rule: Rule::Center,
            })
        })
        .or_else(|| {
            Position::valid_moves(board)
                .choose(rng)
                .map(|&position| Decision {
                    position,
                    rule: Rule::Random,
                })
        });

    match decision {
        Some(d) => debug!(position = %d.position, rule = %d.rule, "Computer chose square"),
        None => warn!("Computer asked to move on a full board"),
    }
    decision
}

/// Returns the square the computer should play next.
///
/// See [`decide`] for the rule order.
pub fn determine_computer_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Position> {
    decide(board, rng).map(|d| d.position)
}

/// First open square, in pattern order, that completes a line for `player`.
fn completion(board: &Board, player: Player) -> Option<Position> {
    WIN_PATTERNS
        .iter()
        .find_map(|pattern| pattern.completion_for(board, player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MoveRng, Square};

    fn board_with(human: &[Position], computer: &[Position]) -> Board {
        let mut board = Board::new();
        for &pos in human {
            board.set(pos, Square::Occupied(Player::Human));
        }
        for &pos in computer {
            board.set(pos, Square::Occupied(Player::Computer));
        }
        board
    }

    #[test]
    fn test_win_beats_block() {
        // Computer can finish the middle row, human threatens the top row.
        let board = board_with(
            &[Position::TopLeft, Position::TopCenter, Position::BottomRight],
            &[Position::MiddleLeft, Position::Center],
        );
        let decision = decide(&board, &mut MoveRng::seeded(1)).unwrap();
        assert_eq!(decision.position, Position::MiddleRight);
        assert_eq!(decision.rule, Rule::Win);
    }

    #[test]
    fn test_first_winning_pattern_in_order() {
        // Two wins available: column 0 (pattern 3) and diagonal 0-4-8 (pattern 6).
        let board = board_with(
            &[Position::TopCenter, Position::TopRight, Position::BottomCenter],
            &[Position::TopLeft, Position::MiddleLeft, Position::BottomRight],
        );
        let decision = decide(&board, &mut MoveRng::seeded(1)).unwrap();
        assert_eq!(decision.position, Position::BottomLeft);
        assert_eq!(decision.rule, Rule::Win);
    }

    #[test]
    fn test_block_when_no_win() {
        let board = board_with(&[Position::TopLeft, Position::Center], &[Position::TopCenter]);
        let decision = decide(&board, &mut MoveRng::seeded(1)).unwrap();
        assert_eq!(decision.position, Position::BottomRight);
        assert_eq!(decision.rule, Rule::Block);
    }

    #[test]
    fn test_blocked_line_is_not_a_threat() {
        // Human holds 0 and 1 but the computer already sits on 2.
        let board = board_with(
            &[Position::TopLeft, Position::TopCenter],
            &[Position::TopRight],
        );
        let decision = decide(&board, &mut MoveRng::seeded(1)).unwrap();
        assert_eq!(decision.rule, Rule::Center);
    }

    #[test]
    fn test_center_after_first_move() {
        let board = board_with(&[Position::TopLeft], &[]);
        let decision = decide(&board, &mut MoveRng::seeded(1)).unwrap();
        assert_eq!(decision.position, Position::Center);
        assert_eq!(decision.rule, Rule::Center);
    }

    #[test]
    fn test_blank_board_falls_back_to_random() {
        let decision = decide(&Board::new(), &mut MoveRng::seeded(1)).unwrap();
        assert_eq!(decision.rule, Rule::Random);
    }

    #[test]
    fn test_random_only_picks_empty_squares() {
        // Center taken, no threats: only random remains.
        let board = board_with(&[Position::Center], &[Position::TopLeft]);
        let mut rng = MoveRng::seeded(3);
        for _ in 0..50 {
            let decision = decide(&board, &mut rng).unwrap();
            assert_eq!(decision.rule, Rule::Random);
            assert!(board.is_empty(decision.position));
        }
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut board = Board::new();
        for (i, pos) in Position::ALL.iter().enumerate() {
            let player = if i % 2 == 0 { Player::Human } else { Player::Computer };
            board.set(*pos, Square::Occupied(player));
        }
        assert_eq!(determine_computer_move(&board, &mut MoveRng::seeded(1)), None);
    }
}
