//! Win detection logic.

use super::super::{Board, Player, Position, Square};
use tracing::instrument;

/// Three positions forming a winning line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WinPattern([Position; 3]);

impl WinPattern {
    /// True if `player` holds all three positions.
    pub fn is_covered_by(&self, board: &Board, player: Player) -> bool {
        self.0
            .iter()
            .all(|&pos| board.get(pos) == Square::Occupied(player))
    }

    /// The open square that would complete this line for `player`.
    ///
    /// Returns `Some` only when `player` holds exactly two of the three
    /// positions and the third is empty.
    pub fn completion_for(&self, board: &Board, player: Player) -> Option<Position> {
        let held = self
            .0
            .iter()
            .filter(|&&pos| board.get(pos) == Square::Occupied(player))
            .count();
        if held != 2 {
            return None;
        }
        self.0.iter().copied().find(|&pos| board.is_empty(pos))
    }
}

/// The 8 winning lines: rows, then columns, then diagonals.
pub const WIN_PATTERNS: [WinPattern; 8] = [
    // Rows
    WinPattern([Position::TopLeft, Position::TopCenter, Position::TopRight]),
    WinPattern([Position::MiddleLeft, Position::Center, Position::MiddleRight]),
    WinPattern([Position::BottomLeft, Position::BottomCenter, Position::BottomRight]),
    // Columns
    WinPattern([Position::TopLeft, Position::MiddleLeft, Position::BottomLeft]),
    WinPattern([Position::TopCenter, Position::Center, Position::BottomCenter]),
    WinPattern([Position::TopRight, Position::MiddleRight, Position::BottomRight]),
    // Diagonals
    WinPattern([Position::TopLeft, Position::Center, Position::BottomRight]),
    WinPattern([Position::TopRight, Position::Center, Position::BottomLeft]),
];

/// Checks whether `player` has three in a row.
///
/// Any pattern fully contained in the player's positions is a win; the
/// scan stops at the first one.
#[instrument(skip(board))]
pub fn check_win(board: &Board, player: Player) -> bool {
    WIN_PATTERNS
        .iter()
        .any(|pattern| pattern.is_covered_by(board, player))
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert!(!check_win(&board, Player::Human));
        assert!(!check_win(&board, Player::Computer));
    }

    #[test]
    fn test_winner_top_row() {
        let board = board_with(
            &[Position::TopLeft, Position::TopCenter, Position::TopRight],
            &[Position::Center, Position::BottomLeft],
        );
        assert!(check_win(&board, Player::Human));
        assert!(!check_win(&board, Player::Computer));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = board_with(
            &[Position::TopLeft, Position::TopCenter],
            &[Position::TopRight, Position::Center, Position::BottomLeft],
        );
        assert!(check_win(&board, Player::Computer));
        assert!(!check_win(&board, Player::Human));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board = board_with(
            &[Position::TopLeft, Position::TopCenter],
            &[Position::TopRight],
        );
        assert!(!check_win(&board, Player::Human));
        assert!(!check_win(&board, Player::Computer));
    }

    #[test]
    fn test_completion_needs_two_held_and_one_empty() {
        let row = WIN_PATTERNS[0];

        let two_held = board_with(&[], &[Position::TopLeft, Position::TopCenter]);
        assert_eq!(row.completion_for(&two_held, Player::Computer), Some(Position::TopRight));
        assert_eq!(row.completion_for(&two_held, Player::Human), None);

        let blocked = board_with(
            &[Position::TopRight],
            &[Position::TopLeft, Position::TopCenter],
        );
        assert_eq!(row.completion_for(&blocked, Player::Computer), None);

        let one_held = board_with(&[], &[Position::TopLeft]);
        assert_eq!(row.completion_for(&one_held, Player::Computer), None);
    }
}
