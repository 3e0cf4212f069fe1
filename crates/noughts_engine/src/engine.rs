//! Stateless board transitions.
//!
//! Win/draw checks live in [`rules`](crate::rules) and the computer's choice
//! in [`strategy`](crate::strategy); this module covers the remaining board
//! operations. None of them hold state between calls.

use super::{Board, Player, Position, Square};
use tracing::{debug, instrument};

/// Returns a copy of `board` with a human mark at `position`.
///
/// Tapping an occupied square has no effect: the board comes back
/// unchanged. Callers re-check win and draw afterwards.
#[instrument(skip(board))]
pub fn apply_human_move(board: &Board, position: Position) -> Board {
    place(board, Player::Human, position)
}

/// Returns an empty board for a new game.
#[instrument]
pub fn reset_game() -> Board {
    Board::new()
}

/// Copies `board` with `player`'s mark at `position` if the square is free.
pub(crate) fn place(board: &Board, player: Player, position: Position) -> Board {
    let mut next = *board;
    if next.is_empty(position) {
        next.set(position, Square::Occupied(player));
    } else {
        debug!(%position, ?player, "Ignoring move on occupied square");
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_human_move_marks_square() {
        let board = apply_human_move(&reset_game(), Position::Center);
        assert_eq!(board.get(Position::Center), Square::Occupied(Player::Human));
        assert_eq!(board.occupied(), 1);
    }

    #[test]
    fn test_apply_human_move_on_occupied_is_noop() {
        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Player::Computer));

        let after = apply_human_move(&board, Position::Center);
        assert_eq!(after, board);
    }

    #[test]
    fn test_input_board_untouched() {
        let board = reset_game();
        let _ = apply_human_move(&board, Position::TopLeft);
        assert!(board.is_blank());
    }
}
