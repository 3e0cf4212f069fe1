//! Draw detection and the derived game state.

use super::super::phases::GameState;
use super::super::{Board, Player};
use super::win::check_win;
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
///
/// Only meaningful once [`check_win`] has returned false for the player who
/// just moved: a full board with a winning line is a win.
#[instrument(skip(board))]
pub fn check_draw(board: &Board) -> bool {
    board.occupied() == 9
}

/// Derives the state of the game from the board alone.
///
/// Wins are checked before the draw.
#[instrument(skip(board))]
pub fn game_state(board: &Board) -> GameState {
    if check_win(board, Player::Human) {
        GameState::HumanWin
    } else if check_win(board, Player::Computer) {
        GameState::ComputerWin
    } else if check_draw(board) {
        GameState::Draw
    } else {
        GameState::Ongoing
    }
}
