//! Core domain types for the board.

use super::action::Move;
use super::position::Position;
use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// The person tapping cells (plays `X`).
    Human,
    /// The heuristic opponent (plays `O`).
    Computer,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }

    /// Returns the mark drawn for this player.
    pub fn mark(self) -> char {
        match self {
            Player::Human => 'X',
            Player::Computer => 'O',
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

/// 3x3 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns true when no square has been played.
    pub fn is_blank(&self) -> bool {
        self.squares.iter().all(|s| *s == Square::Empty)
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of occupied squares.
    pub fn occupied(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Number of squares held by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Moves recorded on the board, in position order.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        Position::ALL
            .iter()
            .filter_map(|&pos| match self.get(pos) {
                Square::Occupied(player) => Some(Move::new(player, pos)),
                Square::Empty => None,
            })
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty squares show their 1-based key so the grid doubles as a keypad.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => char::from(b'1' + pos as u8),
                    Square::Occupied(player) => player.mark(),
                };
                result.push(symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_blank() {
        let board = Board::new();
        assert!(board.is_blank());
        assert_eq!(board.occupied(), 0);
        assert_eq!(board.moves().count(), 0);
    }

    #[test]
    fn test_moves_follow_position_order() {
        let mut board = Board::new();
        board.set(Position::BottomRight, Square::Occupied(Player::Computer));
        board.set(Position::TopLeft, Square::Occupied(Player::Human));

        let moves: Vec<_> = board.moves().collect();
        assert_eq!(
            moves,
            vec![
                Move::new(Player::Human, Position::TopLeft),
                Move::new(Player::Computer, Position::BottomRight),
            ]
        );
        assert_eq!(board.count(Player::Human), 1);
        assert_eq!(board.count(Player::Computer), 1);
    }

    #[test]
    fn test_display_marks_and_keys() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::Human));
        board.set(Position::Center, Square::Occupied(Player::Computer));

        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }
}
