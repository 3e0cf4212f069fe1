//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! board storage so the strategy and the session can compose them.

pub mod draw;
pub mod win;

pub use draw::{check_draw, game_state};
pub use win::{WIN_PATTERNS, WinPattern, check_win};
