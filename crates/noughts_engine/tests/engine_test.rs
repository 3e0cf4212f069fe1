//! Tests for the stateless engine operations.

use noughts_engine::{
    Board, GameState, MoveRng, Player, Position, Rule, Square, apply_human_move, check_draw,
    check_win, decide, determine_computer_move, game_state, reset_game,
};

fn board_from(marks: &str) -> Board {
    let mut board = Board::new();
    for (pos, mark) in Position::ALL.iter().zip(marks.chars()) {
        match mark {
            'X' => board.set(*pos, Square::Occupied(Player::Human)),
            'O' => board.set(*pos, Square::Occupied(Player::Computer)),
            _ => {}
        }
    }
    board
}

#[test]
fn test_win_now_completes_top_row() {
    // Computer at 0 and 1, human elsewhere.
    let board = board_from("OO.XX...X");
    let mut rng = MoveRng::seeded(11);
    assert_eq!(determine_computer_move(&board, &mut rng), Some(Position::TopRight));
}

#[test]
fn test_block_on_diagonal() {
    // Human at 0 and 4, computer at 1.
    let board = board_from("XO..X....");
    let decision = decide(&board, &mut MoveRng::seeded(11)).unwrap();
    assert_eq!(decision.position, Position::BottomRight);
    assert_eq!(decision.rule, Rule::Block);
}

#[test]
fn test_center_after_single_human_move() {
    let board = apply_human_move(&reset_game(), Position::TopLeft);
    let mut rng = MoveRng::seeded(11);
    assert_eq!(determine_computer_move(&board, &mut rng), Some(Position::Center));
}

#[test]
fn test_opening_move_is_uniform_over_board() {
    let board = reset_game();
    let mut rng = MoveRng::seeded(2024);
    let mut counts = [0usize; 9];

    for _ in 0..9_000 {
        let decision = decide(&board, &mut rng).unwrap();
        assert_eq!(decision.rule, Rule::Random);
        counts[decision.position.to_index()] += 1;
    }

    // Expected 1000 per square; the bounds are six standard deviations wide.
    for (index, count) in counts.iter().enumerate() {
        assert!(
            (800..=1200).contains(count),
            "square {index} picked {count} times"
        );
    }
}

#[test]
fn test_reset_board_is_not_terminal() {
    let board = reset_game();
    assert!(!check_draw(&board));
    assert!(!check_win(&board, Player::Human));
    assert!(!check_win(&board, Player::Computer));
    assert_eq!(game_state(&board), GameState::Ongoing);
}

#[test]
fn test_full_board_draw() {
    // X O X / X O O / O X X
    let board = board_from("XOXXOOOXX");
    assert!(check_draw(&board));
    assert!(!check_win(&board, Player::Human));
    assert!(!check_win(&board, Player::Computer));
    assert_eq!(game_state(&board), GameState::Draw);
}

#[test]
fn test_occupied_tap_is_noop() {
    let board = board_from("O........");
    assert_eq!(apply_human_move(&board, Position::TopLeft), board);
}
