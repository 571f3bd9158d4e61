use internal_iterator::InternalIterator;

use board_engine::board::Outcome::WonBy;
use board_engine::board::{Board, BoardMoves, Outcome, Player};
use board_engine::games::connect4::Connect4;
use board_engine::util::board_gen::board_with_moves;

use crate::board::{board_fuzz_undo, board_test_main};

#[test]
fn empty() {
    let board = Connect4::default();
    assert_eq!(board.legal_actions().count(), 7);
    board_test_main(&board);
}

#[test]
fn basic() {
    board_test_main(&board_with_moves(Connect4::default(), &[1]));
    board_test_main(&board_with_moves(Connect4::default(), &[1, 2]));
    board_test_main(&board_with_moves(Connect4::default(), &[1, 2, 3]));
}

#[test]
fn draw() {
    let moves = vec![
        1, 0, 3, 0, 5, 4, 4, 4, 0, 6, 2, 0, 3, 0, 2, 6, 4, 1, 0, 3, 6, 5, 3, 1, 1, 6, 3, 5, 6, 3, 1, 4, 5, 4, 5, 1, 2,
        2, 5, 2, 2, 6,
    ];

    check_outcome(&moves, Some(Outcome::Draw));
}

#[test]
fn wins() {
    check_outcome(&[1, 1, 2, 2, 3, 3, 4], Some(WonBy(Player::A)));
    check_outcome(&[1, 2, 1, 2, 1, 2, 1], Some(WonBy(Player::A)));
    check_outcome(&[1, 2, 2, 3, 6, 3, 3, 4, 6, 4, 6, 4, 4], Some(WonBy(Player::A)));
    check_outcome(&[4, 3, 3, 2, 6, 2, 2, 1, 6, 1, 6, 1, 1], Some(WonBy(Player::A)));
    check_outcome(&[0, 1, 0, 1, 0, 1, 6, 1], Some(WonBy(Player::B)));
}

#[test]
fn full_column() {
    let board = board_with_moves(Connect4::default(), &[3, 3, 3, 3, 3, 3]);
    assert_eq!(board.winner(), None);
    assert!(!board.legal(3));
    assert_eq!(board.legal_actions().count(), 6);
    board_test_main(&board);
}

#[test]
fn pop_restores_column() {
    let mut board = board_with_moves(Connect4::default(), &[2, 2, 2]);
    assert_eq!(board.tile(2, 2), Some(Player::A));

    assert_eq!(board.pop(), 2);
    assert_eq!(board.tile(2, 2), None);
    assert_eq!(board.tile(2, 1), Some(Player::B));
    assert_eq!(board, board_with_moves(Connect4::default(), &[2, 2]));
}

#[test]
fn fuzz_undo() {
    board_fuzz_undo(&Connect4::default(), 100, 42, |_| {});
}

fn check_outcome(moves: &[u8], outcome: Option<Outcome>) {
    let board = board_with_moves(Connect4::default(), moves);
    println!("moves: {:?}", moves);
    println!("{}", board);

    assert_eq!(board.winner(), outcome);

    board_test_main(&board);
}
