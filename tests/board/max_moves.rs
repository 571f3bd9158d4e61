use internal_iterator::InternalIterator;

use board_engine::board::{Board, BoardMoves, Outcome, Player};
use board_engine::games::max_length::MaxMovesBoard;
use board_engine::games::ttt::{Coord, TTTBoard};

use crate::board::{board_fuzz_undo, board_test_main};

#[test]
fn basic_draw() {
    let board = MaxMovesBoard::new(TTTBoard::default(), 2);
    test_outcomes(board, &[0, 3, 1], &[None, None, Some(Outcome::Draw)]);
}

#[test]
fn basic_finished() {
    let board = MaxMovesBoard::new(TTTBoard::default(), 10);
    test_outcomes(
        board,
        &[0, 3, 1, 4, 2],
        &[None, None, None, None, None, Some(Outcome::WonBy(Player::A))],
    );
}

#[test]
fn pop_reverts_draw() {
    let mut board = MaxMovesBoard::new(TTTBoard::default(), 2);
    board.append(Coord::from_i(0));
    board.append(Coord::from_i(4));
    assert_eq!(board.winner(), Some(Outcome::Draw));
    assert_eq!(board.legal_actions().count(), 0);
    assert!(!board.legal(Coord::from_i(8)));
    board_test_main(&board);

    assert_eq!(board.max_moves(), 2);
    assert_eq!(board.inner().winner(), None);
    assert_eq!(board.inner().len(), 2);

    assert_eq!(board.pop(), Coord::from_i(4));
    assert_eq!(board.winner(), None);
    assert_eq!(board.legal_actions().count(), 8);
    board_test_main(&board);
}

#[test]
#[should_panic]
fn append_past_limit() {
    let mut board = MaxMovesBoard::new(TTTBoard::default(), 1);
    board.append(Coord::from_i(0));
    board.append(Coord::from_i(1));
}

#[test]
fn fuzz_undo() {
    board_fuzz_undo(&MaxMovesBoard::new(TTTBoard::default(), 5), 100, 9, |board| {
        assert!(board.len() <= 5);
    });
}

fn test_outcomes(mut board: MaxMovesBoard<TTTBoard>, moves: &[usize], outcomes: &[Option<Outcome>]) {
    for (i, &outcome) in outcomes.iter().enumerate() {
        println!("{}", board);

        assert_eq!(outcome, board.winner());
        if outcome.is_some() {
            board_test_main(&board);
            break;
        }

        board.append(Coord::from_i(moves[i]));
    }
}
