//! Utilities to generate a `Board` in a random state.
use rand::Rng;

use crate::board::{Board, Outcome};

/// Play the given actions, starting from `start`.
pub fn board_with_moves<B: Board>(start: B, actions: &[B::Action]) -> B {
    let mut curr = start;
    for &action in actions {
        assert!(!curr.is_done(), "Board already done, playing {} on {}", action, curr);
        assert!(curr.legal(action), "Action not legal, playing {} on {}", action, curr);
        curr.append(action);
    }
    curr
}

/// Generate a `Board` by playing `n` random actions on `start`.
/// Retries from scratch whenever the game ends early.
pub fn random_board_with_moves<B: Board>(start: &B, n: u32, rng: &mut impl Rng) -> B {
    'new_try: loop {
        let mut board = start.clone();
        for _ in 0..n {
            match board.random_legal_action(rng) {
                Some(action) => board.append(action),
                None => continue 'new_try,
            }
        }
        return board;
    }
}

/// Generate a random `Board` with a specific `Outcome`.
pub fn random_board_with_outcome<B: Board>(start: &B, outcome: Outcome, rng: &mut impl Rng) -> B {
    loop {
        let mut board = start.clone();
        while let Some(action) = board.random_legal_action(rng) {
            board.append(action);
        }
        if board.winner() == Some(outcome) {
            return board;
        }
    }
}

/// Play random actions on `start` until `cond(&board)` returns true.
pub fn random_board_with_condition<B: Board>(start: &B, rng: &mut impl Rng, mut cond: impl FnMut(&B) -> bool) -> B {
    if cond(start) {
        return start.clone();
    }
    assert!(
        !start.is_done(),
        "Start board is done and does not match condition, so we won't find anything that does"
    );

    loop {
        let mut board = start.clone();
        while let Some(action) = board.random_legal_action(rng) {
            board.append(action);
            if cond(&board) {
                return board;
            }
        }
    }
}
