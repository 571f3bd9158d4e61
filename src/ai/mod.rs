use std::fmt::Debug;

use crate::board::Board;

pub mod heuristic;
pub mod minimax;
pub mod simple;

pub trait Bot<B: Board>: Debug {
    /// Pick an action to play. Panics if the board is done.
    ///
    /// The board is mutable so bots can look ahead with `append`/`pop`,
    /// it must be returned in exactly the state it was passed in.
    /// `self` is mutable to allow for random state.
    fn select_move(&mut self, board: &mut B) -> B::Action;
}

impl<B: Board, F: FnMut(&B) -> B::Action + Debug> Bot<B> for F {
    fn select_move(&mut self, board: &mut B) -> B::Action {
        self(board)
    }
}
