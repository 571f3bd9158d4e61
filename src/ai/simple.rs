use std::fmt::{Debug, Formatter};

use rand::Rng;

use crate::ai::Bot;
use crate::board::Board;

/// Bot that chooses uniformly among the legal actions.
pub struct RandomBot<R: Rng> {
    rng: R,
}

impl<R: Rng> Debug for RandomBot<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "RandomBot")
    }
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        RandomBot { rng }
    }
}

impl<B: Board, R: Rng> Bot<B> for RandomBot<R> {
    fn select_move(&mut self, board: &mut B) -> B::Action {
        match board.random_legal_action(&mut self.rng) {
            Some(action) => action,
            None => panic!("RandomBot cannot select a move on a done board:\n{:?}", board),
        }
    }
}
