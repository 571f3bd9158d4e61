use std::fmt::{Display, Formatter};
use std::ops::ControlFlow;

use internal_iterator::InternalIterator;
use rand::Rng;

use crate::ai::heuristic::Features;
use crate::board::{illegal_action, Board, BoardMoves, Outcome};
use crate::util::zobrist::Zobrist;

/// A wrapper around an existing board that has the same behaviour,
/// except that the outcome is a draw once a fixed number of actions has been played.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct MaxMovesBoard<B: Board> {
    inner: B,
    max_moves: usize,
}

impl<B: Board> MaxMovesBoard<B> {
    pub fn new(inner: B, max_moves: usize) -> Self {
        MaxMovesBoard { inner, max_moves }
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    pub fn max_moves(&self) -> usize {
        self.max_moves
    }

    fn limit_reached(&self) -> bool {
        self.inner.len() >= self.max_moves
    }
}

impl<B: Board> Board for MaxMovesBoard<B> {
    type Action = B::Action;

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn legal(&self, action: Self::Action) -> bool {
        !self.limit_reached() && self.inner.legal(action)
    }

    fn random_legal_action(&self, rng: &mut impl Rng) -> Option<Self::Action> {
        if self.limit_reached() {
            return None;
        }
        self.inner.random_legal_action(rng)
    }

    fn append(&mut self, action: Self::Action) {
        if self.limit_reached() {
            illegal_action(self, action);
        }
        self.inner.append(action);
    }

    fn pop(&mut self) -> Self::Action {
        self.inner.pop()
    }

    fn last_action(&self) -> Option<Self::Action> {
        self.inner.last_action()
    }

    fn winner(&self) -> Option<Outcome> {
        match self.inner.winner() {
            Some(outcome) => Some(outcome),
            None if self.limit_reached() => Some(Outcome::Draw),
            None => None,
        }
    }

    fn zobrist(&self) -> Zobrist {
        self.inner.zobrist()
    }

    fn clear(&mut self) {
        self.inner.clear();
    }
}

impl<'a, B: Board> BoardMoves<'a, MaxMovesBoard<B>> for MaxMovesBoard<B> {
    type AllActionsIterator = <B as BoardMoves<'a, B>>::AllActionsIterator;
    type LegalActionsIterator = MaxMovesIterator<<B as BoardMoves<'a, B>>::LegalActionsIterator>;

    fn all_possible_actions() -> Self::AllActionsIterator {
        B::all_possible_actions()
    }

    fn legal_actions(&'a self) -> Self::LegalActionsIterator {
        MaxMovesIterator {
            inner: self.inner.legal_actions(),
            done: self.limit_reached(),
        }
    }
}

/// The legal actions of the inner board, or nothing once the limit is reached.
#[derive(Debug)]
pub struct MaxMovesIterator<I> {
    inner: I,
    done: bool,
}

impl<I: InternalIterator> InternalIterator for MaxMovesIterator<I> {
    type Item = I::Item;

    fn try_for_each<R, F>(self, f: F) -> ControlFlow<R>
    where
        F: FnMut(Self::Item) -> ControlFlow<R>,
    {
        if self.done {
            return ControlFlow::Continue(());
        }
        self.inner.try_for_each(f)
    }
}

impl<B: Board> Display for MaxMovesBoard<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\nmoves: {}/{}", self.inner, self.inner.len(), self.max_moves)
    }
}

impl<B: Features> Features for MaxMovesBoard<B> {
    fn features(&self) -> Vec<f32> {
        self.inner.features()
    }
}
