use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::{ControlFlow, Deref, DerefMut};

use internal_iterator::InternalIterator;
use rand::Rng;

use crate::util::zobrist::Zobrist;

/// One of the two players.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Player {
    A,
    B,
}

/// The absolute outcome for a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Outcome {
    WonBy(Player),
    Draw,
}

/// The main trait of this crate. Represents the state of a game together with the history of actions that led to it.
///
/// Boards are mutated in place: [Board::append] plays an action and [Board::pop] exactly reverts the last one.
/// Search algorithms walk a single board depth-first instead of cloning it at every node,
/// so `append(a); pop()` must restore a board that compares equal (`==`) to the original,
/// including the zobrist hash and every auxiliary structure.
///
/// Passing an illegal action to `append`, or calling `pop` on a board without history,
/// is a bug in the caller and panics.
pub trait Board: 'static + Debug + Display + Clone + Eq + Hash + Send + Sync
where
    for<'a> Self: BoardMoves<'a, Self>,
{
    /// The type used to represent actions on this board.
    type Action: Debug + Display + Eq + Hash + Copy + Send + Sync;

    /// The number of actions played so far.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The player that plays the next action. Determined by the parity of [Board::len].
    fn turn(&self) -> Player {
        Player::from_parity(self.len())
    }

    /// The player that played the last action.
    fn other(&self) -> Player {
        self.turn().other()
    }

    /// Whether `action` can be played now. Always `false` for a done board.
    fn legal(&self, action: Self::Action) -> bool;

    /// Pick a random action from `legal_actions` with a uniform distribution.
    /// Returns `None` if the board is done.
    fn random_legal_action(&self, rng: &mut impl Rng) -> Option<Self::Action> {
        let count = self.legal_actions().count();
        if count == 0 {
            return None;
        }
        let index = rng.gen_range(0..count);
        self.legal_actions().nth(index)
    }

    /// Play `action`, modifying this board.
    /// Panics if this board is done or if the action is not legal.
    fn append(&mut self, action: Self::Action);

    /// Undo the last action and return it.
    /// Panics if no actions have been played.
    fn pop(&mut self) -> Self::Action;

    /// The last action that was played, if any.
    fn last_action(&self) -> Option<Self::Action>;

    /// The outcome of this board, `None` while the game is still in progress.
    fn winner(&self) -> Option<Outcome>;

    /// Whether this game is done.
    fn is_done(&self) -> bool {
        self.winner().is_some()
    }

    /// The value of this board from the POV of [Player::A]: `1` for a win, `-1` for a loss and `0` otherwise.
    fn utility(&self) -> i32 {
        match self.winner() {
            Some(Outcome::WonBy(player)) => player.sign(Player::A),
            Some(Outcome::Draw) | None => 0,
        }
    }

    /// Incrementally maintained fingerprint of the full state.
    fn zobrist(&self) -> Zobrist;

    /// Reset to the initial empty state.
    fn clear(&mut self);

    /// Clone this board, play `action` on it and return the new board.
    fn clone_and_append(&self, action: Self::Action) -> Self {
        let mut next = self.clone();
        next.append(action);
        next
    }

    /// Play `action` and return a guard that derefs to this board and pops the action again when dropped.
    fn append_scoped(&mut self, action: Self::Action) -> Scoped<'_, Self> {
        self.append(action);
        Scoped { board: self }
    }
}

/// A helper trait to get the correct lifetimes for [BoardMoves::legal_actions].
/// This is a workaround for the lack of generic associated types in trait bounds.
pub trait BoardMoves<'a, B: Board> {
    type AllActionsIterator: InternalIterator<Item = B::Action>;
    type LegalActionsIterator: InternalIterator<Item = B::Action>;

    /// All theoretically possible actions of a bounded shape, for any possible board.
    /// Every action in here that is legal on a board is also returned by `legal_actions`.
    /// Games whose actions cannot be enumerated up front (checkers jump chains) may generate
    /// legal actions outside of this set, those are still accepted by [Board::legal].
    fn all_possible_actions() -> Self::AllActionsIterator;

    /// Return an iterator over the legal actions, empty if the board is done.
    /// No guarantees are made about the ordering except that it stays consistent when the board is not modified.
    fn legal_actions(&'a self) -> Self::LegalActionsIterator;
}

/// Guard returned by [Board::append_scoped].
/// Every action appended through this guard is matched by exactly one `pop`,
/// on every exit path, including early returns and unwinding.
#[derive(Debug)]
pub struct Scoped<'b, B: Board> {
    board: &'b mut B,
}

impl<B: Board> Deref for Scoped<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.board
    }
}

impl<B: Board> DerefMut for Scoped<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.board
    }
}

impl<B: Board> Drop for Scoped<'_, B> {
    fn drop(&mut self) {
        self.board.pop();
    }
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::A, Player::B];

    /// The player whose turn it is after `len` actions.
    pub fn from_parity(len: usize) -> Player {
        if len % 2 == 0 {
            Player::A
        } else {
            Player::B
        }
    }

    pub fn other(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Player::A => 'A',
            Player::B => 'B',
        }
    }

    pub fn sign<V: num_traits::One + std::ops::Neg<Output = V>>(self, pov: Player) -> V {
        if self == pov {
            V::one()
        } else {
            -V::one()
        }
    }
}

/// A convenient type to use for the iterator returned by [BoardMoves::all_possible_actions].
#[derive(Debug)]
pub struct AllActionsIterator<B: Board>(PhantomData<B>);

impl<B: Board> Default for AllActionsIterator<B> {
    fn default() -> Self {
        AllActionsIterator(PhantomData)
    }
}

/// A convenient type to use for the iterator returned by [BoardMoves::legal_actions].
#[derive(Debug)]
pub struct LegalActionsIterator<'a, B: Board>(pub &'a B);

impl<'a, B: Board> LegalActionsIterator<'a, B> {
    pub fn board(&self) -> &'a B {
        self.0
    }
}

/// Implements [InternalIterator] for legal actions based on
/// [BoardMoves::all_possible_actions] and [Board::legal].
/// This may be a lot slower then directly generating the legal actions.
#[derive(Debug)]
pub struct BruteforceMoveIterator<'a, B: Board> {
    board: &'a B,
}

impl<'a, B: Board> BruteforceMoveIterator<'a, B> {
    pub fn new(board: &'a B) -> Self {
        BruteforceMoveIterator { board }
    }
}

impl<'a, B: Board> InternalIterator for BruteforceMoveIterator<'a, B> {
    type Item = B::Action;

    fn try_for_each<R, F>(self, mut f: F) -> ControlFlow<R>
    where
        F: FnMut(Self::Item) -> ControlFlow<R>,
    {
        if self.board.is_done() {
            return ControlFlow::Continue(());
        }

        B::all_possible_actions().try_for_each(|action: B::Action| {
            if self.board.legal(action) {
                f(action)
            } else {
                ControlFlow::Continue(())
            }
        })
    }
}

/// Shared panic for [Board::append] implementations.
#[track_caller]
pub(crate) fn illegal_action<B: Board>(board: &B, action: B::Action) -> ! {
    match board.winner() {
        Some(outcome) => panic!(
            "Cannot play {:?}, board is already done with {:?}:\n{:?}",
            action, outcome, board
        ),
        None => panic!("Action {:?} is not legal for {:?} on\n{:?}", action, board.turn(), board),
    }
}
