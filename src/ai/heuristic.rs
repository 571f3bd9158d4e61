//! Board evaluation: the [Heuristic] trait used by minimax, linear evaluation over [Features]
//! and the greedy [HeuristicBot] built on top of it.
use std::fmt::{Debug, Formatter};
use std::ops::Neg;

use internal_iterator::InternalIterator;
use rand::Rng;

use crate::ai::Bot;
use crate::board::{Board, Player};

/// The value assigned to a won board. Larger than any linear evaluation is expected to reach.
pub const WIN_VALUE: f32 = 1000.0;

pub trait Heuristic<B: Board> {
    /// The type used to represent the heuristic value of a board.
    type V: Copy + Neg<Output = Self::V>;

    /// Return the heuristic value for the given board from the POV of the player to move.
    /// `depth` is the number of actions played since the board the search was started on,
    /// and can be used to prefer faster wins or slower losses.
    fn value(&self, board: &B, depth: u32) -> Self::V;

    /// Merge old and new into a new value, and return whether the new value is at least as good as the old one.
    /// For standard minimax searches this can simply be implemented as: `(max(old, new), new >= old)`
    fn merge(old: Self::V, new: Self::V) -> (Self::V, bool);
}

/// Position evaluation input: a fixed-length vector from the POV of [Player::A].
pub trait Features: Board {
    fn features(&self) -> Vec<f32>;
}

/// [Heuristic] that only looks at board outcomes, every unfinished board is worth zero.
#[derive(Debug, Copy, Clone)]
pub struct UtilityHeuristic;

impl<B: Board> Heuristic<B> for UtilityHeuristic {
    type V = i32;

    fn value(&self, board: &B, _: u32) -> i32 {
        board.utility() * board.turn().sign::<i32>(Player::A)
    }

    fn merge(old: i32, new: i32) -> (i32, bool) {
        (old.max(new), new >= old)
    }
}

/// Dot product between fixed weights and the board [Features].
/// Finished boards are worth `WIN_VALUE`, minus the depth so faster wins are preferred.
#[derive(Clone)]
pub struct LinearHeuristic {
    weights: Vec<f32>,
}

impl LinearHeuristic {
    pub fn new(weights: Vec<f32>) -> Self {
        LinearHeuristic { weights }
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// The value of `board` from the POV of [Player::A].
    pub fn evaluate<B: Features>(&self, board: &B, depth: u32) -> f32 {
        if board.is_done() {
            return board.utility() as f32 * (WIN_VALUE - depth as f32);
        }

        let features = board.features();
        assert_eq!(
            self.weights.len(),
            features.len(),
            "Weight count does not match feature count for {:?}",
            board
        );
        self.weights.iter().zip(&features).map(|(w, f)| w * f).sum()
    }
}

impl Debug for LinearHeuristic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "LinearHeuristic {{ weights: {} }}", self.weights.len())
    }
}

impl<B: Features> Heuristic<B> for LinearHeuristic {
    type V = f32;

    fn value(&self, board: &B, depth: u32) -> f32 {
        self.evaluate(board, depth) * board.turn().sign::<f32>(Player::A)
    }

    fn merge(old: f32, new: f32) -> (f32, bool) {
        if new >= old {
            (new, true)
        } else {
            (old, false)
        }
    }
}

/// Greedy one-ply bot: plays every legal action, evaluates the resulting board and keeps the best one for the mover.
/// Ties are broken uniformly at random.
pub struct HeuristicBot<R: Rng> {
    heuristic: LinearHeuristic,
    rng: R,
}

impl<R: Rng> HeuristicBot<R> {
    pub fn new(weights: Vec<f32>, rng: R) -> Self {
        HeuristicBot {
            heuristic: LinearHeuristic::new(weights),
            rng,
        }
    }
}

impl<R: Rng> Debug for HeuristicBot<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "HeuristicBot {{ heuristic: {:?} }}", self.heuristic)
    }
}

impl<B: Features, R: Rng> Bot<B> for HeuristicBot<R> {
    fn select_move(&mut self, board: &mut B) -> B::Action {
        assert!(!board.is_done(), "HeuristicBot cannot select a move on a done board:\n{:?}", board);

        // A maximizes the A-POV value, B minimizes it
        let sign = board.turn().sign::<f32>(Player::A);
        let actions: Vec<B::Action> = board.legal_actions().collect();

        let mut best: Option<(f32, B::Action)> = None;
        let mut tie_count = 0;

        for action in actions {
            let value = {
                let child = board.append_scoped(action);
                sign * self.heuristic.evaluate(&*child, 1)
            };

            match best {
                Some((best_value, _)) if value < best_value => {}
                Some((best_value, _)) if value == best_value => {
                    tie_count += 1;
                    if self.rng.gen_range(0..tie_count) == 0 {
                        best = Some((value, action));
                    }
                }
                _ => {
                    tie_count = 1;
                    best = Some((value, action));
                }
            }
        }

        match best {
            Some((_, action)) => action,
            None => unreachable!("Board is not done but has no legal actions:\n{:?}", board),
        }
    }
}
