use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ops::Neg;

use internal_iterator::InternalIterator;
use rand::Rng;

use crate::ai::heuristic::Heuristic;
use crate::ai::Bot;
use crate::board::Board;

#[derive(Debug)]
pub struct MinimaxResult<V, A> {
    /// The value of this board.
    pub value: V,

    /// The best action to play, `None` is the board is done or the search depth was 0.
    pub best_move: Option<A>,
}

/// Evaluate the board using minimax with the given heuristic up to the given depth.
/// Return both the value and the best action. If multiple actions have the same value pick a random one using `rng`.
/// The returned value is from the POV of `board.turn()`.
///
/// The search walks `board` itself with `append`/`pop`, it is returned unchanged.
pub fn minimax<B: Board, H: Heuristic<B>>(
    board: &mut B,
    heuristic: &H,
    depth: u32,
    rng: &mut impl Rng,
) -> MinimaxResult<H::V, B::Action> {
    let result = negamax_recurse(
        heuristic,
        board,
        0,
        depth,
        None,
        None,
        RandomBestMoveSelector::new(rng),
    );

    if result.best_move.is_none() {
        assert!(board.is_done() || depth == 0, "Implementation error in negamax");
    }

    result
}

/// Evaluate the board using minimax with the given heuristic up to the given depth.
/// Only returns the value without selecting an action, and so doesn't require an `Rng`.
pub fn minimax_value<B: Board, H: Heuristic<B>>(board: &mut B, heuristic: &H, depth: u32) -> H::V {
    negamax_recurse(heuristic, board, 0, depth, None, None, NoMoveSelector).value
}

/// This is a trait so negamax_recurse is instantiated twice,
/// once for the top-level search with move selection and once for deeper nodes without any moves.
trait MoveSelector {
    fn accept(&mut self) -> bool;

    /// Called when a strictly better value is found, so only the current best moves are sampled.
    fn reset(&mut self);
}

/// Don't accept any move.
struct NoMoveSelector;

impl MoveSelector for NoMoveSelector {
    fn accept(&mut self) -> bool {
        false
    }

    fn reset(&mut self) {}
}

/// Accept each of the equally good moves with equal probability,
/// implemented using [reservoir sampling](https://en.wikipedia.org/wiki/Reservoir_sampling).
struct RandomBestMoveSelector<'a, R: Rng> {
    rng: &'a mut R,
    count: u32,
}

impl<'a, R: Rng> RandomBestMoveSelector<'a, R> {
    fn new(rng: &'a mut R) -> Self {
        RandomBestMoveSelector { rng, count: 0 }
    }
}

impl<R: Rng> MoveSelector for RandomBestMoveSelector<'_, R> {
    fn accept(&mut self) -> bool {
        self.count += 1;
        self.rng.gen_range(0..self.count) == 0
    }

    fn reset(&mut self) {
        self.count = 0;
    }
}

/// The core minimax implementation.
/// Alpha-Beta Negamax, implementation based on
/// <https://en.wikipedia.org/wiki/Negamax#Negamax_with_alpha_beta_pruning>
fn negamax_recurse<B: Board, H: Heuristic<B>>(
    heuristic: &H,
    board: &mut B,
    length: u32,
    depth_left: u32,
    alpha: Option<H::V>,
    beta: Option<H::V>,
    mut move_selector: impl MoveSelector,
) -> MinimaxResult<H::V, B::Action> {
    if depth_left == 0 || board.is_done() {
        return MinimaxResult {
            value: heuristic.value(board, length),
            best_move: None,
        };
    }

    let mut best_value: Option<H::V> = None;
    let mut best_move: Option<B::Action> = None;
    let mut alpha = alpha;

    let actions: Vec<B::Action> = board.legal_actions().collect();
    for action in actions {
        let child_value = {
            let mut child = board.append_scoped(action);
            -negamax_recurse(
                heuristic,
                &mut *child,
                length + 1,
                depth_left - 1,
                beta.map(Neg::neg),
                alpha.map(Neg::neg),
                NoMoveSelector,
            )
            .value
        };

        let (new_best_value, is_gte) = match best_value {
            None => (child_value, true),
            Some(best_value) => {
                let (merged, is_gte) = H::merge(best_value, child_value);
                // strictly better if the old value is not at least as good as the new one
                if is_gte && !H::merge(child_value, best_value).1 {
                    move_selector.reset();
                }
                (merged, is_gte)
            }
        };
        let new_alpha = alpha.map_or(new_best_value, |alpha| H::merge(alpha, new_best_value).0);

        best_value = Some(new_best_value);
        if is_gte && move_selector.accept() {
            best_move = Some(action);
        }
        alpha = Some(new_alpha);

        // only cut when strictly outside the window, so values equal to the bounds stay exact for the tie-break
        if beta.map_or(false, |beta| !H::merge(new_alpha, beta).1) {
            return MinimaxResult {
                value: new_best_value,
                best_move: None,
            };
        }
    }

    match best_value {
        Some(value) => MinimaxResult { value, best_move },
        None => unreachable!("Board is not done but has no legal actions:\n{:?}", board),
    }
}

pub struct MiniMaxBot<B: Board, H: Heuristic<B>, R: Rng> {
    depth: u32,
    heuristic: H,
    rng: R,
    ph: PhantomData<B>,
}

impl<B: Board, H: Heuristic<B> + Debug, R: Rng> Debug for MiniMaxBot<B, H, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "MiniMaxBot {{ depth: {}, heuristic: {:?} }}", self.depth, self.heuristic)
    }
}

impl<B: Board, H: Heuristic<B>, R: Rng> MiniMaxBot<B, H, R> {
    pub fn new(depth: u32, heuristic: H, rng: R) -> Self {
        assert!(depth > 0, "requires depth>0 to find the best move");
        MiniMaxBot {
            depth,
            heuristic,
            rng,
            ph: PhantomData,
        }
    }
}

impl<B: Board, H: Heuristic<B> + Debug, R: Rng> Bot<B> for MiniMaxBot<B, H, R> {
    fn select_move(&mut self, board: &mut B) -> B::Action {
        assert!(!board.is_done(), "MiniMaxBot cannot select a move on a done board:\n{:?}", board);

        let result = minimax(board, &self.heuristic, self.depth, &mut self.rng);
        tracing::trace!("Minimax selected {:?} with depth {}", result.best_move, self.depth);

        // depth > 0 and the board is not done, so minimax always finds a move
        match result.best_move {
            Some(action) => action,
            None => unreachable!("Minimax did not find a move for\n{:?}", board),
        }
    }
}
