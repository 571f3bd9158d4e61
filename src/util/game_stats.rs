//! Utilities for collecting game statistics and testing game and bot implementations.
use internal_iterator::InternalIterator;

use crate::ai::Bot;
use crate::board::Board;

/// The number of legal positions reachable after `depth` actions, including duplicates.
/// See <https://www.chessprogramming.org/Perft>.
///
/// Walks the tree on `board` itself with `append`/`pop`, the board is returned unchanged.
pub fn perft<B: Board>(board: &mut B, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    if board.is_done() {
        return 0;
    }
    if depth == 1 {
        return board.legal_actions().count() as u64;
    }

    let actions: Vec<B::Action> = board.legal_actions().collect();
    actions
        .into_iter()
        .map(|action| perft(&mut *board.append_scoped(action), depth - 1))
        .sum()
}

/// Structure returned by [`average_game_stats`].
#[derive(Debug)]
pub struct GameStats {
    pub game_length: f32,
    pub legal_actions: f32,
}

/// Return `GameStats` estimated from `n` games starting from `start` played by `bot`.
pub fn average_game_stats<B: Board>(start: &B, mut bot: impl Bot<B>, n: u64) -> GameStats {
    let mut total_actions = 0;
    let mut total_positions = 0;

    for _ in 0..n {
        let mut board = start.clone();
        while !board.is_done() {
            total_actions += board.legal_actions().count();
            total_positions += 1;

            let action = bot.select_move(&mut board);
            board.append(action);
        }
    }

    GameStats {
        game_length: total_positions as f32 / n as f32,
        legal_actions: total_actions as f32 / total_positions as f32,
    }
}
