//! Utilities to run bots against each other and report the results.
use std::fmt::{Debug, Formatter};

use crate::ai::Bot;
use crate::board::{Board, Outcome, Player};
use crate::wdl::{Flip, POV, WDL};

/// A board together with the two bots playing on it.
/// `bot_l` starts out playing as [Player::A], [Game::swap] switches the seats.
pub struct Game<B: Board, L: Bot<B>, R: Bot<B>> {
    board: B,
    bot_l: L,
    bot_r: R,
    player_l: Player,
}

/// Result of [Game::compete], one record per bot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CompeteResult {
    pub wdl_l: WDL<u32>,
    pub wdl_r: WDL<u32>,
}

impl<B: Board, L: Bot<B>, R: Bot<B>> Game<B, L, R> {
    pub fn new(board: B, bot_l: L, bot_r: R) -> Self {
        Game {
            board,
            bot_l,
            bot_r,
            player_l: Player::A,
        }
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    /// The player `bot_l` is currently playing as.
    pub fn player_l(&self) -> Player {
        self.player_l
    }

    /// Ask the bot whose turn it is for an action and play it.
    /// Panics if the game is done or if the bot returns an illegal action.
    pub fn step(&mut self) -> B::Action {
        assert!(!self.board.is_done(), "Cannot step a finished game:\n{:?}", self.board);

        let player = self.board.turn();
        let action = if player == self.player_l {
            self.bot_l.select_move(&mut self.board)
        } else {
            self.bot_r.select_move(&mut self.board)
        };

        if !self.board.legal(action) {
            let bot: &dyn Debug = if player == self.player_l { &self.bot_l } else { &self.bot_r };
            panic!(
                "Bot {:?} playing {:?} selected illegal action {:?} on\n{:?}",
                bot, player, action, self.board
            );
        }

        tracing::debug!("{:?} plays {} at ply {}", player, action, self.board.len());
        self.board.append(action);
        action
    }

    /// Step until the game is done and return the outcome.
    pub fn run(&mut self) -> Outcome {
        loop {
            if let Some(outcome) = self.board.winner() {
                tracing::info!("Game finished after {} actions: {:?}", self.board.len(), outcome);
                return outcome;
            }
            self.step();
        }
    }

    /// Reset the board to its initial state.
    pub fn clear(&mut self) {
        self.board.clear();
    }

    /// Swap which player each bot controls.
    pub fn swap(&mut self) {
        self.player_l = self.player_l.other();
    }

    /// Play `games` games from the initial board, swapping seats halfway through.
    /// The seats are restored afterwards.
    pub fn compete(&mut self, games: u32) -> CompeteResult {
        let mut wdl_l = WDL::<u32>::default();
        let start_player_l = self.player_l;

        for game in 0..games {
            if game == games / 2 {
                self.swap();
            }

            self.clear();
            let outcome = self.run();
            wdl_l += outcome.pov(self.player_l).to_wdl();
        }

        self.player_l = start_player_l;
        self.clear();

        let result = CompeteResult {
            wdl_l,
            wdl_r: wdl_l.flip(),
        };
        tracing::info!(
            "Match of {} games: {:?} {:?} vs {:?} {:?}",
            games,
            self.bot_l,
            result.wdl_l,
            self.bot_r,
            result.wdl_r
        );
        result
    }
}

impl<B: Board, L: Bot<B>, R: Bot<B>> Debug for Game<B, L, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("bot_l", &self.bot_l)
            .field("bot_r", &self.bot_r)
            .field("player_l", &self.player_l)
            .field("board", &self.board)
            .finish()
    }
}
