#![warn(missing_debug_implementations)]
#![allow(clippy::new_without_default)]
#![allow(clippy::len_without_is_empty)]

//! A reversible [Board](crate::board::Board) abstraction for deterministic two player games.
//! Every board can be mutated with [append](crate::board::Board::append) and exactly restored with
//! [pop](crate::board::Board::pop), so search algorithms can walk a single board depth-first without cloning it.
//!
//! # Features
//!
//! Currently, the implemented games are:
//! * [Go/Baduk](https://en.wikipedia.org/wiki/Go_(game)) as [GoBoard](crate::games::go::GoBoard),
//!     built on a disjoint set with undo history that tracks groups and liberties incrementally.
//! * [Checkers](https://en.wikipedia.org/wiki/English_draughts) as [CheckersBoard](crate::games::checkers::CheckersBoard).
//! * [Connect4](https://en.wikipedia.org/wiki/Connect_Four) as [Connect4](crate::games::connect4::Connect4).
//! * [Tic Tac Toe](https://en.wikipedia.org/wiki/Tic-tac-toe) as [TTTBoard](crate::games::ttt::TTTBoard).
//!
//! There is also a utility board:
//! * [MaxMovesBoard](crate::games::max_length::MaxMovesBoard)
//!     wraps another board and sets the outcome to a draw after move limit has been reached.
//!
//! Utilities in this crate that work for any [Board](crate::board::Board):
//! * Game-playing algorithms, specifically:
//!     * [RandomBot](crate::ai::simple::RandomBot),
//!         which simply picks a random move.
//!     * [HeuristicBot](crate::ai::heuristic::HeuristicBot),
//!         which picks the action whose resulting board scores best under a linear heuristic.
//!     * [MiniMaxBot](crate::ai::minimax::MiniMaxBot),
//!         which picks the best move as evaluated by a customizable heuristic at a fixed depth. (implemented as alpha-beta negamax).
//! * Random board generation functions, see [board_gen](crate::util::board_gen).
//! * A bot vs bot game runner to compare playing strength, see [bot_game](crate::util::bot_game).
//! * Simple game statistics (perft, random game length) which can be used to test board implementations.
//!
//! # Examples
//!
//! ## List the available moves on a board and play a random one.
//!
//! ```
//! # use board_engine::games::ttt::TTTBoard;
//! # use board_engine::board::{BoardMoves, Board};
//! # use internal_iterator::InternalIterator;
//! # let mut rng = rand::thread_rng();
//! let mut board = TTTBoard::default();
//! println!("{}", board);
//!
//! board.legal_actions().for_each(|action| {
//!     println!("{:?}", action)
//! });
//!
//! let action = board.random_legal_action(&mut rng).unwrap();
//! println!("Picked action {:?}", action);
//! board.append(action);
//! println!("{}", board);
//!
//! assert_eq!(board.pop(), action);
//! assert_eq!(board, TTTBoard::default());
//! ```
//!
//! ## Get the best move according to minimax
//!
//! ```
//! # use board_engine::ai::heuristic::UtilityHeuristic;
//! # use board_engine::ai::minimax::MiniMaxBot;
//! # use board_engine::games::connect4::Connect4;
//! # use board_engine::ai::Bot;
//! # use rand::thread_rng;
//! let mut board = Connect4::default();
//! let mut bot = MiniMaxBot::new(4, UtilityHeuristic, thread_rng());
//! println!("{}", bot.select_move(&mut board));
//! ```

pub mod board;
pub mod wdl;

pub mod ai;

pub mod games;

pub mod config;

pub mod util;
