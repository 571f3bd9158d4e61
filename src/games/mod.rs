//! The game implementations.
#[cfg(feature = "game_checkers")]
pub mod checkers;
#[cfg(feature = "game_connect4")]
pub mod connect4;
#[cfg(feature = "game_go")]
pub mod go;
#[cfg(feature = "game_ttt")]
pub mod ttt;

pub mod max_length;
