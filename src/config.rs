//! String-parsable configuration for games and bots, used by the arena binary.
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use crate::ai::heuristic::{Features, HeuristicBot, LinearHeuristic};
use crate::ai::minimax::MiniMaxBot;
use crate::ai::simple::RandomBot;
use crate::ai::Bot;
#[cfg(feature = "game_go")]
use crate::games::go::Rules;
use crate::util::tiny::{seeded_rng, BotRng};

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown game '{0}', expected one of ttt, connect4, checkers, go[:size]")]
    UnknownGame(String),
    #[error("invalid go board size '{0}'")]
    InvalidGoSize(String),
    #[error("unknown bot '{0}', expected one of random, heuristic, minimax:<depth>")]
    UnknownBot(String),
    #[error("invalid minimax depth '{0}', must be a positive integer")]
    InvalidDepth(String),
    #[error("unknown go rules '{0}', expected one of simple, tt, cgos")]
    UnknownRules(String),
}

/// The games that can be played.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GameKind {
    TicTacToe,
    Connect4,
    Checkers,
    Go { size: u8 },
}

/// The bots that can be built from a string.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BotSpec {
    Random,
    Heuristic,
    Minimax { depth: u32 },
}

impl FromStr for GameKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let (name, arg) = match lower.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (lower.as_str(), None),
        };

        let kind = match (name, arg) {
            ("ttt", None) => GameKind::TicTacToe,
            ("connect4", None) => GameKind::Connect4,
            ("checkers", None) => GameKind::Checkers,
            ("go", None) => GameKind::Go { size: 9 },
            ("go", Some(size)) => {
                let size: u8 = size.parse().map_err(|_| ConfigError::InvalidGoSize(size.to_owned()))?;
                if !(1..=19).contains(&size) {
                    return Err(ConfigError::InvalidGoSize(size.to_string()));
                }
                GameKind::Go { size }
            }
            _ => return Err(ConfigError::UnknownGame(s.to_owned())),
        };
        Ok(kind)
    }
}

impl Display for GameKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GameKind::TicTacToe => write!(f, "ttt"),
            GameKind::Connect4 => write!(f, "connect4"),
            GameKind::Checkers => write!(f, "checkers"),
            GameKind::Go { size } => write!(f, "go:{}", size),
        }
    }
}

impl FromStr for BotSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.split_once(':') {
            None if lower == "random" => Ok(BotSpec::Random),
            None if lower == "heuristic" => Ok(BotSpec::Heuristic),
            Some(("minimax", depth)) => match depth.parse::<u32>() {
                Ok(depth) if depth > 0 => Ok(BotSpec::Minimax { depth }),
                _ => Err(ConfigError::InvalidDepth(depth.to_owned())),
            },
            _ => Err(ConfigError::UnknownBot(s.to_owned())),
        }
    }
}

impl Display for BotSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BotSpec::Random => write!(f, "random"),
            BotSpec::Heuristic => write!(f, "heuristic"),
            BotSpec::Minimax { depth } => write!(f, "minimax:{}", depth),
        }
    }
}

#[cfg(feature = "game_go")]
pub fn parse_go_rules(s: &str) -> Result<Rules, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "simple" => Ok(Rules::simple_ko()),
        "tt" => Ok(Rules::tromp_taylor()),
        "cgos" => Ok(Rules::cgos()),
        _ => Err(ConfigError::UnknownRules(s.to_owned())),
    }
}

/// Material weights: every feature counts once, the trailing bias is ignored.
pub fn material_weights(feature_count: usize) -> Vec<f32> {
    let mut weights = vec![1.0; feature_count];
    if let Some(bias) = weights.last_mut() {
        *bias = 0.0;
    }
    weights
}

/// A bot built from a [BotSpec] for a specific board type.
pub enum ConfiguredBot<B: Features> {
    Random(RandomBot<BotRng>),
    Heuristic(HeuristicBot<BotRng>),
    Minimax(MiniMaxBot<B, LinearHeuristic, BotRng>),
}

impl BotSpec {
    /// Build the bot, using `start` to size the heuristic weights.
    pub fn build<B: Features>(self, start: &B, seed: u64) -> ConfiguredBot<B> {
        let rng = seeded_rng(seed);
        let weights = material_weights(start.features().len());

        match self {
            BotSpec::Random => ConfiguredBot::Random(RandomBot::new(rng)),
            BotSpec::Heuristic => ConfiguredBot::Heuristic(HeuristicBot::new(weights, rng)),
            BotSpec::Minimax { depth } => {
                ConfiguredBot::Minimax(MiniMaxBot::new(depth, LinearHeuristic::new(weights), rng))
            }
        }
    }
}

impl<B: Features> Bot<B> for ConfiguredBot<B> {
    fn select_move(&mut self, board: &mut B) -> B::Action {
        match self {
            ConfiguredBot::Random(bot) => bot.select_move(board),
            ConfiguredBot::Heuristic(bot) => bot.select_move(board),
            ConfiguredBot::Minimax(bot) => bot.select_move(board),
        }
    }
}

impl<B: Features> Debug for ConfiguredBot<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfiguredBot::Random(bot) => Debug::fmt(bot, f),
            ConfiguredBot::Heuristic(bot) => Debug::fmt(bot, f),
            ConfiguredBot::Minimax(bot) => Debug::fmt(bot, f),
        }
    }
}
