use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use board_engine::ai::heuristic::Features;
use board_engine::config::{parse_go_rules, BotSpec, GameKind};
use board_engine::games::checkers::CheckersBoard;
use board_engine::games::connect4::Connect4;
use board_engine::games::go::GoBoard;
use board_engine::games::max_length::MaxMovesBoard;
use board_engine::games::ttt::TTTBoard;
use board_engine::util::bot_game::Game;

/// Play a match between two bots and print the win/draw/loss record of each.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// One of ttt, connect4, checkers, go or go:<size>.
    #[arg(long, default_value = "ttt")]
    game: GameKind,

    /// First bot: random, heuristic or minimax:<depth>.
    #[arg(long, default_value = "minimax:3")]
    left: BotSpec,

    /// Second bot: random, heuristic or minimax:<depth>.
    #[arg(long, default_value = "random")]
    right: BotSpec,

    /// Number of games, seats are swapped halfway through.
    #[arg(long, default_value_t = 20)]
    games: u32,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Go rules: simple, tt or cgos.
    #[arg(long, default_value = "simple")]
    rules: String,

    /// Go games are declared a draw after this many actions, defaults to four times the board area.
    #[arg(long)]
    max_moves: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    tracing::info!("Starting arena with {:?}", args);

    match args.game {
        GameKind::TicTacToe => play(TTTBoard::default(), &args),
        GameKind::Connect4 => play(Connect4::default(), &args),
        GameKind::Checkers => play(CheckersBoard::default(), &args),
        GameKind::Go { size } => {
            let rules = parse_go_rules(&args.rules).context("invalid --rules")?;
            let board = GoBoard::new(size, rules);
            let max_moves = args.max_moves.unwrap_or(4 * board.area() as usize);
            play(MaxMovesBoard::new(board, max_moves), &args)
        }
    }

    Ok(())
}

fn play<B: Features>(start: B, args: &Args) {
    let left = args.left.build(&start, args.seed);
    let right = args.right.build(&start, args.seed.wrapping_add(1));

    let mut game = Game::new(start, left, right);
    let result = game.compete(args.games);

    println!("{} vs {} on {}", args.left, args.right, args.game);
    println!("  left  ({}): {:?}", args.left, result.wdl_l);
    println!("  right ({}): {:?}", args.right, result.wdl_r);
}
