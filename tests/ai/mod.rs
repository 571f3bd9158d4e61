use internal_iterator::InternalIterator;

use board_engine::ai::heuristic::{Features, HeuristicBot, LinearHeuristic, UtilityHeuristic};
use board_engine::ai::minimax::{minimax, minimax_value, MiniMaxBot};
use board_engine::ai::simple::RandomBot;
use board_engine::ai::Bot;
use board_engine::board::{Board, BoardMoves, Player};
use board_engine::config::{material_weights, BotSpec};
use board_engine::games::connect4::Connect4;
use board_engine::games::ttt::{Coord, TTTBoard};
use board_engine::util::board_gen::{board_with_moves, random_board_with_moves};
use board_engine::util::bot_game::Game;
use board_engine::util::game_stats::average_game_stats;
use board_engine::util::tiny::consistent_rng;

fn ttt(moves: &[usize]) -> TTTBoard {
    let actions: Vec<Coord> = moves.iter().map(|&i| Coord::from_i(i)).collect();
    board_with_moves(TTTBoard::default(), &actions)
}

#[test]
fn random_bot_is_legal() {
    let mut rng = consistent_rng();
    let mut bot = RandomBot::new(consistent_rng());

    for _ in 0..100 {
        let mut board = random_board_with_moves(&Connect4::default(), 10, &mut rng);
        if board.is_done() {
            continue;
        }
        let before = board.clone();
        let action = bot.select_move(&mut board);
        assert!(board.legal(action));
        assert_eq!(board, before);
    }
}

#[test]
fn minimax_takes_win() {
    let mut board = ttt(&[0, 3, 1, 4]);
    let before = board.clone();

    let result = minimax(&mut board, &UtilityHeuristic, 1, &mut consistent_rng());
    assert_eq!(result.value, 1);
    assert_eq!(result.best_move, Some(Coord::from_i(2)));
    assert_eq!(board, before);
}

#[test]
fn minimax_blocks_loss() {
    let mut board = ttt(&[0, 4, 1]);
    assert_eq!(board.turn(), Player::B);

    let result = minimax(&mut board, &UtilityHeuristic, 2, &mut consistent_rng());
    assert_eq!(result.value, 0);
    assert_eq!(result.best_move, Some(Coord::from_i(2)));
}

#[test]
fn minimax_depth_zero() {
    let mut board = ttt(&[4]);
    let result = minimax(&mut board, &UtilityHeuristic, 0, &mut consistent_rng());
    assert_eq!(result.value, 0);
    assert_eq!(result.best_move, None);
}

#[test]
fn minimax_on_done_board() {
    let mut board = ttt(&[0, 3, 1, 4, 2]);
    // the value is from the POV of B, who has lost
    assert_eq!(minimax_value(&mut board, &UtilityHeuristic, 3), -1);
}

#[test]
fn ttt_is_draw() {
    let mut board = TTTBoard::default();
    assert_eq!(minimax_value(&mut board, &UtilityHeuristic, 9), 0);
    assert_eq!(board, TTTBoard::default());
}

#[test]
fn minimax_value_matches_search() {
    let mut rng = consistent_rng();
    for _ in 0..20 {
        let mut board = random_board_with_moves(&TTTBoard::default(), 3, &mut rng);
        let value = minimax_value(&mut board, &UtilityHeuristic, 4);
        let result = minimax(&mut board, &UtilityHeuristic, 4, &mut rng);
        assert_eq!(value, result.value);
    }
}

#[test]
fn minimax_bot_never_loses_ttt() {
    let bot_l = MiniMaxBot::new(9, UtilityHeuristic, consistent_rng());
    let bot_r = RandomBot::new(consistent_rng());
    let mut game = Game::new(TTTBoard::default(), bot_l, bot_r);

    let result = game.compete(10);
    assert_eq!(result.wdl_l.loss, 0);
    assert_eq!(result.wdl_l.win, result.wdl_r.loss);
}

#[test]
fn heuristic_bot_takes_win() {
    let mut board = board_with_moves(Connect4::default(), &[1, 1, 2, 2, 3, 3]);
    let weights = material_weights(board.features().len());
    let mut bot = HeuristicBot::new(weights, consistent_rng());

    let before = board.clone();
    let action = bot.select_move(&mut board);
    assert!(action == 0 || action == 4, "expected a winning move, got {}", action);
    assert_eq!(board, before);
}

#[test]
fn linear_heuristic_material() {
    let board = ttt(&[0, 4, 8]);
    let heuristic = LinearHeuristic::new(material_weights(10));
    assert_eq!(heuristic.evaluate(&board, 0), 1.0);

    let won = ttt(&[0, 3, 1, 4, 2]);
    assert_eq!(heuristic.evaluate(&won, 2), 998.0);
}

#[test]
#[should_panic]
fn weight_count_mismatch() {
    let heuristic = LinearHeuristic::new(vec![1.0; 3]);
    heuristic.evaluate(&TTTBoard::default(), 0);
}

#[test]
fn compete_records_mirror() {
    let mut game = Game::new(
        Connect4::default(),
        RandomBot::new(consistent_rng()),
        BotSpec::Heuristic.build(&Connect4::default(), 1),
    );

    let result = game.compete(8);
    assert_eq!(result.wdl_l.sum(), 8);
    assert_eq!(result.wdl_r.sum(), 8);
    assert_eq!(result.wdl_l.win, result.wdl_r.loss);
    assert_eq!(result.wdl_l.draw, result.wdl_r.draw);

    assert_eq!(game.player_l(), Player::A);
    assert_eq!(game.board(), &Connect4::default());
}

#[test]
fn configured_bots_play_legal() {
    let start = TTTBoard::default();
    for spec in ["random", "heuristic", "minimax:2"] {
        let mut bot = spec.parse::<BotSpec>().unwrap().build(&start, 0);
        let mut board = start.clone();
        while !board.is_done() {
            let action = bot.select_move(&mut board);
            assert!(board.legal_actions().any(|a| a == action));
            board.append(action);
        }
    }
}

#[test]
fn random_game_stats() {
    let stats = average_game_stats(&TTTBoard::default(), RandomBot::new(consistent_rng()), 200);
    println!("{:?}", stats);
    assert!((5.0..=9.0).contains(&stats.game_length));
    assert!(stats.legal_actions > 1.0 && stats.legal_actions <= 9.0);
}
