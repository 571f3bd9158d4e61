use internal_iterator::InternalIterator;
use rand::Rng;

use board_engine::board::{Board, BoardMoves, Outcome, Player};
use board_engine::games::go::{FlatTile, GoAction, GoBoard, Rules, Score, State, Tile};
use board_engine::util::board_gen::{board_with_moves, random_board_with_condition, random_board_with_outcome};
use board_engine::util::game_stats::perft;
use board_engine::util::tiny::consistent_rng;

use crate::board::board_test_main_without_uniform;

fn place(index: u16) -> GoAction {
    GoAction::Place(FlatTile::new(index))
}

fn place_xy(x: u8, y: u8) -> GoAction {
    GoAction::Place(Tile::new(x, y).to_flat(9))
}

/// Interleave placements by A and B on flat indices, starting with A.
fn interleave(a: &[u16], b: &[u16]) -> Vec<GoAction> {
    let mut result = vec![];
    for i in 0..a.len().max(b.len()) {
        if let Some(&index) = a.get(i) {
            result.push(place(index));
        }
        if let Some(&index) = b.get(i) {
            result.push(place(index));
        }
    }
    result
}

fn print_board_with_moves(start: GoBoard, actions: &[GoAction]) -> GoBoard {
    let mut board = start;
    println!("{}", board);

    for &action in actions {
        println!("Playing {}", action);
        board.append(action);
        println!("{}", board);
        board.chains().assert_valid();
    }

    board
}

fn go_board_test_main(board: &GoBoard) {
    board.chains().assert_valid();
    board_test_main_without_uniform(board);
}

#[test]
fn empty() {
    for size in [1, 2, 5, 9, 19] {
        let board = GoBoard::new(size, Rules::default());
        assert_eq!(board.legal_actions().count(), 1 + size as usize * size as usize);
        go_board_test_main(&board);
    }
}

#[test]
fn default_is_nine() {
    let board = GoBoard::default();
    assert_eq!(board.size(), 9);
    assert_eq!(board.area(), 81);
    assert_eq!(board.rules(), Rules::simple_ko());
    assert_eq!(board.state(), State::Normal);
}

#[test]
fn parse_action() {
    assert_eq!("pass".parse(), Ok(GoAction::Pass));
    assert_eq!("PASS".parse(), Ok(GoAction::Pass));
    assert_eq!("40".parse(), Ok(place(40)));
    assert!("x".parse::<GoAction>().is_err());

    assert_eq!(GoAction::Pass.to_string(), "PASS");
    assert_eq!(place(40).to_string(), "40");
}

fn check_capture(a: &[u16], b: &[u16], captured: &[u16]) {
    let actions = interleave(a, b);
    let board = print_board_with_moves(GoBoard::default(), &actions);

    for &index in captured {
        assert_eq!(board.chains().cell(FlatTile::new(index)), None, "{} should be captured", index);
        assert!(
            board.legal_actions().any(|a: GoAction| a == place(index)),
            "captured tile {} is not playable again",
            index
        );
    }

    let expected_a = (a.len() - captured.len()) as u16;
    assert_eq!(board.chains().stone_count_from(Player::A), expected_a);
    assert_eq!(board.chains().stone_count_from(Player::B), b.len() as u16);

    go_board_test_main(&board);
}

#[test]
fn capture_corner() {
    check_capture(&[0, 8, 17], &[1, 9], &[0]);
}

#[test]
fn capture_edge() {
    check_capture(&[4, 8, 17, 26], &[3, 5, 13], &[4]);
}

#[test]
fn capture_middle() {
    check_capture(&[22, 8, 17, 26, 35], &[21, 23, 13, 31], &[22]);
}

#[test]
fn capture_corner_double() {
    check_capture(&[0, 1, 8, 17], &[2, 9, 10], &[0, 1]);
}

#[test]
fn capture_edge_double() {
    check_capture(&[3, 4, 8, 17, 26], &[2, 5, 12, 13], &[3, 4]);
}

#[test]
fn capture_middle_double() {
    check_capture(&[22, 31, 8, 17, 26, 35, 44], &[21, 23, 13, 30, 32, 40], &[22, 31]);
}

#[test]
fn capture_frees_liberties() {
    let board = board_with_moves(GoBoard::default(), &interleave(&[0, 80], &[1, 9]));
    assert_eq!(board.chains().cell(FlatTile::new(0)), None);

    // both capturing stones gained the freed corner as a liberty
    for index in [1, 9] {
        let liberties = board.chains().liberties(FlatTile::new(index));
        assert!(liberties.contains(&0), "stone {} is missing liberty 0", index);
        assert_eq!(liberties.len(), 3);
    }
}

#[test]
fn replay_corner_after_capture() {
    // A plays back into the captured corner, a legal suicide under the default rules
    let mut board = board_with_moves(GoBoard::default(), &interleave(&[0, 80], &[1, 9]));
    let before = board.chains().clone();

    assert!(board.legal(place(0)));
    board.append(place(0));
    board.chains().assert_valid();

    assert_eq!(board.chains().cell(FlatTile::new(0)), None);
    assert_eq!(board.chains().zobrist(), before.zobrist());

    board.pop();
    assert_eq!(board.chains(), &before);
}

/// Play all moves except the last one, then check whether the last one is legal.
fn check_ko(a: &[u16], b: &[u16], last_illegal: bool) {
    for rules in [Rules::simple_ko(), Rules::tromp_taylor(), Rules::cgos()] {
        let actions = interleave(a, b);
        let (&last, prefix) = actions.split_last().unwrap();
        let board = print_board_with_moves(GoBoard::new(9, rules), prefix);

        println!("Checking {} with {:?}", last, rules);
        assert_eq!(board.legal(last), !last_illegal);
        assert_eq!(board.legal_actions().any(|a: GoAction| a == last), !last_illegal);

        if last_illegal {
            let mut other = board.clone();
            let result = std::panic::catch_unwind(move || other.append(last));
            assert!(result.is_err(), "appending an illegal ko recapture must panic");
        }

        go_board_test_main(&board);
    }
}

#[test]
fn ko_1_1() {
    check_ko(&[1, 9, 19, 11, 11], &[2, 12, 20, 10], true);
}

#[test]
fn ko_1_1_2() {
    check_ko(&[1, 9, 19, 11, 80, 11], &[2, 12, 20, 10, 79], false);
}

#[test]
fn ko_1_2() {
    check_ko(&[80, 2, 12, 20, 10], &[1, 9, 19, 11, 11], true);
}

#[test]
fn ko_2_1() {
    check_ko(&[9, 1, 11, 19, 19], &[18, 28, 20, 10], true);
}

#[test]
fn ko_2_1_2() {
    check_ko(&[9, 1, 11, 19, 80, 19], &[18, 28, 20, 10, 79], false);
}

#[test]
fn ko_2_2() {
    check_ko(&[80, 18, 28, 20, 10], &[9, 1, 11, 19, 19], true);
}

#[test]
fn single_stone_suicide() {
    // A surrounds the 5x5 corner, B considers playing into it
    let actions = [place(1), place(24), place(5)];
    let target = place(0);

    let simple = board_with_moves(GoBoard::new(5, Rules::simple_ko()), &actions);
    assert!(simple.legal(target));
    let after = simple.clone_and_append(target);
    assert_eq!(after.chains().cell(FlatTile::new(0)), None);
    assert_eq!(after.chains().zobrist(), simple.chains().zobrist());
    assert_ne!(after.zobrist(), simple.zobrist());

    // the stones would repeat the current position
    let tt = board_with_moves(GoBoard::new(5, Rules::tromp_taylor()), &actions);
    assert!(!tt.legal(target));

    let cgos = board_with_moves(GoBoard::new(5, Rules::cgos()), &actions);
    assert!(!cgos.legal(target));

    for board in [simple, tt, cgos] {
        go_board_test_main(&board);
    }
}

#[test]
fn suicide_after_pass() {
    // same corner as above, but A passes instead of B moving elsewhere
    let actions = [place(1), place(24), place(5), place(23), GoAction::Pass];
    let target = place(0);

    let simple = board_with_moves(GoBoard::new(5, Rules::simple_ko()), &actions);
    assert_eq!(simple.turn(), Player::B);
    assert!(simple.legal(target));
    assert!(simple.legal_actions().any(|a: GoAction| a == target));

    let after = simple.clone_and_append(target);
    assert_eq!(after.chains().cell(FlatTile::new(0)), None);
    assert_eq!(after.state(), State::Normal);
    go_board_test_main(&simple);

    // superko still sees the repeated position
    let tt = board_with_moves(GoBoard::new(5, Rules::tromp_taylor()), &actions);
    assert!(!tt.legal(target));
}

#[test]
fn multi_stone_suicide() {
    // B at 5 is in atari, playing 0 removes both B stones
    let actions = [place(10), place(5), place(6), place(24), place(1)];
    let target = place(0);

    let tt = board_with_moves(GoBoard::new(5, Rules::tromp_taylor()), &actions);
    assert!(tt.legal(target));
    let after = print_board_with_moves(tt.clone(), &[target]);
    assert_eq!(after.chains().cell(FlatTile::new(0)), None);
    assert_eq!(after.chains().cell(FlatTile::new(5)), None);
    assert_eq!(after.chains().stone_count_from(Player::B), 1);

    let cgos = board_with_moves(GoBoard::new(5, Rules::cgos()), &actions);
    assert!(!cgos.legal(target));

    go_board_test_main(&tt);
    go_board_test_main(&cgos);
}

#[test]
fn tiny_board() {
    let simple = GoBoard::new(1, Rules::simple_ko());
    assert!(simple.legal(place(0)));
    assert!(!simple.legal(place(1)));

    let tt = GoBoard::new(1, Rules::tromp_taylor());
    assert!(!tt.legal(place(0)));
    assert_eq!(tt.legal_actions().count(), 1);

    go_board_test_main(&simple);
    go_board_test_main(&tt);
}

#[test]
fn clear_corner() {
    let start = GoBoard::new(5, Rules::tromp_taylor());
    let actions = [(0, 0), (0, 1), (4, 4), (1, 0)].map(|(x, y)| GoAction::Place(Tile::new(x, y).to_flat(5)));

    let board = print_board_with_moves(start, &actions);
    assert_eq!(board.stone_at(Tile::new(0, 0)), None);

    go_board_test_main(&board);
}

#[test]
fn double_pass() {
    let board = print_board_with_moves(GoBoard::new(5, Rules::default()), &[GoAction::Pass, GoAction::Pass]);
    assert_eq!(board.winner(), Some(Outcome::Draw));
    assert_eq!(board.score(), Score { a: 0, b: 0 });

    go_board_test_main(&board);
}

#[test]
fn pass_state() {
    let mut board = GoBoard::default();
    board.append(GoAction::Pass);
    assert_eq!(board.state(), State::Passed);

    board.append(place(40));
    assert_eq!(board.state(), State::Normal);

    board.append(GoAction::Pass);
    assert_eq!(board.state(), State::Passed);
    let passed_zobrist = board.zobrist();

    board.append(GoAction::Pass);
    assert!(board.is_done());

    assert_eq!(board.pop(), GoAction::Pass);
    assert_eq!(board.state(), State::Passed);
    assert_eq!(board.zobrist(), passed_zobrist);
    assert!(!board.is_done());
}

#[test]
fn scoring() {
    let mut a = vec![];
    let mut b = vec![];
    for y in 0..9 {
        a.push(place_xy(3, y));
        a.push(place_xy(4, y));
        b.push(place_xy(5, y));
        b.push(place_xy(6, y));
    }

    let mut actions = vec![];
    for (&a, &b) in a.iter().zip(&b) {
        actions.push(a);
        actions.push(b);
    }
    actions.push(GoAction::Pass);
    actions.push(GoAction::Pass);

    let board = print_board_with_moves(GoBoard::default(), &actions);

    assert_eq!(board.score(), Score { a: 45, b: 36 });
    assert_eq!(board.state(), State::Done(Outcome::WonBy(Player::A)));
    assert_eq!(board.winner(), Some(Outcome::WonBy(Player::A)));

    go_board_test_main(&board);
}

#[test]
fn clear() {
    let mut board = board_with_moves(GoBoard::new(7, Rules::cgos()), &interleave(&[0, 10], &[1, 20]));
    board.clear();
    assert_eq!(board, GoBoard::new(7, Rules::cgos()));
}

#[test]
#[should_panic]
fn occupied() {
    let mut board = board_with_moves(GoBoard::default(), &[place(40)]);
    board.append(place(40));
}

#[test]
#[should_panic]
fn off_board() {
    let mut board = GoBoard::new(5, Rules::default());
    board.append(place(25));
}

/// Random self-play that only passes when no placement is legal,
/// checking the groups against a flood fill after every append and every pop.
#[test]
fn random_games_keep_chains_valid() {
    let mut rng = consistent_rng();
    let start = GoBoard::default();

    for _ in 0..200 {
        let mut board = start.clone();
        let mut snapshots = vec![];

        while board.len() < 100 && !board.is_done() {
            let places: Vec<GoAction> = board.legal_actions().filter(|&a| a != GoAction::Pass).collect();
            let action = if places.is_empty() {
                GoAction::Pass
            } else {
                places[rng.gen_range(0..places.len())]
            };

            snapshots.push(board.clone());
            board.append(action);
            board.chains().assert_valid();
        }
        assert!(board.len() >= 80, "game too short:\n{:?}", board);

        while let Some(snapshot) = snapshots.pop() {
            board.pop();
            board.chains().assert_valid();
            assert_eq!(board, snapshot);
            assert_eq!(board.zobrist(), snapshot.zobrist());
        }
        assert_eq!(board, start);
    }
}

#[test]
fn random_finished_games() {
    let mut rng = consistent_rng();
    let start = GoBoard::new(5, Rules::default());

    for outcome in [Outcome::WonBy(Player::A), Outcome::WonBy(Player::B)] {
        let board = random_board_with_outcome(&start, outcome, &mut rng);
        assert_eq!(board.state(), State::Done(outcome));
        assert_eq!(board.score().outcome(), outcome);
        go_board_test_main(&board);
    }

    let passed = random_board_with_condition(&start, &mut rng, |b| b.state() == State::Passed);
    assert_eq!(passed.last_action(), Some(GoAction::Pass));
    assert!(passed.legal(GoAction::Pass));
    go_board_test_main(&passed);
}

#[test]
fn random_boards() {
    let mut rng = consistent_rng();
    for size in [3, 5, 9] {
        for rules in [Rules::simple_ko(), Rules::tromp_taylor(), Rules::cgos()] {
            for _ in 0..5 {
                let mut board = GoBoard::new(size, rules);
                for _ in 0..rng.gen_range(0..2 * board.area()) {
                    match board.random_legal_action(&mut rng) {
                        Some(action) => board.append(action),
                        None => break,
                    }
                }
                go_board_test_main(&board);
            }
        }
    }
}

fn go_perft_main(board: GoBoard, all_expected: &[u64]) {
    println!("Running perft with {:?} for:", board.rules());
    println!("{}", board);

    let mut board = board;
    for (depth, &expected) in all_expected.iter().enumerate() {
        let value = perft(&mut board, depth as u32);
        println!("Perft depth {}: expected {} got {}", depth, expected, value);
        assert_eq!(value, expected);
    }
}

#[test]
fn go_perft_fast() {
    go_perft_main(GoBoard::new(5, Rules::tromp_taylor()), &[1, 26, 651, 15650, 361041]);
    go_perft_main(GoBoard::new(5, Rules::cgos()), &[1, 26, 651, 15650, 361041]);
}

#[test]
fn perft_leaves_board_unchanged() {
    let mut board = board_with_moves(GoBoard::new(5, Rules::default()), &interleave(&[0, 6], &[1, 12]));
    let before = board.clone();
    perft(&mut board, 3);
    assert_eq!(board, before);
}
