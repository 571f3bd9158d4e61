//! Checkers on the 32 dark squares of an 8x8 board.
//!
//! Squares are numbered row by row from the top, four per row:
//! ```text
//!    0   1   2   3
//!  4   5   6   7
//!    8   9  10  11
//! 12  13  14  15
//!   16  17  18  19
//! 20  21  22  23
//!   24  25  26  27
//! 28  29  30  31
//! ```
//! [Player::A] starts on `20..32` and moves up towards square `0`, [Player::B] starts on `0..12` and moves down.
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::ControlFlow;

use internal_iterator::InternalIterator;
use itertools::Itertools;
use lazy_static::lazy_static;

use crate::ai::heuristic::Features;
use crate::board::{illegal_action, AllActionsIterator, Board, BoardMoves, LegalActionsIterator, Outcome, Player};
use crate::util::zobrist::{zobrist_table, Zobrist};

pub const SQUARES: u8 = 32;

/// The game is drawn after this many consecutive plies without a capture or a man move.
pub const QUIET_PLY_LIMIT: u8 = 80;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Piece {
    pub player: Player,
    pub king: bool,
}

/// A slide or a complete jump chain. `captured` is a bitmask over the squares that are jumped over.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CheckersAction {
    pub from: u8,
    pub to: u8,
    pub captured: u32,
}

#[derive(Debug, Clone, Eq, PartialEq)]
struct Record {
    action: CheckersAction,
    promoted: bool,
    /// Subset of `action.captured` that held kings.
    captured_kings: u32,
    quiet_before: u8,
}

#[derive(Clone, Eq, PartialEq)]
pub struct CheckersBoard {
    squares: [Option<Piece>; SQUARES as usize],
    history: Vec<Record>,
    quiet_plies: u8,
    outcome: Option<Outcome>,
    zobrist: Zobrist,
}

lazy_static! {
    static ref ZOBRIST_PIECES: Vec<Zobrist> = zobrist_table(0xCE, 4 * SQUARES as usize);
}

impl Piece {
    fn zobrist(self, square: u8) -> Zobrist {
        let kind = self.player.index() as usize * 2 + self.king as usize;
        ZOBRIST_PIECES[kind * SQUARES as usize + square as usize]
    }

    fn to_char(self) -> char {
        match (self.player, self.king) {
            (Player::A, false) => 'x',
            (Player::B, false) => 'o',
            (Player::A, true) => 'X',
            (Player::B, true) => 'O',
        }
    }
}

fn row_col(square: u8) -> (i8, i8) {
    let row = (square / 4) as i8;
    let col = 2 * (square % 4) as i8 + if row % 2 == 0 { 1 } else { 0 };
    (row, col)
}

/// The square diagonally adjacent to `square` in direction `(dr, dc)`, if it is on the board.
fn step(square: u8, dr: i8, dc: i8) -> Option<u8> {
    let (row, col) = row_col(square);
    let (row, col) = (row + dr, col + dc);
    if (0..8).contains(&row) && (0..8).contains(&col) {
        Some((row * 4 + col / 2) as u8)
    } else {
        None
    }
}

fn forward(player: Player) -> i8 {
    match player {
        Player::A => -1,
        Player::B => 1,
    }
}

fn is_promotion_row(player: Player, square: u8) -> bool {
    match player {
        Player::A => square < 4,
        Player::B => square >= SQUARES - 4,
    }
}

fn directions(piece: Piece) -> impl Iterator<Item = (i8, i8)> {
    let f = forward(piece.player);
    let all = [(f, -1), (f, 1), (-f, -1), (-f, 1)];
    let count = if piece.king { 4 } else { 2 };
    all.into_iter().take(count)
}

fn squares_in(mask: u32) -> impl Iterator<Item = u8> {
    (0..SQUARES).filter(move |&s| mask & (1u32 << s) != 0)
}

impl Default for CheckersBoard {
    fn default() -> Self {
        let mut board = CheckersBoard {
            squares: [None; SQUARES as usize],
            history: vec![],
            quiet_plies: 0,
            outcome: None,
            zobrist: Zobrist::default(),
        };

        let starts = [(Player::B, 0..12), (Player::A, 20..32)];
        for (player, range) in starts {
            for square in range {
                board.put(square, Piece { player, king: false });
            }
        }

        board
    }
}

impl CheckersBoard {
    pub fn piece(&self, square: u8) -> Option<Piece> {
        self.squares[square as usize]
    }

    pub fn quiet_plies(&self) -> u8 {
        self.quiet_plies
    }

    /// Build a board with only the given pieces, used to set up positions directly.
    /// The history starts empty, so [Player::A] is to move.
    pub fn from_pieces(pieces: &[(u8, Piece)]) -> Self {
        let mut board = CheckersBoard {
            squares: [None; SQUARES as usize],
            history: vec![],
            quiet_plies: 0,
            outcome: None,
            zobrist: Zobrist::default(),
        };
        for &(square, piece) in pieces {
            assert!(board.squares[square as usize].is_none(), "Square {} used twice", square);
            board.put(square, piece);
        }
        board.outcome = board.compute_outcome();
        board
    }

    fn put(&mut self, square: u8, piece: Piece) {
        debug_assert!(self.squares[square as usize].is_none());
        self.squares[square as usize] = Some(piece);
        self.zobrist ^= piece.zobrist(square);
    }

    fn take(&mut self, square: u8) -> Piece {
        match self.squares[square as usize].take() {
            Some(piece) => {
                self.zobrist ^= piece.zobrist(square);
                piece
            }
            None => panic!("No piece to remove on square {}:\n{:?}", square, self),
        }
    }

    /// All legal actions for the player to move, ignoring whether the game is already done.
    /// Captures are mandatory, so if any jump chain exists only jump chains are returned.
    fn generate_actions(&self) -> Vec<CheckersAction> {
        let player = self.turn();
        let mut jumps = vec![];

        for from in 0..SQUARES {
            if let Some(piece) = self.piece(from) {
                if piece.player == player {
                    self.collect_jumps(piece, from, from, 0, &mut jumps);
                }
            }
        }

        if !jumps.is_empty() {
            return jumps.into_iter().unique().collect();
        }

        let mut slides = vec![];
        for from in 0..SQUARES {
            if let Some(piece) = self.piece(from) {
                if piece.player == player {
                    for (dr, dc) in directions(piece) {
                        if let Some(to) = step(from, dr, dc) {
                            if self.piece(to).is_none() {
                                slides.push(CheckersAction { from, to, captured: 0 });
                            }
                        }
                    }
                }
            }
        }
        slides
    }

    /// Depth-first search over jump chains starting at `origin`, currently at `at` having captured `captured`.
    /// Only chains that cannot be continued are pushed.
    fn collect_jumps(&self, piece: Piece, origin: u8, at: u8, captured: u32, result: &mut Vec<CheckersAction>) {
        let mut extended = false;

        for (dr, dc) in directions(piece) {
            let (over, to) = match step(at, dr, dc).and_then(|over| Some((over, step(over, dr, dc)?))) {
                Some(pair) => pair,
                None => continue,
            };

            let is_enemy = matches!(self.piece(over), Some(p) if p.player != piece.player);
            let already_captured = captured & (1u32 << over) != 0;
            // the origin square is vacated while the chain is played
            let is_free = to == origin || self.piece(to).is_none();

            if is_enemy && !already_captured && is_free {
                extended = true;
                let captured = captured | (1u32 << over);

                if !piece.king && is_promotion_row(piece.player, to) {
                    // promotion ends the chain
                    result.push(CheckersAction { from: origin, to, captured });
                } else {
                    self.collect_jumps(piece, origin, to, captured, result);
                }
            }
        }

        if !extended && captured != 0 {
            result.push(CheckersAction {
                from: origin,
                to: at,
                captured,
            });
        }
    }

    fn compute_outcome(&self) -> Option<Outcome> {
        if self.quiet_plies >= QUIET_PLY_LIMIT {
            Some(Outcome::Draw)
        } else if self.generate_actions().is_empty() {
            Some(Outcome::WonBy(self.turn().other()))
        } else {
            None
        }
    }
}

impl Board for CheckersBoard {
    type Action = CheckersAction;

    fn len(&self) -> usize {
        self.history.len()
    }

    fn legal(&self, action: CheckersAction) -> bool {
        !self.is_done() && self.generate_actions().contains(&action)
    }

    fn append(&mut self, action: CheckersAction) {
        if !self.legal(action) {
            illegal_action(self, action);
        }

        let piece = self.take(action.from);
        let mut captured_kings = 0u32;
        for square in squares_in(action.captured) {
            if self.take(square).king {
                captured_kings |= 1u32 << square;
            }
        }

        let promoted = !piece.king && is_promotion_row(piece.player, action.to);
        self.put(
            action.to,
            Piece {
                player: piece.player,
                king: piece.king || promoted,
            },
        );

        let quiet_before = self.quiet_plies;
        self.quiet_plies = if action.captured != 0 || !piece.king {
            0
        } else {
            self.quiet_plies + 1
        };

        self.history.push(Record {
            action,
            promoted,
            captured_kings,
            quiet_before,
        });
        self.outcome = self.compute_outcome();
    }

    fn pop(&mut self) -> CheckersAction {
        let record = match self.history.pop() {
            Some(record) => record,
            None => panic!("Cannot pop from a board without history:\n{:?}", self),
        };
        let action = record.action;

        let moved = self.take(action.to);
        self.put(
            action.from,
            Piece {
                player: moved.player,
                king: moved.king && !record.promoted,
            },
        );

        let enemy = moved.player.other();
        for square in squares_in(action.captured) {
            let king = record.captured_kings & (1u32 << square) != 0;
            self.put(square, Piece { player: enemy, king });
        }

        self.quiet_plies = record.quiet_before;
        self.outcome = None;

        action
    }

    fn last_action(&self) -> Option<CheckersAction> {
        self.history.last().map(|r| r.action)
    }

    fn winner(&self) -> Option<Outcome> {
        self.outcome
    }

    fn zobrist(&self) -> Zobrist {
        self.zobrist
    }

    fn clear(&mut self) {
        *self = CheckersBoard::default();
    }
}

impl Features for CheckersBoard {
    fn features(&self) -> Vec<f32> {
        let mut result = self
            .squares
            .iter()
            .map(|square| match square {
                None => 0.0,
                Some(piece) => {
                    let value = if piece.king { 2.0 } else { 1.0 };
                    value * piece.player.sign::<f32>(Player::A)
                }
            })
            .collect::<Vec<_>>();
        result.push(1.0);
        result
    }
}

impl<'a> BoardMoves<'a, CheckersBoard> for CheckersBoard {
    type AllActionsIterator = AllActionsIterator<CheckersBoard>;
    type LegalActionsIterator = LegalActionsIterator<'a, CheckersBoard>;

    fn all_possible_actions() -> Self::AllActionsIterator {
        AllActionsIterator::default()
    }

    fn legal_actions(&'a self) -> Self::LegalActionsIterator {
        LegalActionsIterator(self)
    }
}

/// Only the slides and single jumps, multi-jump chains are too numerous to enumerate up front.
/// Legal chains outside of this set are still generated by `legal_actions` and accepted by `legal`.
impl InternalIterator for AllActionsIterator<CheckersBoard> {
    type Item = CheckersAction;

    fn try_for_each<R, F>(self, mut f: F) -> ControlFlow<R>
    where
        F: FnMut(Self::Item) -> ControlFlow<R>,
    {
        for from in 0..SQUARES {
            for (dr, dc) in [(-1, -1), (-1, 1), (1, -1), (1, 1)] {
                if let Some(over) = step(from, dr, dc) {
                    f(CheckersAction { from, to: over, captured: 0 })?;
                    if let Some(to) = step(over, dr, dc) {
                        f(CheckersAction {
                            from,
                            to,
                            captured: 1 << over,
                        })?;
                    }
                }
            }
        }
        ControlFlow::Continue(())
    }
}

impl InternalIterator for LegalActionsIterator<'_, CheckersBoard> {
    type Item = CheckersAction;

    fn try_for_each<R, F>(self, f: F) -> ControlFlow<R>
    where
        F: FnMut(Self::Item) -> ControlFlow<R>,
    {
        let board = self.board();
        if board.is_done() {
            return ControlFlow::Continue(());
        }
        board.generate_actions().into_iter().try_for_each(f)
    }
}

impl Hash for CheckersBoard {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.zobrist.hash(state);
    }
}

impl Display for CheckersAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sep = if self.captured == 0 { '-' } else { 'x' };
        write!(f, "{}{}{}", self.from, sep, self.to)
    }
}

impl Debug for CheckersBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CheckersBoard(next={:?}, history_len={}, quiet_plies={}, outcome={:?})\n{}",
            self.turn(),
            self.history.len(),
            self.quiet_plies,
            self.outcome,
            self
        )
    }
}

impl Display for CheckersBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in 0..8u8 {
            if row % 2 == 0 {
                write!(f, " ")?;
            }
            for square in row * 4..row * 4 + 4 {
                let c = self.piece(square).map_or('.', Piece::to_char);
                write!(f, "{} ", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
