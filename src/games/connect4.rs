use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::Range;

use internal_iterator::{Internal, IteratorExt};
use lazy_static::lazy_static;

use crate::ai::heuristic::Features;
use crate::board::{illegal_action, Board, BoardMoves, BruteforceMoveIterator, Outcome, Player};
use crate::util::zobrist::{zobrist_table, Zobrist};

/// The Connect4 game on a 7x6 board.
///
/// The bitboard implementation is based on http://blog.gamesolver.org/solving-connect-four/06-bitboard/.
/// Each column takes 8 bits, the two unused rows on top keep the line checks from wrapping around.
#[derive(Clone, Eq, PartialEq)]
pub struct Connect4 {
    tiles_next: u64,
    tiles_occupied: u64,
    history: Vec<u8>,
    outcome: Option<Outcome>,
    zobrist: Zobrist,
}

lazy_static! {
    static ref ZOBRIST_TILES: Vec<Zobrist> = zobrist_table(0xC4, 2 * 64);
}

impl Connect4 {
    pub const WIDTH: u8 = 7;
    pub const HEIGHT: u8 = 6;
    pub const TILES: u8 = Self::WIDTH * Self::HEIGHT;

    pub fn tile(&self, col: u8, row: u8) -> Option<Player> {
        if !get(self.tiles_occupied, col, row) {
            return None;
        }
        let next = self.turn();
        if get(self.tiles_next, col, row) {
            Some(next)
        } else {
            Some(next.other())
        }
    }

    fn has_line(tiles: u64) -> bool {
        [1, 9, 8, 7].iter().any(|&half| {
            let m0 = tiles & (tiles << half);
            let m1 = m0 & (m0 << (half * 2));
            m1 != 0
        })
    }
}

#[allow(clippy::derivable_impls)]
impl Default for Connect4 {
    fn default() -> Self {
        Connect4 {
            tiles_next: 0,
            tiles_occupied: 0,
            history: vec![],
            outcome: None,
            zobrist: Zobrist::default(),
        }
    }
}

impl Board for Connect4 {
    type Action = u8;

    fn len(&self) -> usize {
        self.history.len()
    }

    fn legal(&self, action: u8) -> bool {
        !self.is_done() && action < Self::WIDTH && self.tiles_occupied & mask(action, Self::HEIGHT - 1) == 0
    }

    fn append(&mut self, action: u8) {
        if !self.legal(action) {
            illegal_action(self, action);
        }
        let curr_player = self.turn();

        let before = self.tiles_occupied;
        self.tiles_next ^= self.tiles_occupied;
        self.tiles_occupied |= self.tiles_occupied + mask(action, 0);
        let placed = self.tiles_occupied ^ before;

        self.zobrist ^= ZOBRIST_TILES[curr_player.index() as usize * 64 + placed.trailing_zeros() as usize];
        self.history.push(action);

        let tiles_curr = self.tiles_next ^ self.tiles_occupied;
        if Self::has_line(tiles_curr) {
            self.outcome = Some(Outcome::WonBy(curr_player));
        } else if self.tiles_occupied.count_ones() == Self::TILES as u32 {
            self.outcome = Some(Outcome::Draw)
        }
    }

    fn pop(&mut self) -> u8 {
        let action = match self.history.pop() {
            Some(action) => action,
            None => panic!("Cannot pop from a board without history:\n{:?}", self),
        };

        // the last stone played in a column is the highest occupied bit of that column
        let column = self.tiles_occupied & (0xFFu64 << (action * 8));
        let top = 1u64 << (63 - column.leading_zeros());
        let player = Player::from_parity(self.history.len());

        self.tiles_occupied ^= top;
        self.tiles_next ^= self.tiles_occupied;
        self.zobrist ^= ZOBRIST_TILES[player.index() as usize * 64 + top.trailing_zeros() as usize];
        self.outcome = None;

        action
    }

    fn last_action(&self) -> Option<u8> {
        self.history.last().copied()
    }

    fn winner(&self) -> Option<Outcome> {
        self.outcome
    }

    fn zobrist(&self) -> Zobrist {
        self.zobrist
    }

    fn clear(&mut self) {
        *self = Connect4::default();
    }
}

impl Features for Connect4 {
    fn features(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(Self::TILES as usize + 1);
        for col in 0..Self::WIDTH {
            for row in 0..Self::HEIGHT {
                result.push(self.tile(col, row).map_or(0.0, |p| p.sign::<f32>(Player::A)));
            }
        }
        result.push(1.0);
        result
    }
}

impl<'a> BoardMoves<'a, Connect4> for Connect4 {
    type AllActionsIterator = Internal<Range<u8>>;
    type LegalActionsIterator = BruteforceMoveIterator<'a, Connect4>;

    fn all_possible_actions() -> Self::AllActionsIterator {
        (0..Self::WIDTH).into_internal()
    }

    fn legal_actions(&'a self) -> Self::LegalActionsIterator {
        BruteforceMoveIterator::new(self)
    }
}

impl Debug for Connect4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (sep, line) = if f.alternate() { ("\n    ", "\n") } else { (" ", "") };

        write!(
            f,
            "Connect4 {{{}tiles_next: {:x},{}tiles_occupied: {:x},{}history: {:?},{}outcome: {:?}{}}}",
            sep, self.tiles_next, sep, self.tiles_occupied, sep, self.history, sep, self.outcome, line,
        )
    }
}

impl Display for Connect4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in (0..Self::HEIGHT).rev() {
            for col in 0..Self::WIDTH {
                let c = match self.tile(col, row) {
                    Some(Player::A) => 'a',
                    Some(Player::B) => 'b',
                    None => '.',
                };
                write!(f, "{}", c)?;
            }
            if row == Self::HEIGHT / 2 {
                write!(f, "    {}", self.turn().to_char())?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

fn mask(col: u8, row: u8) -> u64 {
    1 << (row + (col * 8))
}

fn get(tiles: u64, col: u8, row: u8) -> bool {
    tiles & mask(col, row) != 0
}

impl Hash for Connect4 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.zobrist.hash(state);
    }
}
