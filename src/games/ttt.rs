use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::iter::Map;
use std::ops::Range;

use internal_iterator::{Internal, IteratorExt};
use lazy_static::lazy_static;

use crate::ai::heuristic::Features;
use crate::board::{illegal_action, Board, BoardMoves, BruteforceMoveIterator, Outcome, Player};
use crate::util::zobrist::{zobrist_table, Zobrist};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Coord(usize);

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TTTBoard {
    tiles: [Option<Player>; 9],
    history: Vec<Coord>,
    outcome: Option<Outcome>,
    zobrist: Zobrist,
}

const LINES: &[[(usize, usize); 3]] = &[
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(2, 0), (1, 1), (0, 2)],
];

lazy_static! {
    static ref ZOBRIST_TILES: Vec<Zobrist> = zobrist_table(0x77, 2 * 9);
}

fn zobrist_for(player: Player, coord: Coord) -> Zobrist {
    ZOBRIST_TILES[player.index() as usize * 9 + coord.0]
}

impl Default for TTTBoard {
    fn default() -> Self {
        TTTBoard {
            tiles: Default::default(),
            history: vec![],
            outcome: None,
            zobrist: Zobrist::default(),
        }
    }
}

impl Coord {
    pub fn from_xy(x: usize, y: usize) -> Self {
        assert!(x < 3);
        assert!(y < 3);
        Coord(y * 3 + x)
    }

    pub fn from_i(i: usize) -> Self {
        assert!(i < 9);
        Coord(i)
    }

    pub fn all() -> Map<Range<usize>, fn(usize) -> Coord> {
        let f: fn(usize) -> Coord = Coord;
        (0..9).map(f)
    }

    pub fn i(self) -> usize {
        self.0
    }

    pub fn x(self) -> usize {
        self.0 % 3
    }

    pub fn y(self) -> usize {
        self.0 / 3
    }
}

impl TTTBoard {
    pub fn tile(&self, coord: Coord) -> Option<Player> {
        self.tiles[coord.0]
    }

    fn compute_outcome(&self, player: Player) -> Option<Outcome> {
        let won = LINES.iter().any(|line| {
            line.iter()
                .all(|&(lx, ly)| self.tiles[Coord::from_xy(lx, ly).0] == Some(player))
        });

        if won {
            Some(Outcome::WonBy(player))
        } else if self.tiles.iter().all(|tile| tile.is_some()) {
            Some(Outcome::Draw)
        } else {
            None
        }
    }
}

impl Board for TTTBoard {
    type Action = Coord;

    fn len(&self) -> usize {
        self.history.len()
    }

    fn legal(&self, action: Coord) -> bool {
        !self.is_done() && action.0 < 9 && self.tiles[action.0].is_none()
    }

    fn append(&mut self, action: Coord) {
        if !self.legal(action) {
            illegal_action(self, action);
        }

        let player = self.turn();
        self.tiles[action.0] = Some(player);
        self.zobrist ^= zobrist_for(player, action);
        self.history.push(action);
        self.outcome = self.compute_outcome(player);
    }

    fn pop(&mut self) -> Coord {
        let action = match self.history.pop() {
            Some(action) => action,
            None => panic!("Cannot pop from a board without history:\n{:?}", self),
        };

        let player = Player::from_parity(self.history.len());
        self.tiles[action.0] = None;
        self.zobrist ^= zobrist_for(player, action);
        // the board could not have been done before the last action
        self.outcome = None;

        action
    }

    fn last_action(&self) -> Option<Coord> {
        self.history.last().copied()
    }

    fn winner(&self) -> Option<Outcome> {
        self.outcome
    }

    fn zobrist(&self) -> Zobrist {
        self.zobrist
    }

    fn clear(&mut self) {
        *self = TTTBoard::default();
    }
}

impl Features for TTTBoard {
    fn features(&self) -> Vec<f32> {
        let mut result = self
            .tiles
            .iter()
            .map(|tile| tile.map_or(0.0, |p| p.sign::<f32>(Player::A)))
            .collect::<Vec<_>>();
        result.push(1.0);
        result
    }
}

impl<'a> BoardMoves<'a, TTTBoard> for TTTBoard {
    type AllActionsIterator = Internal<Map<Range<usize>, fn(usize) -> Coord>>;
    type LegalActionsIterator = BruteforceMoveIterator<'a, TTTBoard>;

    fn all_possible_actions() -> Self::AllActionsIterator {
        Coord::all().into_internal()
    }

    fn legal_actions(&'a self) -> Self::LegalActionsIterator {
        BruteforceMoveIterator::new(self)
    }
}

impl Hash for TTTBoard {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.zobrist.hash(state);
    }
}

fn tile_to_char(tile: Option<Player>) -> char {
    match tile {
        Some(Player::A) => 'a',
        Some(Player::B) => 'b',
        None => ' ',
    }
}

impl Debug for Coord {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Coord({}, {})", self.x(), self.y())
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for TTTBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "+---+")?;
        for y in 0..3 {
            write!(f, "|")?;
            for x in 0..3 {
                write!(f, "{}", tile_to_char(self.tile(Coord::from_xy(x, y))))?;
            }
            write!(f, "|")?;

            if y == 1 {
                write!(f, "   {}", tile_to_char(Some(self.turn())))?;
            }

            writeln!(f)?;
        }

        writeln!(f, "+---+")?;
        Ok(())
    }
}
