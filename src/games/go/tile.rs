use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use crate::games::go::GO_MAX_SIZE;

/// A tile as `(x, y)` coordinates, `x` is the column and `y` the row.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Tile {
    x: u8,
    y: u8,
}

/// A tile as a row-major index: `index = y * size + x`.
/// Only meaningful together with the size of the board it belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FlatTile {
    index: u16,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("invalid tile {0:?}")]
pub struct InvalidTile(pub String);

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
}

// By convention 'I' is skipped because it can be confused with "1".
const TILE_X_NAMES: &[u8] = b"ABCDEFGHJKLMNOPQRST";

impl Tile {
    pub fn new(x: u8, y: u8) -> Self {
        assert!(
            x < GO_MAX_SIZE && y < GO_MAX_SIZE,
            "Coordinates ({}, {}) too large, max={}",
            x,
            y,
            GO_MAX_SIZE,
        );
        Tile { x, y }
    }

    pub fn x(self) -> u8 {
        self.x
    }

    pub fn y(self) -> u8 {
        self.y
    }

    pub fn exists(self, size: u8) -> bool {
        self.x < size && self.y < size
    }

    pub fn to_flat(self, size: u8) -> FlatTile {
        assert!(self.exists(size), "{:?} does not exist on a board of size {}", self, size);
        FlatTile::new(size as u16 * self.y as u16 + self.x as u16)
    }

    pub fn all(size: u8) -> impl Iterator<Item = Tile> {
        (0..size).flat_map(move |y| (0..size).map(move |x| Tile::new(x, y)))
    }

    pub fn x_char(self) -> char {
        TILE_X_NAMES[self.x as usize] as char
    }
}

impl FlatTile {
    pub fn new(index: u16) -> Self {
        FlatTile { index }
    }

    pub fn index(self) -> u16 {
        self.index
    }

    pub fn to_tile(self, size: u8) -> Tile {
        Tile::new((self.index % size as u16) as u8, (self.index / size as u16) as u8)
    }

    pub fn all(size: u8) -> impl Iterator<Item = FlatTile> {
        let area = size as u16 * size as u16;
        (0..area).map(FlatTile::new)
    }

    /// The up to four orthogonal neighbours, in the order of [Direction::ALL].
    pub fn all_adjacent(self, size: u8) -> impl Iterator<Item = FlatTile> + Clone {
        Direction::ALL
            .iter()
            .filter_map(move |&dir| self.adjacent_in(dir, size))
    }

    pub fn adjacent_in(self, dir: Direction, size: u8) -> Option<FlatTile> {
        let size = size as u16;
        let index = match dir {
            Direction::Up => self.index + size,
            Direction::Down => self.index.checked_sub(size)?,
            Direction::Left => {
                if self.index % size == 0 {
                    return None;
                }
                self.index - 1
            }
            Direction::Right => {
                if (self.index + 1) % size == 0 {
                    return None;
                }
                self.index + 1
            }
        };

        if index < size * size {
            Some(FlatTile { index })
        } else {
            None
        }
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.x_char(), self.y as u32 + 1)
    }
}

impl Debug for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile(({}, {}), {})", self.x, self.y, self)
    }
}

impl FromStr for Tile {
    type Err = InvalidTile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || InvalidTile(s.to_owned());

        let mut chars = s.chars();
        let x_char = chars.next().ok_or_else(err)?.to_ascii_uppercase();
        let x = TILE_X_NAMES
            .iter()
            .position(|&c| c as char == x_char)
            .ok_or_else(err)?;

        let y_1 = chars.as_str().parse::<u8>().map_err(|_| err())?;
        if y_1 == 0 || y_1 > GO_MAX_SIZE {
            return Err(err());
        }

        Ok(Tile::new(x as u8, y_1 - 1))
    }
}
