use std::cmp::Ordering;

use crate::board::{Outcome, Player};
use crate::games::go::{Chains, FlatTile};

/// Area score: stones on the board plus surrounded territory, without komi.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Score {
    pub a: u32,
    pub b: u32,
}

impl Score {
    pub fn outcome(self) -> Outcome {
        match self.a.cmp(&self.b) {
            Ordering::Greater => Outcome::WonBy(Player::A),
            Ordering::Equal => Outcome::Draw,
            Ordering::Less => Outcome::WonBy(Player::B),
        }
    }
}

/// Score the current stones.
/// Each maximal region of empty tiles is territory for a color if only that color borders it,
/// regions bordered by both colors or by no stones at all are neutral.
pub fn score(chains: &Chains) -> Score {
    let size = chains.size();
    let area = chains.area();

    let mut score = Score { a: 0, b: 0 };
    let mut visited = vec![false; area as usize];
    let mut stack = vec![];

    for tile in FlatTile::all(size) {
        match chains.cell(tile) {
            Some(Player::A) => score.a += 1,
            Some(Player::B) => score.b += 1,
            None => {
                if visited[tile.index() as usize] {
                    continue;
                }

                let mut region_size = 0;
                let mut reaches_a = false;
                let mut reaches_b = false;

                visited[tile.index() as usize] = true;
                stack.push(tile);

                while let Some(curr) = stack.pop() {
                    region_size += 1;
                    for adj in curr.all_adjacent(size) {
                        match chains.cell(adj) {
                            Some(Player::A) => reaches_a = true,
                            Some(Player::B) => reaches_b = true,
                            None => {
                                if !visited[adj.index() as usize] {
                                    visited[adj.index() as usize] = true;
                                    stack.push(adj);
                                }
                            }
                        }
                    }
                }

                match (reaches_a, reaches_b) {
                    (true, false) => score.a += region_size,
                    (false, true) => score.b += region_size,
                    (true, true) | (false, false) => {}
                }
            }
        }
    }

    score
}
