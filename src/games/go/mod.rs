//! The Go board and the incremental group tracking it is built on.
use static_assertions::const_assert;

pub use board::*;
pub use chains::*;
pub use disjoint::*;
pub use rules::*;
pub use score::*;
pub use tile::*;

pub const GO_MAX_SIZE: u8 = 19;
pub const GO_MAX_AREA: u16 = GO_MAX_SIZE as u16 * GO_MAX_SIZE as u16;

// one past the last tile must still fit for the adjacency checks
const_assert!((GO_MAX_AREA as u32) + (GO_MAX_SIZE as u32) < u16::MAX as u32);

mod board;
mod chains;
mod disjoint;
mod hash;
mod rules;
mod score;
mod tile;
