use std::fmt::{Debug, Formatter};

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro64StarStar;

/// Incremental hash of a board state.
/// Components are combined with xor, so adding and removing a piece use the same operation.
#[derive(Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Zobrist(pub u64);

impl Zobrist {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Generate `len` keys for the table identified by `table_id`.
/// The keys only depend on the arguments, so hashes are stable between runs.
pub fn zobrist_table(table_id: u64, len: usize) -> Vec<Zobrist> {
    let mut rng = Xoroshiro64StarStar::seed_from_u64(table_id);
    (0..len).map(|_| Zobrist(rng.gen())).collect()
}

impl Debug for Zobrist {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print hex, full-width with leading 0x
        write!(f, "Zobrist({:#018x})", self.0)
    }
}

impl std::ops::BitXor for Zobrist {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Zobrist(self.0 ^ rhs.0)
    }
}

impl std::ops::BitXorAssign for Zobrist {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}
