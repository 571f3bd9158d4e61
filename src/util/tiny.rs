use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro64StarStar;

/// The rng every bot and random board generator in this crate is driven by.
pub type BotRng = Xoroshiro64StarStar;

pub fn seeded_rng(seed: u64) -> BotRng {
    BotRng::seed_from_u64(seed)
}

/// Deterministic rng for tests and benchmarks.
pub fn consistent_rng() -> impl Rng {
    seeded_rng(0)
}
