//! Deterministic simulation RNG.
//!
//! The core only needs randomness for one thing: choosing where a new mine or
//! factory appears on level-up.  Everything else (routing, blocks,
//! reservations) is deterministic by construction.  Seeding from
//! [`GameConfig::seed`](crate::GameConfig::seed) makes level layouts
//! reproducible.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Seeded RNG for world-level decisions.
///
/// Used only in single-threaded contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Choose a random element from a slice, `None` if it is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.0)
    }
}
