//! The game's random streams
//!
//! Two logically separate generators: `game` drives every gameplay roll
//! (delays, steps, lanes, correctness, operand draws), `system` drives the
//! target-sequence shuffle and the candidate pick inside equation
//! generation. Keeping them apart means the gameplay stream stays
//! replayable from a seed no matter how many candidates a generation pass
//! enumerates.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Salt mixed into the seed for the second stream so the two never collide.
const SYSTEM_STREAM_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// The pair of random streams a game scene owns.
#[derive(Debug, Clone)]
pub struct GameRng {
    /// Gameplay rolls
    pub game: Pcg32,
    /// Shuffles and candidate picks
    pub system: Pcg32,
}

impl GameRng {
    /// Both streams derived from one seed. Used by tests and anywhere a
    /// reproducible run matters.
    pub fn seeded(seed: u64) -> Self {
        Self {
            game: Pcg32::seed_from_u64(seed),
            system: Pcg32::seed_from_u64(seed ^ SYSTEM_STREAM_SALT),
        }
    }

    /// Fresh streams from OS entropy, one pair per play session.
    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }
}
