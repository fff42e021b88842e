//! Direction sources.
//!
//! [`SeededDirections`] is the runtime source: a `SmallRng` seeded once,
//! either from the configuration or from the system clock.
//! [`ScriptedDirections`] replays a fixed bit sequence for replays and tests.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sumo_common::driver::DirectionSource;

/// Pseudo-random left/right bits.
#[derive(Debug, Clone)]
pub struct SeededDirections {
    seed: u64,
    rng: SmallRng,
}

impl SeededDirections {
    /// Deterministic source for a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seed from the configured value, or the clock when absent.
    pub fn new(seed: Option<u64>) -> Self {
        Self::from_seed(seed.unwrap_or_else(time_seed))
    }

    /// Seed in use, logged so a bout can be replayed.
    #[inline]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl DirectionSource for SeededDirections {
    fn next_bit(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}

/// Nanoseconds since the epoch, truncated.
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Replays `bits` in order, cycling when exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDirections {
    bits: Vec<bool>,
    cursor: usize,
}

impl ScriptedDirections {
    /// An empty script always yields `false`.
    pub fn new(bits: impl Into<Vec<bool>>) -> Self {
        Self {
            bits: bits.into(),
            cursor: 0,
        }
    }

    /// Bits drawn so far.
    #[inline]
    pub const fn drawn(&self) -> usize {
        self.cursor
    }
}

impl DirectionSource for ScriptedDirections {
    fn next_bit(&mut self) -> bool {
        let bit = if self.bits.is_empty() {
            false
        } else {
            self.bits[self.cursor % self.bits.len()]
        };
        self.cursor += 1;
        bit
    }
}
