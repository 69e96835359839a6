//! Random number source for combat rolls
//!
//! Everything random in the engine goes through [`Roller::randint`], so a
//! session seeded with the same value replays the same fights.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Source of inclusive integer rolls
pub trait Roller {
    /// Roll an integer in `[low, high]` (inclusive). If `high < low` returns `low`.
    fn randint(&mut self, low: i32, high: i32) -> i32;

    /// Roll a single die with `sides` faces
    fn roll_die(&mut self, sides: i32) -> i32 {
        self.randint(1, sides.max(1))
    }

    /// Percentile check: true with probability `percent / 100`
    fn percent_chance(&mut self, percent: u32) -> bool {
        if percent == 0 {
            return false;
        }
        if percent >= 100 {
            return true;
        }
        self.randint(1, 100) <= percent as i32
    }
}

/// Seedable game RNG backed by ChaCha8
#[derive(Debug, Clone)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a deterministic RNG from a seed
    pub fn seeded(seed: u64) -> Self {
        GameRng {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create an RNG seeded from the operating system
    pub fn from_entropy() -> Self {
        GameRng {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Reseed in place (scenario tests reseed before each resolved attack)
    pub fn reseed(&mut self, seed: u64) {
        self.inner = ChaCha8Rng::seed_from_u64(seed);
    }
}

impl Roller for GameRng {
    fn randint(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.inner.gen_range(low..=high)
    }
}

/// Rolls replayed from a queue, then from a seeded fallback
///
/// Scripted values are clamped into the requested range so a script can
/// never produce an impossible roll.
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    queue: VecDeque<i32>,
    fallback: GameRng,
}

impl ScriptedRolls {
    /// Create a script that falls back to a seeded RNG once exhausted
    pub fn new(rolls: impl IntoIterator<Item = i32>) -> Self {
        ScriptedRolls {
            queue: rolls.into_iter().collect(),
            fallback: GameRng::seeded(0),
        }
    }

    /// Append more rolls to the script
    pub fn push(&mut self, rolls: impl IntoIterator<Item = i32>) {
        self.queue.extend(rolls);
    }

    /// Number of scripted rolls not yet consumed
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl Roller for ScriptedRolls {
    fn randint(&mut self, low: i32, high: i32) -> i32 {
        match self.queue.pop_front() {
            Some(value) if high > low => value.clamp(low, high),
            Some(_) => low,
            None => self.fallback.randint(low, high),
        }
    }
}
