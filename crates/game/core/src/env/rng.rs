//! Random source and weighted-choice primitives.
//!
//! The [`RngOracle`] is stateless: it maps a seed to a value. The session keeps
//! a `game_seed` and a roll nonce, and [`Roller`] mixes them into a fresh seed
//! for every draw, so no component holds hidden mutable RNG state.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Seed-in, value-out random source.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, 1)`.
    fn unit(&self, seed: u64) -> f64 {
        f64::from(self.next_u32(seed)) / (f64::from(u32::MAX) + 1.0)
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Always returns the same value. `FixedRng(0)` makes every chance roll succeed
/// and every weighted pick take its first entry.
#[derive(Clone, Copy, Debug)]
pub struct FixedRng(pub u32);

impl FixedRng {
    /// A source whose unit draw is (approximately) `fraction`.
    pub fn at(fraction: f64) -> Self {
        let clamped = clamp(fraction, 0.0, 1.0);
        Self((clamped * f64::from(u32::MAX)) as u32)
    }
}

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

/// Replays a fixed list of unit draws in order, repeating the last one.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    cursor: AtomicUsize,
}

impl SequenceRng {
    pub fn new(units: impl IntoIterator<Item = f64>) -> Self {
        let values = units
            .into_iter()
            .map(|unit| FixedRng::at(unit).0)
            .collect();
        Self {
            values,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl RngOracle for SequenceRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        match self.values.get(index).or_else(|| self.values.last()) {
            Some(value) => *value,
            None => 0,
        }
    }
}

/// Mix the session seed with the roll nonce and a context tag.
pub fn compute_seed(game_seed: u64, nonce: u64, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Bounds `value` to `[min, max]`.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Weighted pick driven by a uniform `unit` draw in `[0, 1)`.
///
/// Walks cumulative weights and returns the first entry whose running total
/// reaches `unit * total`. Entries with weight ≤ 0 are only reachable through
/// the fallback to the last entry. Returns `None` for an empty list.
pub fn pick_weighted<T: Copy>(unit: f64, entries: &[(T, f64)]) -> Option<T> {
    let total: f64 = entries.iter().map(|(_, weight)| *weight).sum();
    let roll = unit * total;
    let mut cursor = 0.0;
    for (item, weight) in entries {
        cursor += *weight;
        if *weight > 0.0 && roll <= cursor {
            return Some(*item);
        }
    }
    entries.last().map(|(item, _)| *item)
}

/// Draws values for one session, advancing its roll nonce on each draw.
pub struct Roller<'a> {
    rng: &'a dyn RngOracle,
    game_seed: u64,
    nonce: &'a mut u64,
}

impl<'a> Roller<'a> {
    pub fn new(rng: &'a dyn RngOracle, game_seed: u64, nonce: &'a mut u64) -> Self {
        Self {
            rng,
            game_seed,
            nonce,
        }
    }

    /// Uniform value in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        let seed = compute_seed(self.game_seed, *self.nonce, 0);
        *self.nonce = self.nonce.wrapping_add(1);
        self.rng.unit(seed)
    }

    /// `true` with the given probability.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }

    /// Uniform index into a collection of `len` elements. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        let index = (self.unit() * len as f64) as usize;
        index.min(len.saturating_sub(1))
    }

    pub fn pick_weighted<T: Copy>(&mut self, entries: &[(T, f64)]) -> Option<T> {
        let unit = self.unit();
        pick_weighted(unit, entries)
    }
}
