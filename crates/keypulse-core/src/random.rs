//! Injectable randomness.
//!
//! Every probabilistic choice the engine makes (headline selection, spawn
//! jitter, tone degree) draws from a [`RandomSource`], so tests can pin the
//! outcome with [`ScriptedRandom`] while the front-ends use [`SeededRandom`].

use rand::prelude::*;

pub trait RandomSource {
    /// Uniform sample in \[0, 1).
    fn next_f32(&mut self) -> f32;

    #[inline]
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    #[inline]
    fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "index() on an empty range");
        ((self.next_f32() * len as f32) as usize).min(len.saturating_sub(1))
    }

    /// +1.0 or -1.0 with equal probability.
    #[inline]
    fn sign(&mut self) -> f32 {
        if self.next_f32() < 0.5 {
            -1.0
        } else {
            1.0
        }
    }
}

/// Pick an item uniformly.
pub fn pick<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> &'a T {
    &items[rng.index(items.len())]
}

/// Index into `weights` chosen proportionally to its weight.
///
/// Zero total weight falls back to the first entry.
pub fn weighted_index(rng: &mut dyn RandomSource, weights: &[u32]) -> usize {
    let total: u32 = weights.iter().sum();
    if total == 0 {
        return 0;
    }
    let mut roll = rng.next_f32() * total as f32;
    for (i, w) in weights.iter().enumerate() {
        if roll < *w as f32 {
            return i;
        }
        roll -= *w as f32;
    }
    weights.len() - 1
}

/// `StdRng`-backed source for production use.
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl RandomSource for SeededRandom {
    #[inline]
    fn next_f32(&mut self) -> f32 {
        self.0.gen::<f32>()
    }
}

/// Replays a fixed list of rolls, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    rolls: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(rolls: impl Into<Vec<f32>>) -> Self {
        let mut rolls = rolls.into();
        if rolls.is_empty() {
            rolls.push(0.5);
        }
        for r in rolls.iter_mut() {
            *r = r.clamp(0.0, 0.999_999);
        }
        Self { rolls, cursor: 0 }
    }

    /// Always returns the same roll.
    pub fn constant(roll: f32) -> Self {
        Self::new(vec![roll])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f32(&mut self) -> f32 {
        let r = self.rolls[self.cursor % self.rolls.len()];
        self.cursor = self.cursor.wrapping_add(1);
        r
    }
}
