use std::collections::BTreeSet;

use crate::grid::GridPos;
use crate::rng::{PcgRng, RngOracle, mix_seed};

/// Template cells that may hold a subsection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessibleSet(BTreeSet<GridPos>);

impl AccessibleSet {
    pub fn contains(&self, position: GridPos) -> bool {
        self.0.contains(&position)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<GridPos> for AccessibleSet {
    fn from_iter<I: IntoIterator<Item = GridPos>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Picks which battlefield cells are accessible.
///
/// Draws `floor(n * ratio)` cells without replacement. The result depends
/// only on the seed, the salt and the candidate order.
#[derive(Clone, Debug)]
pub struct AccessibilitySampler<R = PcgRng> {
    rng: R,
    ratio: f64,
    seed: u64,
}

impl AccessibilitySampler<PcgRng> {
    pub fn new(ratio: f64, seed: u64) -> Self {
        Self::with_rng(PcgRng, ratio, seed)
    }
}

impl<R: RngOracle> AccessibilitySampler<R> {
    /// `ratio` is clamped into `[0, 1]`; NaN counts as 0.
    pub fn with_rng(rng: R, ratio: f64, seed: u64) -> Self {
        let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        Self { rng, ratio, seed }
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Number of cells kept out of `candidates`.
    pub fn sample_size(&self, candidates: usize) -> usize {
        (candidates as f64 * self.ratio).floor() as usize
    }

    /// Samples accessible cells from `candidates` with a partial
    /// Fisher-Yates shuffle.
    pub fn sample(&self, candidates: &[GridPos], salt: u64) -> AccessibleSet {
        let mut pool = candidates.to_vec();
        let keep = self.sample_size(pool.len());

        for draw in 0..keep {
            let remaining = (pool.len() - draw) as u32;
            let pick = draw + self.rng.below(mix_seed(self.seed, salt, draw as u32), remaining) as usize;
            pool.swap(draw, pick);
        }

        pool.truncate(keep);
        pool.into_iter().collect()
    }

    /// Chooses a starting cell among the accessible ones.
    pub fn choose_start(&self, accessible: &AccessibleSet, salt: u64) -> Option<GridPos> {
        if accessible.is_empty() {
            return None;
        }
        let index = self.rng.below(mix_seed(self.seed, salt, u32::MAX), accessible.len() as u32);
        accessible.iter().nth(index as usize)
    }
}
