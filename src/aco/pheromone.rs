//! Per-subset pheromone levels and sampling from them.

use super::config::validate_rate;
use super::problem::ProblemModel;
use super::types::Solution;
use crate::error::{AcoError, Result};
use rand::Rng;

/// Pheromone level per subset.
///
/// Seeded from the model's static desirability. Each update first
/// evaporates every level by `(1 - rate)` and then adds back the
/// *initial* value for every subset used by the kept solutions, so
/// reinforcement strength stays tied to the static desirability instead of
/// compounding on the current level.
///
/// Levels never drop below `f64::MIN_POSITIVE`.
#[derive(Debug, Clone)]
pub struct PheromoneTable {
    levels: Vec<f64>,
    initial: Vec<f64>,
}

impl PheromoneTable {
    /// Seeds every level with the subset's desirability.
    pub fn new(model: &ProblemModel) -> Self {
        let initial = model.desirability().to_vec();
        Self {
            levels: initial.clone(),
            initial,
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level(&self, i: usize) -> f64 {
        self.levels[i]
    }

    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// The levels the table was seeded with.
    pub fn initial_levels(&self) -> &[f64] {
        &self.initial
    }

    /// Evaporates all levels, then reinforces every subset that appears in
    /// at least one of `solutions` by its initial level.
    ///
    /// Reinforcement is applied once per distinct subset, not once per
    /// solution using it: a subset chosen by every ant gains the same as
    /// one chosen by a single ant.
    ///
    /// The table is left untouched if an argument is rejected.
    ///
    /// # Errors
    /// `InvalidParameter` if `evaporation_rate` is outside [0, 1) or a
    /// solution references an unknown subset.
    pub fn evaporate_and_reinforce(
        &mut self,
        solutions: &[Solution],
        evaporation_rate: f64,
    ) -> Result<()> {
        validate_rate("evaporation_rate", evaporation_rate)?;

        let mut used = vec![false; self.levels.len()];
        for solution in solutions {
            for &i in &solution.subsets {
                match used.get_mut(i) {
                    Some(slot) => *slot = true,
                    None => {
                        return Err(AcoError::parameter(
                            "solutions",
                            format!("subset index {i} out of range 0..{}", self.levels.len()),
                        ))
                    }
                }
            }
        }

        let retain = 1.0 - evaporation_rate;
        for (i, level) in self.levels.iter_mut().enumerate() {
            let mut next = *level * retain;
            if used[i] {
                next += self.initial[i];
            }
            *level = next.max(f64::MIN_POSITIVE);
        }
        Ok(())
    }

    /// Current levels normalized to sum to 1.
    ///
    /// # Errors
    /// `NumericInstability` if the level sum is zero or not finite.
    pub fn as_probability_distribution(&self) -> Result<Vec<f64>> {
        let total: f64 = self.levels.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(AcoError::NumericInstability(format!(
                "pheromone sum is {total}"
            )));
        }
        Ok(self.levels.iter().map(|l| l / total).collect())
    }

    /// A sampler over all subsets, weighted by the current distribution.
    pub fn sampler(&self) -> Result<Sampler> {
        Sampler::new(&self.as_probability_distribution()?)
    }

    /// Indices of the `n` highest levels, highest first.
    ///
    /// Ties go to the lower index. Returns every index if `n >= len`.
    pub fn top_n(&self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.levels.len()).collect();
        order.sort_by(|&a, &b| {
            self.levels[b]
                .partial_cmp(&self.levels[a])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });
        order.truncate(n);
        order
    }
}

/// Roulette-wheel sampler over a fixed set of weighted candidates.
///
/// Built once per distribution; each draw is a binary search over the
/// cumulative weights.
#[derive(Debug, Clone)]
pub struct Sampler {
    candidates: Option<Vec<usize>>,
    cumulative: Vec<f64>,
}

impl Sampler {
    /// Samples index `i` with probability proportional to `weights[i]`.
    pub fn new(weights: &[f64]) -> Result<Self> {
        Ok(Self {
            candidates: None,
            cumulative: cumulative(weights.iter().copied())?,
        })
    }

    /// Samples only among `candidates`, proportionally to `weights[c]`.
    pub fn restricted(weights: &[f64], candidates: &[usize]) -> Result<Self> {
        Ok(Self {
            cumulative: cumulative(candidates.iter().map(|&c| weights[c]))?,
            candidates: Some(candidates.to_vec()),
        })
    }

    /// Number of candidates the sampler draws from.
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Draws one index.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let total = self.cumulative[self.cumulative.len() - 1];
        let roll = rng.random_range(0.0..total);
        let pos = self
            .cumulative
            .partition_point(|&c| c <= roll)
            .min(self.cumulative.len() - 1);
        match &self.candidates {
            Some(candidates) => candidates[pos],
            None => pos,
        }
    }
}

fn cumulative(weights: impl Iterator<Item = f64>) -> Result<Vec<f64>> {
    let mut acc = 0.0;
    let mut out = Vec::new();
    for w in weights {
        if !w.is_finite() || w < 0.0 {
            return Err(AcoError::NumericInstability(format!(
                "invalid sampling weight {w}"
            )));
        }
        acc += w;
        out.push(acc);
    }
    if !acc.is_finite() || acc <= 0.0 {
        return Err(AcoError::NumericInstability(format!(
            "sampling weights sum to {acc}"
        )));
    }
    Ok(out)
}
