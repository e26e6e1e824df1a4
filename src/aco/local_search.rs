//! Destroy-and-repair refinement of a constructed cover.
//!
//! A refinement keeps a random `(1 - dropout)` share of the solution plus
//! the current elite (highest-pheromone) subsets, then repairs coverage by
//! drawing subsets from outside the retained set.

use super::config::{validate_rate, AcoConfig, RepairStrategy};
use super::construction::stall_limit;
use super::pheromone::{PheromoneTable, Sampler};
use super::problem::{Coverage, ProblemModel};
use super::types::Solution;
use crate::error::{AcoError, Result};
use rand::Rng;

/// Parameters for one refinement.
#[derive(Debug, Clone, Copy)]
pub struct LocalSearchParams {
    /// Number of top-pheromone subsets always retained.
    pub elite_count: usize,

    /// Fraction of the solution dropped before repair, in [0, 1).
    pub dropout_rate: f64,

    /// Stall guard factor, as in construction.
    pub stall_multiplier: usize,

    pub repair_strategy: RepairStrategy,
}

impl Default for LocalSearchParams {
    fn default() -> Self {
        Self {
            elite_count: 100,
            dropout_rate: 0.015,
            stall_multiplier: 50,
            repair_strategy: RepairStrategy::Uniform,
        }
    }
}

impl From<&AcoConfig> for LocalSearchParams {
    fn from(config: &AcoConfig) -> Self {
        Self {
            elite_count: config.elite_count,
            dropout_rate: config.dropout_rate,
            stall_multiplier: config.stall_multiplier,
            repair_strategy: config.repair_strategy,
        }
    }
}

pub struct LocalSearch;

impl LocalSearch {
    /// Destroys part of `solution` and repairs it into a full cover.
    ///
    /// Returns the repaired solution regardless of whether it is cheaper;
    /// see [`LocalSearch::improve`] for the keep-better variant.
    ///
    /// # Errors
    /// - `InvalidParameter` if `dropout_rate` is outside [0, 1) or
    ///   `solution` references an unknown subset.
    /// - `ConstructionStalled` if repair keeps drawing retained subsets.
    /// - `NumericInstability` if a pheromone-weighted repair has no weight.
    pub fn refine<R: Rng + ?Sized>(
        solution: &Solution,
        model: &ProblemModel,
        pheromones: &PheromoneTable,
        params: &LocalSearchParams,
        rng: &mut R,
    ) -> Result<Solution> {
        validate_rate("dropout_rate", params.dropout_rate)?;

        let n = model.total_subsets();
        if let Some(&i) = solution.subsets.iter().find(|&&i| i >= n) {
            return Err(AcoError::parameter(
                "solution",
                format!("subset index {i} out of range 0..{n}"),
            ));
        }
        let keep = ((1.0 - params.dropout_rate) * solution.len() as f64).floor() as usize;
        let mut positions = rand::seq::index::sample(rng, solution.len(), keep).into_vec();
        positions.sort_unstable();

        let mut retained = vec![false; n];
        let mut order = Vec::with_capacity(keep + params.elite_count);
        for pos in positions {
            let i = solution.subsets[pos];
            retained[i] = true;
            order.push(i);
        }
        for i in pheromones.top_n(params.elite_count) {
            if !retained[i] {
                retained[i] = true;
                order.push(i);
            }
        }

        let mut coverage = Coverage::new(model);
        for &i in &order {
            coverage.add(model, i);
        }
        let mut cost = model.cost_of(&order);

        if coverage.is_complete() {
            return Ok(Solution::new(order, cost));
        }

        let complement: Vec<usize> = (0..n).filter(|&i| !retained[i]).collect();
        let limit = stall_limit(model, params.stall_multiplier);
        if complement.is_empty() {
            return Err(AcoError::ConstructionStalled { draws: 0, limit });
        }
        let weighted = match params.repair_strategy {
            RepairStrategy::Uniform => None,
            RepairStrategy::PheromoneWeighted => {
                Some(Sampler::restricted(pheromones.levels(), &complement)?)
            }
        };

        let mut duplicates = 0usize;
        while !coverage.is_complete() {
            let i = match &weighted {
                Some(sampler) => sampler.sample(rng),
                None => complement[rng.random_range(0..complement.len())],
            };
            if retained[i] {
                duplicates += 1;
                if duplicates > limit {
                    return Err(AcoError::ConstructionStalled {
                        draws: duplicates,
                        limit,
                    });
                }
                continue;
            }
            duplicates = 0;
            retained[i] = true;
            coverage.add(model, i);
            order.push(i);
            cost += model.cost(i);
        }

        Ok(Solution::new(order, cost))
    }

    /// Refines `solution` and keeps the cheaper of the two.
    ///
    /// Returns the kept solution and whether the refined one won.
    pub fn improve<R: Rng + ?Sized>(
        solution: Solution,
        model: &ProblemModel,
        pheromones: &PheromoneTable,
        params: &LocalSearchParams,
        rng: &mut R,
    ) -> Result<(Solution, bool)> {
        let refined = Self::refine(&solution, model, pheromones, params, rng)?;
        Ok(keep_better(solution, refined))
    }
}

/// Keeps the cheaper solution; ties keep `original`.
pub fn keep_better(original: Solution, refined: Solution) -> (Solution, bool) {
    if refined.cost < original.cost {
        (refined, true)
    } else {
        (original, false)
    }
}
