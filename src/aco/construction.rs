//! Probabilistic construction of one covering solution.

use super::pheromone::{PheromoneTable, Sampler};
use super::problem::{Coverage, ProblemModel};
use super::types::Solution;
use crate::error::{AcoError, Result};
use rand::Rng;

/// Builds one feasible cover by repeated roulette draws.
///
/// The selection distribution is derived once from the pheromone table and
/// is *not* renormalized as subsets get picked; a draw that hits an
/// already-selected subset is simply redrawn. Consecutive duplicate draws
/// are bounded by `total_subsets * stall_multiplier`.
pub struct ConstructionHeuristic;

impl ConstructionHeuristic {
    /// Builds a solution from the table's current distribution.
    ///
    /// # Errors
    /// - `NumericInstability` if the table cannot form a distribution.
    /// - `ConstructionStalled` if the duplicate-draw guard trips.
    pub fn build<R: Rng + ?Sized>(
        model: &ProblemModel,
        pheromones: &PheromoneTable,
        stall_multiplier: usize,
        rng: &mut R,
    ) -> Result<Solution> {
        let sampler = pheromones.sampler()?;
        Self::build_with_sampler(model, &sampler, stall_multiplier, rng)
    }

    /// Builds a solution from a prepared sampler over all subsets.
    ///
    /// Lets many ants share one sampler built from the same snapshot.
    pub fn build_with_sampler<R: Rng + ?Sized>(
        model: &ProblemModel,
        sampler: &Sampler,
        stall_multiplier: usize,
        rng: &mut R,
    ) -> Result<Solution> {
        let limit = stall_limit(model, stall_multiplier);
        let mut selected = vec![false; model.total_subsets()];
        let mut coverage = Coverage::new(model);
        let mut order = Vec::new();
        let mut cost = 0.0;
        let mut duplicates = 0usize;

        while !coverage.is_complete() {
            let i = sampler.sample(rng);
            if selected[i] {
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
            selected[i] = true;
            coverage.add(model, i);
            order.push(i);
            cost += model.cost(i);
        }

        Ok(Solution::new(order, cost))
    }
}

/// Maximum consecutive duplicate draws before giving up.
pub(crate) fn stall_limit(model: &ProblemModel, stall_multiplier: usize) -> usize {
    model.total_subsets().saturating_mul(stall_multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn square() -> ProblemModel {
        ProblemModel::new(
            4,
            vec![vec![1, 2], vec![2, 3], vec![3, 4], vec![1, 4]],
            vec![1.0, 1.0, 1.0, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn test_square_never_single_subset() {
        let model = square();
        let table = PheromoneTable::new(&model);
        for seed in 0..200 {
            let mut rng = create_rng(seed);
            let s = ConstructionHeuristic::build(&model, &table, 50, &mut rng).unwrap();
            assert!(s.len() >= 2);
            assert!((s.cost - s.len() as f64).abs() < 1e-12);
            assert!(model.is_cover(&s.subsets));
        }
    }

    #[test]
    fn test_no_repeated_indices_and_cost_matches() {
        let model = ProblemModel::new(
            6,
            vec![
                vec![1, 2, 3],
                vec![4],
                vec![5, 6],
                vec![1, 4, 5],
                vec![2, 6],
                vec![3],
            ],
            vec![3.0, 1.0, 2.0, 2.5, 1.5, 0.5],
        )
        .unwrap();
        let table = PheromoneTable::new(&model);
        for seed in 0..100 {
            let mut rng = create_rng(seed);
            let s = ConstructionHeuristic::build(&model, &table, 50, &mut rng).unwrap();
            let mut sorted = s.subsets.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), s.len());
            assert!((s.cost - model.cost_of(&s.subsets)).abs() < 1e-9);
            assert!(model.is_cover(&s.subsets));
        }
    }

    #[test]
    fn test_same_seed_same_solution() {
        let model = square();
        let table = PheromoneTable::new(&model);
        let a = ConstructionHeuristic::build(&model, &table, 50, &mut create_rng(5)).unwrap();
        let b = ConstructionHeuristic::build(&model, &table, 50, &mut create_rng(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stall_guard() {
        // Both subsets are required but the sampler can only ever draw 0.
        let model = ProblemModel::new(2, vec![vec![1], vec![2]], vec![1.0, 1.0]).unwrap();
        let sampler = Sampler::new(&[1.0, 0.0]).unwrap();
        let err = ConstructionHeuristic::build_with_sampler(&model, &sampler, 1, &mut create_rng(0))
            .unwrap_err();
        assert!(matches!(
            err,
            AcoError::ConstructionStalled { draws: 3, limit: 2 }
        ));
    }

    #[test]
    fn test_floored_required_subset_stalls() {
        // Subset 0 is the only cover of element 6 and blends to 0.
        let model = ProblemModel::new(
            6,
            vec![vec![1, 6], vec![1, 2, 3], vec![1, 4, 5]],
            vec![10.0, 1.0, 1.0],
        )
        .unwrap();
        let table = PheromoneTable::new(&model);
        let err = ConstructionHeuristic::build(&model, &table, 50, &mut create_rng(8)).unwrap_err();
        assert!(matches!(
            err,
            AcoError::ConstructionStalled { draws: 151, limit: 150 }
        ));
    }

    #[test]
    fn test_single_subset_universe() {
        let model = ProblemModel::new(3, vec![vec![1, 2, 3]], vec![7.0]).unwrap();
        let table = PheromoneTable::new(&model);
        let s = ConstructionHeuristic::build(&model, &table, 50, &mut create_rng(1)).unwrap();
        assert_eq!(s.subsets, vec![0]);
        assert!((s.cost - 7.0).abs() < 1e-12);
    }
}
