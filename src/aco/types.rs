//! Solution and reporting types.

/// A covering solution: selected subset indices in selection order plus
/// their total cost.
///
/// Solutions produced by this crate always cover the universe exactly,
/// never repeat an index, and carry `cost == sum of member costs`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Selected subset indices, in the order they were added.
    pub subsets: Vec<usize>,

    /// Sum of the selected subsets' costs.
    pub cost: f64,
}

impl Solution {
    pub fn new(subsets: Vec<usize>, cost: f64) -> Self {
        Self { subsets, cost }
    }

    /// Number of selected subsets.
    pub fn len(&self) -> usize {
        self.subsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subsets.is_empty()
    }
}

/// Diagnostics for one iteration, handed to external reporting.
///
/// Iteration 0 is the warm-up batch; main-loop iterations count from 1.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationReport {
    /// Iteration index (0 = warm-up).
    pub iteration: usize,

    /// Mean cost of the solutions kept this iteration.
    pub mean_cost: f64,

    /// Lowest cost among the solutions kept this iteration.
    pub iteration_best_cost: f64,

    /// Best cost seen so far in the run.
    pub best_cost: f64,

    /// Number of ants whose refined solution replaced the constructed one.
    pub improved_by_local_search: usize,

    /// Pheromone levels after this iteration's update.
    pub pheromone_snapshot: Vec<f64>,
}
