//! Weighted set cover problem model.
//!
//! [`ProblemModel`] validates an instance once and precomputes the static
//! guidance scores the colony relies on: element rarity, subset
//! desirability, and the baseline selection probabilities.

use super::config::DesirabilityWeights;
use crate::error::{AcoError, Result};

/// Desirability assigned to a subset whose blended score is 0.
///
/// Desirability seeds the pheromone table, which must stay strictly
/// positive. Positive scores are kept as blended.
pub const MIN_DESIRABILITY: f64 = f64::EPSILON;

/// An immutable, validated set cover instance with derived scores.
///
/// Elements are 1-based integers in `1..=universe_size`; subsets are
/// identified by their index in the input order.
///
/// # Examples
///
/// ```
/// use u_setcover::aco::ProblemModel;
///
/// let model = ProblemModel::new(
///     4,
///     vec![vec![1, 2], vec![2, 3], vec![3, 4], vec![1, 4]],
///     vec![1.0, 1.0, 1.0, 1.0],
/// )
/// .unwrap();
///
/// assert_eq!(model.total_subsets(), 4);
/// assert!(model.is_cover(&[0, 2]));
/// assert!(!model.is_cover(&[0, 1]));
/// ```
#[derive(Debug, Clone)]
pub struct ProblemModel {
    universe_size: usize,
    subsets: Vec<Vec<usize>>,
    costs: Vec<f64>,
    weights: DesirabilityWeights,
    max_subset_len: usize,
    element_frequency: Vec<usize>,
    element_rarity: Vec<f64>,
    desirability: Vec<f64>,
    baseline_probability: Vec<f64>,
}

impl ProblemModel {
    /// Builds a model with the default desirability weights.
    pub fn new(universe_size: usize, subsets: Vec<Vec<usize>>, costs: Vec<f64>) -> Result<Self> {
        Self::with_weights(universe_size, subsets, costs, DesirabilityWeights::default())
    }

    /// Builds a model with explicit desirability weights.
    ///
    /// # Errors
    /// - `InvalidInstance` if there are no subsets, a subset is empty, an
    ///   element lies outside `1..=universe_size`, the cost count differs
    ///   from the subset count, or a cost is not a positive finite number.
    /// - `InvalidParameter` if the weights are invalid.
    /// - `DegenerateInstance` if some element of the universe appears in
    ///   no subset.
    pub fn with_weights(
        universe_size: usize,
        mut subsets: Vec<Vec<usize>>,
        costs: Vec<f64>,
        weights: DesirabilityWeights,
    ) -> Result<Self> {
        if universe_size == 0 {
            return Err(AcoError::InvalidInstance("universe is empty".into()));
        }
        if subsets.is_empty() {
            return Err(AcoError::InvalidInstance("no subsets given".into()));
        }
        if costs.len() != subsets.len() {
            return Err(AcoError::InvalidInstance(format!(
                "{} costs given for {} subsets",
                costs.len(),
                subsets.len()
            )));
        }
        for (i, subset) in subsets.iter_mut().enumerate() {
            if subset.is_empty() {
                return Err(AcoError::InvalidInstance(format!("subset {i} is empty")));
            }
            if let Some(&e) = subset.iter().find(|&&e| e == 0 || e > universe_size) {
                return Err(AcoError::InvalidInstance(format!(
                    "subset {i} contains element {e} outside 1..={universe_size}"
                )));
            }
            subset.sort_unstable();
            subset.dedup();
        }
        if let Some((i, c)) = costs
            .iter()
            .enumerate()
            .find(|(_, c)| !c.is_finite() || **c <= 0.0)
        {
            return Err(AcoError::InvalidInstance(format!(
                "subset {i} has non-positive cost {c}"
            )));
        }
        weights.validate()?;

        let total = subsets.len();
        let mut element_frequency = vec![0usize; universe_size];
        for subset in &subsets {
            for &e in subset {
                element_frequency[e - 1] += 1;
            }
        }
        if let Some(pos) = element_frequency.iter().position(|&f| f == 0) {
            return Err(AcoError::DegenerateInstance { element: pos + 1 });
        }

        // Inverse relative frequency: rare elements score high.
        let inverse_frequency: Vec<f64> = element_frequency
            .iter()
            .map(|&f| total as f64 / f as f64)
            .collect();
        let element_rarity = min_max_normalize(&inverse_frequency);

        let max_subset_len = subsets.iter().map(Vec::len).max().unwrap_or(1);
        let length: Vec<f64> = subsets
            .iter()
            .map(|s| s.len() as f64 / max_subset_len as f64)
            .collect();
        let mean_rarity: Vec<f64> = subsets
            .iter()
            .map(|s| s.iter().map(|&e| element_rarity[e - 1]).sum::<f64>() / s.len() as f64)
            .collect();
        let inverse_cost: Vec<f64> = costs.iter().map(|c| 1.0 / c).collect();

        let length = min_max_normalize(&length);
        let mean_rarity = min_max_normalize(&mean_rarity);
        let inverse_cost = min_max_normalize(&inverse_cost);

        let desirability: Vec<f64> = (0..total)
            .map(|i| {
                let score = weights.length * length[i]
                    + weights.rarity * mean_rarity[i]
                    + weights.cost * inverse_cost[i];
                if score > 0.0 {
                    score.min(1.0)
                } else {
                    MIN_DESIRABILITY
                }
            })
            .collect();

        let sum: f64 = desirability.iter().sum();
        let baseline_probability = desirability.iter().map(|d| d / sum).collect();

        Ok(Self {
            universe_size,
            subsets,
            costs,
            weights,
            max_subset_len,
            element_frequency,
            element_rarity,
            desirability,
            baseline_probability,
        })
    }

    /// Number of elements in the universe.
    pub fn universe_size(&self) -> usize {
        self.universe_size
    }

    /// Number of candidate subsets.
    pub fn total_subsets(&self) -> usize {
        self.subsets.len()
    }

    /// Elements of subset `i`, sorted and de-duplicated.
    pub fn subset(&self, i: usize) -> &[usize] {
        &self.subsets[i]
    }

    pub fn subsets(&self) -> &[Vec<usize>] {
        &self.subsets
    }

    pub fn cost(&self, i: usize) -> f64 {
        self.costs[i]
    }

    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    pub fn weights(&self) -> DesirabilityWeights {
        self.weights
    }

    pub fn max_subset_len(&self) -> usize {
        self.max_subset_len
    }

    /// Number of subsets containing each element (index `e - 1`).
    pub fn element_frequency(&self) -> &[usize] {
        &self.element_frequency
    }

    /// Normalized inverse frequency of each element (index `e - 1`).
    pub fn element_rarity(&self) -> &[f64] {
        &self.element_rarity
    }

    /// Static desirability of each subset, in `(0, 1]`.
    ///
    /// Equals the weighted blend of the normalized components, except that
    /// a blend of exactly 0 becomes [`MIN_DESIRABILITY`].
    pub fn desirability(&self) -> &[f64] {
        &self.desirability
    }

    /// Desirability normalized to a probability distribution.
    pub fn baseline_probability(&self) -> &[f64] {
        &self.baseline_probability
    }

    /// Total cost of the given subset indices.
    pub fn cost_of(&self, indices: &[usize]) -> f64 {
        indices.iter().map(|&i| self.costs[i]).sum()
    }

    /// Returns `true` if the given subsets cover every element.
    ///
    /// Out-of-range indices make the result `false`.
    pub fn is_cover(&self, indices: &[usize]) -> bool {
        let mut coverage = Coverage::new(self);
        for &i in indices {
            if i >= self.subsets.len() {
                return false;
            }
            coverage.add(self, i);
        }
        coverage.is_complete()
    }
}

/// Incremental record of which universe elements are covered.
#[derive(Debug, Clone)]
pub struct Coverage {
    covered: Vec<bool>,
    count: usize,
}

impl Coverage {
    pub fn new(model: &ProblemModel) -> Self {
        Self {
            covered: vec![false; model.universe_size],
            count: 0,
        }
    }

    /// Marks the elements of subset `i` as covered.
    ///
    /// Returns the number of newly covered elements.
    pub fn add(&mut self, model: &ProblemModel, i: usize) -> usize {
        let mut gained = 0;
        for &e in model.subset(i) {
            let slot = &mut self.covered[e - 1];
            if !*slot {
                *slot = true;
                gained += 1;
            }
        }
        self.count += gained;
        gained
    }

    pub fn covered_count(&self) -> usize {
        self.count
    }

    pub fn is_complete(&self) -> bool {
        self.count == self.covered.len()
    }
}

/// Min-max normalizes to [0, 1]. A constant input maps to all ones.
fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range <= 0.0 || !range.is_finite() {
        return vec![1.0; values.len()];
    }
    values.iter().map(|v| (v - min) / range).collect()
}
