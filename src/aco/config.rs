//! ACO configuration.

use crate::error::{AcoError, Result};

/// Blend weights for the static subset desirability score.
///
/// Each component (subset length, mean element rarity, inverse cost) is
/// min-max normalized to [0, 1] before blending, so the weights express
/// relative importance directly. They must be non-negative and sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DesirabilityWeights {
    /// Weight of the normalized subset size.
    pub length: f64,

    /// Weight of the normalized mean rarity of the subset's elements.
    pub rarity: f64,

    /// Weight of the normalized inverse cost.
    pub cost: f64,
}

impl Default for DesirabilityWeights {
    fn default() -> Self {
        Self {
            length: 0.1,
            rarity: 0.6,
            cost: 0.3,
        }
    }
}

impl DesirabilityWeights {
    pub fn new(length: f64, rarity: f64, cost: f64) -> Self {
        Self {
            length,
            rarity,
            cost,
        }
    }

    /// Validates the weights.
    pub fn validate(&self) -> Result<()> {
        for (name, w) in [
            ("weights.length", self.length),
            ("weights.rarity", self.rarity),
            ("weights.cost", self.cost),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(AcoError::parameter(
                    name,
                    format!("must be a finite non-negative number, got {w}"),
                ));
            }
        }
        let sum = self.length + self.rarity + self.cost;
        if (sum - 1.0).abs() > 1e-9 {
            return Err(AcoError::parameter(
                "weights",
                format!("must sum to 1.0, got {sum}"),
            ));
        }
        Ok(())
    }
}

/// How local search picks subsets when repairing a partial cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RepairStrategy {
    /// Every subset outside the retained set is equally likely.
    #[default]
    Uniform,

    /// Subsets outside the retained set are drawn proportionally to their
    /// current pheromone level.
    PheromoneWeighted,
}

/// Configuration for the ant colony optimizer.
///
/// # Examples
///
/// ```
/// use u_setcover::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_ants_per_iteration(16)
///     .with_iterations(200)
///     .with_evaporation_rate(0.2)
///     .with_early_stopping_patience(25)
///     .with_seed(42);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Number of independent constructions per iteration.
    pub ants_per_iteration: usize,

    /// Number of main-loop iterations (the warm-up batch is extra).
    pub iterations: usize,

    /// Fraction of pheromone lost per update, in [0, 1).
    pub evaporation_rate: f64,

    /// Number of top-pheromone subsets always retained by local search.
    pub elite_count: usize,

    /// Fraction of a solution's subsets dropped by local search, in [0, 1).
    pub dropout_rate: f64,

    /// Stall guard factor `K`: a construction or repair fails once
    /// consecutive duplicate draws exceed `total_subsets * K`.
    pub stall_multiplier: usize,

    /// Stop after this many consecutive iterations without a new best.
    ///
    /// `None` disables early stopping (the default).
    pub early_stopping_patience: Option<usize>,

    /// Whether to refine each ant's solution with local search.
    pub local_search: bool,

    /// Candidate selection during local-search repair.
    pub repair_strategy: RepairStrategy,

    /// Whether to run ant phases on a rayon worker pool.
    ///
    /// Results are identical either way; every ant owns its seed.
    pub parallel: bool,

    /// Worker pool size. `None` uses all available cores.
    pub num_threads: Option<usize>,

    /// Root seed for reproducibility. `None` draws a random root seed.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            ants_per_iteration: 10,
            iterations: 50,
            evaporation_rate: 0.1,
            elite_count: 100,
            dropout_rate: 0.015,
            stall_multiplier: 50,
            early_stopping_patience: None,
            local_search: true,
            repair_strategy: RepairStrategy::Uniform,
            parallel: true,
            num_threads: None,
            seed: None,
        }
    }
}

impl AcoConfig {
    pub fn with_ants_per_iteration(mut self, n: usize) -> Self {
        self.ants_per_iteration = n;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    pub fn with_dropout_rate(mut self, rate: f64) -> Self {
        self.dropout_rate = rate;
        self
    }

    pub fn with_stall_multiplier(mut self, k: usize) -> Self {
        self.stall_multiplier = k;
        self
    }

    pub fn with_early_stopping_patience(mut self, patience: usize) -> Self {
        self.early_stopping_patience = Some(patience);
        self
    }

    pub fn with_local_search(mut self, enabled: bool) -> Self {
        self.local_search = enabled;
        self
    }

    pub fn with_repair_strategy(mut self, strategy: RepairStrategy) -> Self {
        self.repair_strategy = strategy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_num_threads(mut self, n: usize) -> Self {
        self.num_threads = Some(n);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.ants_per_iteration == 0 {
            return Err(AcoError::parameter("ants_per_iteration", "must be positive"));
        }
        if self.iterations == 0 {
            return Err(AcoError::parameter("iterations", "must be positive"));
        }
        validate_rate("evaporation_rate", self.evaporation_rate)?;
        if self.elite_count == 0 {
            return Err(AcoError::parameter("elite_count", "must be positive"));
        }
        validate_rate("dropout_rate", self.dropout_rate)?;
        if self.stall_multiplier == 0 {
            return Err(AcoError::parameter("stall_multiplier", "must be positive"));
        }
        if self.early_stopping_patience == Some(0) {
            return Err(AcoError::parameter(
                "early_stopping_patience",
                "must be positive when set",
            ));
        }
        if self.num_threads == Some(0) {
            return Err(AcoError::parameter("num_threads", "must be positive when set"));
        }
        Ok(())
    }
}

/// Checks that a rate lies in [0, 1).
pub(crate) fn validate_rate(name: &'static str, rate: f64) -> Result<()> {
    if !(0.0..1.0).contains(&rate) {
        return Err(AcoError::parameter(
            name,
            format!("must be in [0, 1), got {rate}"),
        ));
    }
    Ok(())
}
