//! ACO execution loop.
//!
//! [`AcoRunner`] drives the colony: a sequential warm-up batch seeds the
//! pheromone table, then every iteration constructs all ants in parallel,
//! refines them in parallel, and folds the kept solutions into a single
//! sequential pheromone update.

use super::config::AcoConfig;
use super::construction::ConstructionHeuristic;
use super::local_search::{LocalSearch, LocalSearchParams};
use super::pheromone::PheromoneTable;
use super::problem::ProblemModel;
use super::types::{IterationReport, Solution};
use crate::error::{AcoError, Result};
use crate::random::{create_rng, derive_seed, Phase};
use rayon::prelude::*;
use rayon::ThreadPool;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Result of an ACO run.
#[derive(Debug, Clone)]
pub struct AcoResult {
    /// The cheapest solution observed, including the warm-up batch.
    pub best: Solution,

    /// Number of main-loop iterations completed.
    pub iterations: usize,

    /// Whether the run stopped because the best cost stopped improving.
    pub stopped_early: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Root seed the run used (drawn at random if none was configured).
    pub seed: u64,

    /// Per-iteration diagnostics; entry 0 is the warm-up batch.
    pub history: Vec<IterationReport>,
}

/// Executes the ant colony optimizer.
///
/// # Usage
///
/// ```
/// use u_setcover::aco::{AcoConfig, AcoRunner, ProblemModel};
///
/// let model = ProblemModel::new(
///     4,
///     vec![vec![1, 2], vec![2, 3], vec![3, 4], vec![1, 4]],
///     vec![1.0, 1.0, 1.0, 1.0],
/// )
/// .unwrap();
/// let config = AcoConfig::default().with_iterations(20).with_seed(42);
///
/// let result = AcoRunner::run(&model, &config).unwrap();
/// assert!(model.is_cover(&result.best.subsets));
/// assert!(result.best.cost >= 2.0);
/// ```
pub struct AcoRunner;

impl AcoRunner {
    /// Runs the optimizer to completion.
    ///
    /// # Errors
    /// - `InvalidParameter` if `config` is invalid; nothing runs.
    /// - `ConstructionStalled` or `NumericInstability` from any ant; the
    ///   failing iteration is aborted and no partial update is applied.
    pub fn run(model: &ProblemModel, config: &AcoConfig) -> Result<AcoResult> {
        Self::run_with_cancel(model, config, None)
    }

    /// Runs the optimizer with an optional cancellation token.
    ///
    /// The flag is checked before each iteration; when set, the run stops
    /// and returns the best solution found so far.
    pub fn run_with_cancel(
        model: &ProblemModel,
        config: &AcoConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoResult> {
        config.validate()?;

        let root = config.seed.unwrap_or_else(rand::random);
        let pool = if config.parallel {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(config.num_threads.unwrap_or(0))
                    .build()?,
            )
        } else {
            None
        };
        let ants = config.ants_per_iteration;
        let params = LocalSearchParams::from(config);

        info!(
            event = "aco_start",
            subsets = model.total_subsets(),
            universe = model.universe_size(),
            ants,
            iterations = config.iterations,
            seed = root,
        );

        // Warm-up: sequential ants against the untouched table.
        let mut pheromones = PheromoneTable::new(model);
        let sampler = pheromones.sampler()?;
        let warm_up = (0..ants)
            .map(|ant| {
                let mut rng = create_rng(derive_seed(root, 0, ant, Phase::WarmUp));
                ConstructionHeuristic::build_with_sampler(
                    model,
                    &sampler,
                    config.stall_multiplier,
                    &mut rng,
                )
            })
            .collect::<Result<Vec<_>>>()?;
        pheromones.evaporate_and_reinforce(&warm_up, config.evaporation_rate)?;

        let mut best = cheapest(&warm_up)
            .cloned()
            .ok_or_else(|| AcoError::parameter("ants_per_iteration", "must be positive"))?;
        let mut history = Vec::with_capacity(config.iterations + 1);
        history.push(report(0, &warm_up, best.cost, 0, &pheromones));

        let mut since_improvement = 0usize;
        let mut completed = 0usize;
        let mut stopped_early = false;
        let mut cancelled = false;

        for iteration in 1..=config.iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    info!(event = "aco_cancelled", iteration);
                    break;
                }
            }

            // Construct: every ant reads the same snapshot.
            let sampler = pheromones.sampler()?;
            let constructed = dispatch(pool.as_ref(), ants, |ant| {
                let mut rng = create_rng(derive_seed(root, iteration, ant, Phase::Construction));
                ConstructionHeuristic::build_with_sampler(
                    model,
                    &sampler,
                    config.stall_multiplier,
                    &mut rng,
                )
            })?;

            // Local search: keep the better of constructed/refined per ant.
            let (kept, improved) = if config.local_search {
                let snapshot = &pheromones;
                let refined = dispatch(pool.as_ref(), ants, |ant| {
                    let mut rng = create_rng(derive_seed(root, iteration, ant, Phase::LocalSearch));
                    LocalSearch::improve(
                        constructed[ant].clone(),
                        model,
                        snapshot,
                        &params,
                        &mut rng,
                    )
                })?;
                let improved = refined.iter().filter(|(_, won)| *won).count();
                let kept: Vec<Solution> = refined.into_iter().map(|(s, _)| s).collect();
                (kept, improved)
            } else {
                (constructed, 0)
            };
            if improved > 0 {
                debug!(event = "local_search_improved", iteration, ants = improved);
            }

            // Update: single writer, after both parallel phases finished.
            pheromones.evaporate_and_reinforce(&kept, config.evaporation_rate)?;

            if let Some(candidate) = cheapest(&kept) {
                if candidate.cost < best.cost {
                    best = candidate.clone();
                    since_improvement = 0;
                } else {
                    since_improvement += 1;
                }
            }

            let entry = report(iteration, &kept, best.cost, improved, &pheromones);
            debug!(
                event = "aco_iteration",
                iteration,
                mean_cost = entry.mean_cost,
                iteration_best = entry.iteration_best_cost,
                best_cost = best.cost,
            );
            history.push(entry);
            completed = iteration;

            if let Some(patience) = config.early_stopping_patience {
                if since_improvement >= patience {
                    stopped_early = true;
                    info!(event = "aco_early_stop", iteration, patience);
                    break;
                }
            }
        }

        info!(
            event = "aco_end",
            best_cost = best.cost,
            best_size = best.len(),
            iterations = completed,
            stopped_early,
            cancelled,
        );

        Ok(AcoResult {
            best,
            iterations: completed,
            stopped_early,
            cancelled,
            seed: root,
            history,
        })
    }
}

/// Runs one job per ant, on the pool when there is one.
///
/// Output order follows ant index. The first error aborts the batch.
fn dispatch<T, F>(pool: Option<&ThreadPool>, ants: usize, job: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> Result<T> + Sync + Send,
{
    match pool {
        Some(pool) => pool.install(|| (0..ants).into_par_iter().map(&job).collect()),
        None => (0..ants).map(job).collect(),
    }
}

/// The cheapest solution; ties go to the lowest ant index.
fn cheapest(solutions: &[Solution]) -> Option<&Solution> {
    solutions.iter().min_by(|a, b| {
        a.cost
            .partial_cmp(&b.cost)
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

fn report(
    iteration: usize,
    solutions: &[Solution],
    best_cost: f64,
    improved: usize,
    pheromones: &PheromoneTable,
) -> IterationReport {
    let mean_cost = if solutions.is_empty() {
        f64::NAN
    } else {
        solutions.iter().map(|s| s.cost).sum::<f64>() / solutions.len() as f64
    };
    IterationReport {
        iteration,
        mean_cost,
        iteration_best_cost: cheapest(solutions).map_or(f64::NAN, |s| s.cost),
        best_cost,
        improved_by_local_search: improved,
        pheromone_snapshot: pheromones.levels().to_vec(),
    }
}

// ============================================================================
// Tests
// ============================================================================
