//! Ant colony optimization for the weighted set cover problem.
//!
//! Given a universe of elements, candidate subsets and a positive cost per
//! subset, finds a low-cost collection of subsets whose union is the whole
//! universe:
//!
//! - **Problem model** ([`aco::ProblemModel`]): validates the instance and
//!   precomputes element rarity, subset desirability and baseline
//!   selection probabilities.
//! - **Pheromone table** ([`aco::PheromoneTable`]): per-subset levels,
//!   evaporated and reinforced once per iteration by a single writer.
//! - **Construction** ([`aco::ConstructionHeuristic`]): roulette-wheel
//!   cover building with a bounded duplicate-draw guard.
//! - **Local search** ([`aco::LocalSearch`]): elite-preserving dropout
//!   followed by randomized repair.
//! - **Runner** ([`aco::AcoRunner`]): warm-up, parallel construction and
//!   refinement on a rayon pool, sequential pheromone update, best
//!   tracking and optional early stopping.
//!
//! Instance files in the common `<cost> <elements...>` text format are
//! handled by [`instance`], outside the optimizer core.
//!
//! # Example
//!
//! ```
//! use u_setcover::aco::{AcoConfig, AcoRunner, ProblemModel};
//!
//! let model = ProblemModel::new(
//!     5,
//!     vec![vec![1, 2, 3], vec![2, 4], vec![3, 4], vec![4, 5], vec![1, 5]],
//!     vec![3.0, 1.0, 1.0, 1.0, 1.0],
//! )?;
//! let config = AcoConfig::default()
//!     .with_ants_per_iteration(8)
//!     .with_iterations(20)
//!     .with_seed(7);
//!
//! let result = AcoRunner::run(&model, &config)?;
//! assert!(model.is_cover(&result.best.subsets));
//! # Ok::<(), u_setcover::AcoError>(())
//! ```

pub mod aco;
pub mod error;
pub mod instance;
pub mod random;

pub use error::{AcoError, Result};
