//! Ant Colony Optimization (ACO) for weighted set cover.
//!
//! Each ant builds a full cover by drawing subsets from a distribution
//! proportional to their pheromone levels. Constructed covers are refined
//! by destroy-and-repair local search, and the kept covers reinforce the
//! pheromone of the subsets they use, biasing later ants toward them.
//!
//! Pheromones are seeded from a static desirability score blending subset
//! size, element rarity and inverse cost, and reinforcement is tied to
//! that seed value rather than the current level, which keeps positive
//! feedback bounded.
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Leguizamón & Michalewicz (1999), "A New Version of Ant System for
//!   Subset Problems"

mod config;
mod construction;
mod local_search;
mod pheromone;
mod problem;
mod runner;
mod types;

pub use config::{AcoConfig, DesirabilityWeights, RepairStrategy};
pub use construction::ConstructionHeuristic;
pub use local_search::{keep_better, LocalSearch, LocalSearchParams};
pub use pheromone::{PheromoneTable, Sampler};
pub use problem::{Coverage, ProblemModel, MIN_DESIRABILITY};
pub use runner::{AcoResult, AcoRunner};
pub use types::{IterationReport, Solution};
