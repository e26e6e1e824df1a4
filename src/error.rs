//! Error taxonomy for the set cover optimizer.

use thiserror::Error;

/// Errors raised while building a model, configuring a run, or running it.
///
/// `InvalidInstance`, `DegenerateInstance` and `InvalidParameter` are
/// raised eagerly at construction/configuration time. `ConstructionStalled`
/// and `NumericInstability` come from worker phases and abort the whole
/// iteration.
#[derive(Debug, Error)]
pub enum AcoError {
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    #[error("degenerate instance: element {element} is not contained in any subset")]
    DegenerateInstance { element: usize },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("construction stalled after {draws} consecutive duplicate draws (limit {limit})")]
    ConstructionStalled { draws: usize, limit: usize },

    #[error("numeric instability: {0}")]
    NumericInstability(String),

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("worker pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl AcoError {
    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        AcoError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AcoError>;
