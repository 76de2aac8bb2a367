//! The error taxonomy of the boosting engine.
//!
//! Every fallible operation reports its failure synchronously to the
//! immediate caller; nothing is retried internally.  A failed call leaves
//! the engine exactly as it was, with one documented exception:
//! [`BoostError::Solve`] is raised *after* the classifier registry has
//! already committed, so only the stale weights and margin are left behind.

use thiserror::Error;

use crate::solver::LpStatus;

/// Everything that can go wrong while boosting.
#[derive(Debug, Error)]
pub enum BoostError {
    /// Bad construction or initialization arguments: an empty or
    /// duplicated label set, a regularization parameter outside `(0, 1]`,
    /// an unrecognized solver name, or an operation invoked before
    /// `initialize`.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A score matrix whose shape disagrees with the label space
    /// established at initialization, or ragged numeric input.
    #[error("dimension mismatch: {0}")]
    Dimension(String),

    /// The LP solve terminated without an optimal solution.
    /// The classifier that triggered the solve stays in the registry;
    /// the previously stored weights and margin are stale and
    /// must not be trusted.
    #[error(
        "LP solve failed with status {status:?} \
        on a problem of {n_rows} rows and {n_cols} columns"
    )]
    Solve {
        /// Outcome reported by the backend.
        status: LpStatus,
        /// Number of constraint rows of the failed program.
        n_rows: usize,
        /// Number of variables of the failed program.
        n_cols: usize,
    },

    /// Weights, margin, or a prediction were requested before any
    /// successful call to `update`.
    #[error("not fitted: {0}")]
    NotFitted(&'static str),
}
