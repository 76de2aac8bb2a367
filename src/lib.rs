//! Multiclass LP-Boosting.
//!
//! This crate blends pre-computed weak multiclass classifiers into a
//! single strong classifier by solving a sequence of linear programs,
//! following the soft-margin LP-Boost formulation: maximize the margin
//! `ρ` by which every example's correct label outscores every wrong
//! label, with slack penalized through the regularization parameter `ν`.
//!
//! Weak classifiers arrive as real-valued [`ScoreMatrix`] blocks; each
//! one extends the LP by a column block (column generation), so the
//! constraint rows built for earlier classifiers are reused unchanged.
//! The LP itself is handed to an interchangeable backend through the
//! [`solver::LpSolver`] contract.
//!
//! ```
//! use mclpboost::{BoostConfig, MclpBoost, ScoreMatrix};
//!
//! let mut booster = MclpBoost::new(BoostConfig::new(3, 0.1))?;
//! booster.initialize([0, 1, 2], false, "clarabel")?;
//!
//! // a perfect one-hot classifier ...
//! booster.add_classifier(ScoreMatrix::identity(3))?;
//! // ... and a useless one.
//! booster.add_classifier(ScoreMatrix::from_rows(&[
//!     vec![0.3, 0.3, 0.3],
//!     vec![0.4, 0.4, 0.4],
//!     vec![0.5, 0.5, 0.5],
//! ])?)?;
//!
//! booster.update()?;
//!
//! // the perfect classifier takes all the weight at margin 1.
//! assert!((booster.rho()? - 1.0).abs() < 1e-6);
//! assert!((booster.weights()?[0][0] - 1.0).abs() < 1e-6);
//! # Ok::<(), mclpboost::BoostError>(())
//! ```

pub mod constants;
pub mod checkers;
pub mod error;
pub mod matrix;
pub mod solver;
pub mod booster;
pub mod ensemble;

mod logging;

pub use booster::{
    BoostConfig,
    MclpBoost,
};
pub use ensemble::WeightedEnsemble;
pub use error::BoostError;
pub use matrix::ScoreMatrix;
pub use solver::{
    LinearProgram,
    LpSolution,
    LpSolver,
    LpStatus,
};
