//! The multiclass LP-Boost engine.
//!
//! The engine owns the classifier registry, the incremental LP state,
//! and the most recent solution.  Weak classifiers arrive pre-computed
//! as score matrices; each `update` re-solves the soft-margin LP over
//! the full pool and overwrites the blending weights and the margin.

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Serialize, Deserialize};

use crate::checkers;
use crate::constants::DEFAULT_WEIGHT_SHARING;
use crate::ensemble::{
    self,
    WeightedEnsemble,
};
use crate::error::BoostError;
use crate::logging;
use crate::matrix::ScoreMatrix;
use crate::solver::{
    self,
    LpSolver,
    LpStatus,
};

use super::column_generation::ColumnGeneration;

/// Configuration of a [`MclpBoost`] engine, validated eagerly by
/// [`MclpBoost::new`].
///
/// Defaults: weights are shared across labels
/// (one blending weight per classifier).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostConfig {
    n_classes: usize,
    nu: f64,
    weight_sharing: bool,
}

impl BoostConfig {
    /// A configuration for `n_classes` labels with soft-margin
    /// regularization `nu ∈ (0, 1]`.
    ///
    /// Time complexity: `O(1)`.
    pub fn new(n_classes: usize, nu: f64) -> Self {
        Self {
            n_classes,
            nu,
            weight_sharing: DEFAULT_WEIGHT_SHARING,
        }
    }

    /// Toggles weight sharing.  When `true` (the default) one weight
    /// variable covers all labels of a classifier; when `false` each
    /// (classifier, label) pair gets its own weight and the simplex
    /// constraint holds per label.
    ///
    /// Time complexity: `O(1)`.
    pub fn weight_sharing(mut self, flag: bool) -> Self {
        self.weight_sharing = flag;
        self
    }

    /// Number of classes.
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// The soft-margin regularization parameter `ν`.
    pub fn nu(&self) -> f64 {
        self.nu
    }

    /// `true` if one weight variable covers all labels of a classifier.
    pub fn shares_weights(&self) -> bool {
        self.weight_sharing
    }

    fn validate(&self) -> Result<(), BoostError> {
        if self.n_classes < 2 {
            return Err(BoostError::Configuration(format!(
                "need at least 2 classes, got {}",
                self.n_classes,
            )));
        }
        if !(self.nu > 0f64 && self.nu <= 1f64) {
            return Err(BoostError::Configuration(format!(
                "regularization parameter ν must be in (0, 1], got {}",
                self.nu,
            )));
        }
        Ok(())
    }
}

// Everything that only exists once `initialize` has succeeded.
struct Initialized<L> {
    labels: Vec<L>,
    solver: Box<dyn LpSolver>,
    interior_point: bool,
    columns: ColumnGeneration,
}

/// A multiclass LP-Boosting engine.
///
/// Lifecycle: construct with [`MclpBoost::new`], establish the label
/// space and solver with [`MclpBoost::initialize`], then interleave
/// [`MclpBoost::add_classifier`] and [`MclpBoost::update`] calls and
/// read the result through [`MclpBoost::weights`], [`MclpBoost::rho`]
/// and [`MclpBoost::predict`].
///
/// All operations are synchronous and single-threaded; one engine owns
/// all of its mutable state and engines share nothing.
///
/// # Example
///
/// ```
/// use mclpboost::{BoostConfig, MclpBoost, ScoreMatrix};
///
/// let mut booster = MclpBoost::new(BoostConfig::new(3, 0.1))?;
/// booster.initialize(["ant", "bee", "cat"], false, "clarabel")?;
/// booster.add_classifier(ScoreMatrix::identity(3))?;
/// booster.update()?;
///
/// assert!((booster.rho()? - 1.0).abs() < 1e-6);
/// assert_eq!(booster.predict(&[[0.1, 0.7, 0.2]])?, "bee");
/// # Ok::<(), mclpboost::BoostError>(())
/// ```
pub struct MclpBoost<L> {
    config: BoostConfig,

    state: Option<Initialized<L>>,

    // weak classifier score matrices, in arrival order
    classifiers: Vec<ScoreMatrix>,

    // blending weights, `[classifier][label]`
    // (one entry per classifier when weights are shared)
    weights: Vec<Vec<f64>>,

    rho: f64,
    gamma: f64,

    fitted: bool,
    verbose: bool,
}

impl<L> MclpBoost<L> {
    /// Constructs an engine, validating `config` eagerly.
    ///
    /// Time complexity: `O(1)`.
    pub fn new(config: BoostConfig) -> Result<Self, BoostError> {
        config.validate()?;
        Ok(Self {
            config,
            state: None,
            classifiers: Vec::new(),
            weights: Vec::new(),
            rho: 0f64,
            gamma: 0f64,
            fitted: false,
            verbose: false,
        })
    }

    /// Print a colored log line after each successful `update`.
    ///
    /// Time complexity: `O(1)`.
    pub fn verbose(mut self, flag: bool) -> Self {
        self.verbose = flag;
        self
    }

    fn state(&self) -> Result<&Initialized<L>, BoostError> {
        self.state.as_ref().ok_or_else(|| BoostError::Configuration(
            "engine is not initialized; call `initialize` first".into()
        ))
    }

    fn fitted(&self) -> Result<(), BoostError> {
        if self.fitted {
            Ok(())
        } else {
            Err(BoostError::NotFitted(
                "no successful `update` has been performed yet"
            ))
        }
    }

    /// Number of weak classifiers in the registry.
    pub fn n_classifiers(&self) -> usize {
        self.classifiers.len()
    }

    /// Number of classes.
    pub fn n_classes(&self) -> usize {
        self.config.n_classes()
    }

    /// Engine description as name/value pairs.
    pub fn info(&self) -> Vec<(&str, String)> {
        let solver = self.state.as_ref()
            .map(|state| {
                let profile = if state.interior_point {
                    "barrier"
                } else {
                    "default"
                };
                format!("{} ({profile})", state.solver.name())
            })
            .unwrap_or_else(|| "-".to_string());
        Vec::from([
            ("# of classes", format!("{}", self.config.n_classes())),
            ("# of classifiers", format!("{}", self.classifiers.len())),
            ("Regularization (ν)", format!("{}", self.config.nu())),
            ("Weight sharing", format!("{}", self.config.shares_weights())),
            ("Solver", solver),
        ])
    }
}

impl<L> MclpBoost<L>
    where L: Clone + Eq + Hash,
{
    /// Establishes the label space and the solve strategy.
    ///
    /// `labels` is the ordered label set: one distinct label per class,
    /// in the order that defines label indices and the tie-break order
    /// of [`MclpBoost::predict`].  Example `i` of every score matrix is
    /// the prototype example of `labels[i]`.
    ///
    /// Fails with [`BoostError::Configuration`] if `labels` is empty,
    /// contains duplicates, disagrees with the configured class count,
    /// or if `solver_name` is unrecognized (see [`solver::backend`]);
    /// the engine is untouched on failure.  Re-initializing an engine
    /// discards its registry and solution.
    pub fn initialize<I>(
        &mut self,
        labels: I,
        interior_point: bool,
        solver_name: &str,
    ) -> Result<(), BoostError>
        where I: IntoIterator<Item = L>,
    {
        let labels = labels.into_iter().collect::<Vec<_>>();
        if labels.is_empty() {
            return Err(BoostError::Configuration(
                "label set is empty".into()
            ));
        }

        {
            let mut seen = HashSet::with_capacity(labels.len());
            if !labels.iter().all(|label| seen.insert(label)) {
                return Err(BoostError::Configuration(
                    "label set contains duplicates".into()
                ));
            }
        }

        if labels.len() != self.config.n_classes() {
            return Err(BoostError::Configuration(format!(
                "expected {} labels, got {}",
                self.config.n_classes(),
                labels.len(),
            )));
        }

        let solver = solver::backend(solver_name, interior_point)?;

        let n_classes = labels.len();
        let columns = ColumnGeneration::new(
            (0..n_classes).collect(),
            n_classes,
            self.config.nu(),
            self.config.shares_weights(),
        );

        self.state = Some(Initialized {
            labels,
            solver,
            interior_point,
            columns,
        });
        self.classifiers.clear();
        self.weights.clear();
        self.fitted = false;

        if self.verbose {
            logging::print_setup(solver_name, interior_point);
        }
        Ok(())
    }

    /// Appends a weak classifier to the registry and extends the LP by
    /// its column block.
    ///
    /// Fails with [`BoostError::Configuration`] before `initialize` and
    /// with [`BoostError::Dimension`] if `scores` is not `K × K` for the
    /// established `K`-label space; the registry and LP state are
    /// untouched on failure.
    pub fn add_classifier(&mut self, scores: ScoreMatrix)
        -> Result<(), BoostError>
    {
        self.state()?;

        let k = self.config.n_classes();
        let (n_rows, n_cols) = scores.shape();
        if n_rows != k || n_cols != k {
            return Err(BoostError::Dimension(format!(
                "score matrix of shape {n_rows}×{n_cols} is incompatible \
                with the {k}-label space (expected {k}×{k})"
            )));
        }

        // validated above, so this cannot fail
        if let Some(state) = self.state.as_mut() {
            state.columns.append_classifier(&scores);
        }
        self.classifiers.push(scores);
        Ok(())
    }

    /// Re-solves the soft-margin LP over the full classifier pool and
    /// overwrites the blending weights, `ρ` and `γ`.
    ///
    /// Safe to call repeatedly as classifiers arrive: each call solves
    /// against the current pool, and `γ` is non-decreasing in the pool
    /// since a new column can only relax the optimum.
    ///
    /// Any non-optimal outcome fails with [`BoostError::Solve`].  The
    /// registry stays as committed by `add_classifier`; the previously
    /// stored weights and margin are stale and must not be trusted.
    pub fn update(&mut self) -> Result<(), BoostError> {
        let (solution, n_rows, n_cols, n_examples) = {
            let state = self.state()?;
            let lp = state.columns.snapshot();
            let solution = state.solver.solve(&lp);
            (solution, lp.n_rows, lp.n_cols, state.columns.n_examples())
        };

        if solution.status != LpStatus::Optimal {
            return Err(BoostError::Solve {
                status: solution.status,
                n_rows,
                n_cols,
            });
        }

        // primal layout: [ρ, ξ_1, ..., ξ_N, weight columns].
        self.rho = solution.primal[0];
        self.gamma = -solution.objective_value;

        let k = self.config.n_classes();
        let weight_block = &solution.primal[1 + n_examples..];
        self.weights = if self.config.shares_weights() {
            weight_block.iter()
                .map(|w| vec![w.max(0f64)])
                .collect()
        } else {
            weight_block.chunks(k)
                .map(|block| block.iter().map(|w| w.max(0f64)).collect())
                .collect()
        };

        // each weight block must land on the probability simplex
        if self.config.shares_weights() {
            let flat = self.weights.iter()
                .map(|w| w[0])
                .collect::<Vec<_>>();
            checkers::simplex_condition(&flat);
        } else {
            for class in 0..k {
                let per_class = self.weights.iter()
                    .map(|w| w[class])
                    .collect::<Vec<_>>();
                checkers::simplex_condition(&per_class);
            }
        }

        self.fitted = true;
        if self.verbose {
            logging::print_update(self.classifiers.len(), self.rho, self.gamma);
        }
        Ok(())
    }

    /// The blending weights of the most recent successful `update`,
    /// indexed `[classifier][label]` (a single entry per classifier when
    /// weights are shared).
    ///
    /// There is no zero-weight sentinel before the first fit: reading
    /// weights from an unfitted engine fails with
    /// [`BoostError::NotFitted`].
    pub fn weights(&self) -> Result<&[Vec<f64>], BoostError> {
        self.fitted()?;
        Ok(&self.weights)
    }

    /// The margin variable `ρ` of the most recent successful `update`:
    /// the guaranteed (soft) separation between correct and wrong label
    /// scores under the current weighting.
    pub fn rho(&self) -> Result<f64, BoostError> {
        self.fitted()?;
        Ok(self.rho)
    }

    /// The LP objective value `γ = ρ - D Σ_n ξ_n` of the most recent
    /// successful `update`.  Non-decreasing in the classifier pool.
    pub fn gamma(&self) -> Result<f64, BoostError> {
        self.fitted()?;
        Ok(self.gamma)
    }

    /// Classifies one example given its per-classifier label scores,
    /// one score row per registered classifier.  Ties break to the
    /// lowest label index in the declared label order.
    ///
    /// Fails with [`BoostError::NotFitted`] before a successful
    /// `update` and with [`BoostError::Dimension`] if the row count or
    /// any row length disagrees with the registry.
    pub fn predict<S>(&self, scores_per_classifier: &[S])
        -> Result<L, BoostError>
        where S: AsRef<[f64]>,
    {
        self.fitted()?;
        let best = ensemble::weighted_arg_max(
            &self.weights,
            self.config.shares_weights(),
            self.config.n_classes(),
            scores_per_classifier,
        )?;
        Ok(self.state()?.labels[best].clone())
    }

    /// Classifies every training example from the stored registry.
    pub fn predict_training(&self) -> Result<Vec<L>, BoostError> {
        self.fitted()?;
        let state = self.state()?;

        (0..state.columns.n_examples())
            .map(|i| {
                let rows = self.classifiers.iter()
                    .map(|scores| scores.row(i))
                    .collect::<Vec<_>>();
                let best = ensemble::weighted_arg_max(
                    &self.weights,
                    self.config.shares_weights(),
                    self.config.n_classes(),
                    &rows,
                )?;
                Ok(state.labels[best].clone())
            })
            .collect()
    }

    /// Exports the fitted weights and label set as a standalone,
    /// serializable [`WeightedEnsemble`].
    pub fn ensemble(&self) -> Result<WeightedEnsemble<L>, BoostError> {
        self.fitted()?;
        let state = self.state()?;
        Ok(WeightedEnsemble::from_parts(
            state.labels.clone(),
            self.weights.clone(),
            self.config.shares_weights(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_success() {
        let config = BoostConfig::new(3, 0.1).weight_sharing(false);
        assert_eq!(config.n_classes(), 3);
        assert!(!config.shares_weights());
        assert!(MclpBoost::<usize>::new(config).is_ok());
    }

    #[test]
    fn test_config_failure_nu() {
        for nu in [0f64, -0.5, 1.5] {
            let ret = MclpBoost::<usize>::new(BoostConfig::new(3, nu));
            assert!(matches!(ret, Err(BoostError::Configuration(_))));
        }
    }

    #[test]
    fn test_config_failure_classes() {
        let ret = MclpBoost::<usize>::new(BoostConfig::new(1, 0.1));
        assert!(matches!(ret, Err(BoostError::Configuration(_))));
    }

    #[test]
    fn test_uninitialized_add() {
        let mut booster =
            MclpBoost::<usize>::new(BoostConfig::new(3, 0.1)).unwrap();
        let ret = booster.add_classifier(ScoreMatrix::identity(3));
        assert!(matches!(ret, Err(BoostError::Configuration(_))));
        assert_eq!(booster.n_classifiers(), 0);
    }

    #[test]
    fn test_initialize_failure_duplicates() {
        let mut booster =
            MclpBoost::new(BoostConfig::new(3, 0.1)).unwrap();
        let ret = booster.initialize(["a", "b", "a"], false, "clarabel");
        assert!(matches!(ret, Err(BoostError::Configuration(_))));
    }

    #[test]
    fn test_initialize_failure_empty() {
        let mut booster =
            MclpBoost::<&str>::new(BoostConfig::new(3, 0.1)).unwrap();
        let ret = booster.initialize(std::iter::empty(), false, "clarabel");
        assert!(matches!(ret, Err(BoostError::Configuration(_))));
    }

    #[test]
    fn test_initialize_failure_count() {
        let mut booster =
            MclpBoost::new(BoostConfig::new(3, 0.1)).unwrap();
        let ret = booster.initialize(["a", "b"], false, "clarabel");
        assert!(matches!(ret, Err(BoostError::Configuration(_))));
    }

    #[test]
    fn test_initialize_failure_solver() {
        let mut booster =
            MclpBoost::new(BoostConfig::new(3, 0.1)).unwrap();
        let ret = booster.initialize(["a", "b", "c"], false, "mosek");
        assert!(matches!(ret, Err(BoostError::Configuration(_))));
    }

    #[test]
    fn test_not_fitted_reads() {
        let mut booster =
            MclpBoost::new(BoostConfig::new(3, 0.1)).unwrap();
        booster.initialize(["a", "b", "c"], false, "clarabel").unwrap();
        assert!(matches!(booster.rho(), Err(BoostError::NotFitted(_))));
        assert!(matches!(booster.gamma(), Err(BoostError::NotFitted(_))));
        assert!(matches!(booster.weights(), Err(BoostError::NotFitted(_))));
        let ret = booster.predict(&[[1f64, 0f64, 0f64]]);
        assert!(matches!(ret, Err(BoostError::NotFitted(_))));
    }

    #[test]
    fn test_rejected_shape_leaves_registry() {
        let mut booster =
            MclpBoost::new(BoostConfig::new(3, 0.1)).unwrap();
        booster.initialize(["a", "b", "c"], false, "clarabel").unwrap();

        let wide = ScoreMatrix::from_rows(&[
            vec![1f64, 0f64, 0f64, 0f64],
            vec![0f64, 1f64, 0f64, 0f64],
            vec![0f64, 0f64, 1f64, 0f64],
        ]).unwrap();
        let ret = booster.add_classifier(wide);
        assert!(matches!(ret, Err(BoostError::Dimension(_))));
        assert_eq!(booster.n_classifiers(), 0);
    }

    #[test]
    fn test_update_without_classifiers_is_infeasible() {
        let mut booster =
            MclpBoost::new(BoostConfig::new(3, 0.1)).unwrap();
        booster.initialize(["a", "b", "c"], false, "clarabel").unwrap();
        // the simplex constraint Σ w = 1 has no column to satisfy it.
        let ret = booster.update();
        assert!(matches!(ret, Err(BoostError::Solve { .. })));
        assert!(matches!(booster.rho(), Err(BoostError::NotFitted(_))));
    }
}
