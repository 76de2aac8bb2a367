//! The combined hypothesis produced by the boosting engine.

use serde::{Serialize, Deserialize};

use crate::error::BoostError;

/// Weighted arg-max over per-classifier, per-label scores.
/// Ties break to the lowest label index.
///
/// `weights[j]` holds one entry when the ensemble shares a weight across
/// labels, or one entry per label otherwise.
pub(crate) fn weighted_arg_max<S>(
    weights: &[Vec<f64>],
    weight_sharing: bool,
    n_classes: usize,
    scores_per_classifier: &[S],
) -> Result<usize, BoostError>
    where S: AsRef<[f64]>,
{
    if scores_per_classifier.len() != weights.len() {
        return Err(BoostError::Dimension(format!(
            "got scores for {} classifiers but the ensemble blends {}",
            scores_per_classifier.len(),
            weights.len(),
        )));
    }

    let mut totals = vec![0f64; n_classes];
    for (j, row) in scores_per_classifier.iter().enumerate() {
        let row = row.as_ref();
        if row.len() != n_classes {
            return Err(BoostError::Dimension(format!(
                "classifier {j} supplied {} label scores, expected {n_classes}",
                row.len(),
            )));
        }
        for (y, score) in row.iter().enumerate() {
            let weight = if weight_sharing {
                weights[j][0]
            } else {
                weights[j][y]
            };
            totals[y] += weight * score;
        }
    }

    let mut best = 0;
    for y in 1..n_classes {
        if totals[y] > totals[best] {
            best = y;
        }
    }
    Ok(best)
}

/// A weighted ensemble over a fixed label set, detached from the engine
/// that learned it.  You can read/write this struct by `Serde` trait.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedEnsemble<L> {
    labels: Vec<L>,
    weights: Vec<Vec<f64>>,
    weight_sharing: bool,
}

impl<L> WeightedEnsemble<L> {
    pub(crate) fn from_parts(
        labels: Vec<L>,
        weights: Vec<Vec<f64>>,
        weight_sharing: bool,
    ) -> Self {
        Self { labels, weights, weight_sharing }
    }

    /// The label set, in its declared order.
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Blending weights, indexed `[classifier][label]`
    /// (a single entry per classifier when weights are shared).
    pub fn weights(&self) -> &[Vec<f64>] {
        &self.weights
    }

    /// Number of blended weak classifiers.
    pub fn n_classifiers(&self) -> usize {
        self.weights.len()
    }

    /// Classifies one example from its per-classifier label scores:
    /// the weighted per-label sums are formed and the arg-max label is
    /// returned, ties broken by the lowest label index.
    pub fn predict<S>(&self, scores_per_classifier: &[S])
        -> Result<L, BoostError>
        where S: AsRef<[f64]>,
              L: Clone,
    {
        let best = weighted_arg_max(
            &self.weights,
            self.weight_sharing,
            self.labels.len(),
            scores_per_classifier,
        )?;
        Ok(self.labels[best].clone())
    }
}
