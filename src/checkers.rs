//! Post-solve invariant checks.
//!
//! These panic rather than return errors: a violation means a solver
//! backend broke its contract, not that a caller misused the API.

use crate::constants::{
    NUMERIC_TOLERANCE,
    SIMPLEX_TOLERANCE,
};

/// Check that `slice` lies on the probability simplex within tolerance.
#[inline(always)]
pub fn simplex_condition(slice: &[f64]) {
    let sum = slice.iter().sum::<f64>();
    assert!(
        (sum - 1f64).abs() < SIMPLEX_TOLERANCE,
        "sum(weights[..]) = {sum}"
    );

    let ub = 1f64 + NUMERIC_TOLERANCE;
    assert!(
        slice.iter().all(|w| (0f64..=ub).contains(w)),
        "simplex condition is violated! all weights must be in [0, {ub}]. \
        weights = {slice:?}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplex_success() {
        simplex_condition(&[0.25, 0.25, 0.5]);
    }

    #[test]
    fn test_simplex_success_within_tolerance() {
        simplex_condition(&[0.5, 0.5 + 1e-9]);
    }

    #[test]
    #[should_panic]
    fn test_simplex_failure_sum() {
        simplex_condition(&[0.5, 0.6]);
    }

    #[test]
    #[should_panic]
    fn test_simplex_failure_negative() {
        simplex_condition(&[1.5, -0.5]);
    }
}
