//! Numeric tolerances and defaults used across this crate.

pub const SIMPLEX_TOLERANCE: f64 = 1e-5;
pub const NUMERIC_TOLERANCE: f64 = 1e-5;

pub const DEFAULT_WEIGHT_SHARING: bool = true;
