//! The LP solver boundary.
//!
//! The boosting engine depends only on the abstract contract defined
//! here: hand a [`LinearProgram`] to an [`LpSolver`], get back an
//! [`LpSolution`] with a status, a primal vector, and dual values.
//! Any conforming backend can be substituted through [`backend`].

mod program;
mod clarabel_backend;

pub use program::{
    LinearProgram,
    LpSolution,
    LpSolver,
    LpStatus,
    RowBlock,
};
pub use clarabel_backend::ClarabelSolver;

use crate::error::BoostError;

/// Returns the LP backend registered under `name`.
///
/// Currently only `"clarabel"` is recognized; any other name fails with
/// [`BoostError::Configuration`].  The `interior_point` flag selects the
/// backend's barrier profile, see [`ClarabelSolver`].
pub fn backend(
    name: &str,
    interior_point: bool,
) -> Result<Box<dyn LpSolver>, BoostError>
{
    match name {
        "clarabel" => Ok(Box::new(ClarabelSolver::new(interior_point))),
        unknown => Err(BoostError::Configuration(format!(
            "unsupported solver type \"{unknown}\" (available: \"clarabel\")"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_success() {
        let solver = backend("clarabel", false).unwrap();
        assert_eq!(solver.name(), "clarabel");
    }

    #[test]
    fn test_backend_failure_unknown() {
        let ret = backend("cplex", false);
        assert!(matches!(ret, Err(BoostError::Configuration(_))));
    }
}
