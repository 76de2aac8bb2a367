//! [`LpSolver`] backed by the `clarabel` conic interior-point solver.

use clarabel::algebra::*;
use clarabel::solver::*;

use super::program::{
    LinearProgram,
    LpSolution,
    LpSolver,
    LpStatus,
    RowBlock,
};

/// The `clarabel` backend.
///
/// `clarabel` is interior-point-only, so the `interior_point` flag is a
/// profile selection rather than an algorithm switch: the barrier profile
/// runs without presolve and without crossover, accepting reduced-accuracy
/// (`AlmostSolved`) termination as optimal, while the default profile
/// demands a fully `Solved` certificate.
pub struct ClarabelSolver {
    interior_point: bool,
}

impl ClarabelSolver {
    /// Constructs the backend with the requested solve profile.
    pub fn new(interior_point: bool) -> Self {
        Self { interior_point }
    }

    fn settings(&self) -> DefaultSettings<f64> {
        let mut builder = DefaultSettingsBuilder::default();
        builder.equilibrate_enable(true)
            .verbose(false);
        if self.interior_point {
            builder.presolve_enable(false);
        }
        builder.build().unwrap()
    }

    fn classify(&self, status: SolverStatus) -> LpStatus {
        match status {
            SolverStatus::Solved => LpStatus::Optimal,
            SolverStatus::AlmostSolved if self.interior_point
                => LpStatus::Optimal,
            SolverStatus::PrimalInfeasible
            | SolverStatus::AlmostPrimalInfeasible
                => LpStatus::Infeasible,
            SolverStatus::DualInfeasible
            | SolverStatus::AlmostDualInfeasible
                => LpStatus::Unbounded,
            _ => LpStatus::SolverError,
        }
    }
}

impl LpSolver for ClarabelSolver {
    fn name(&self) -> &str {
        "clarabel"
    }

    fn solve(&self, lp: &LinearProgram) -> LpSolution {
        let matrix = CscMatrix::new(
            lp.n_rows,
            lp.n_cols,
            lp.col_ptr.clone(),
            lp.row_idx.clone(),
            lp.values.clone(),
        );
        // An LP has no quadratic term.
        let quad = CscMatrix::<f64>::zeros((lp.n_cols, lp.n_cols));

        let cones = lp.blocks.iter()
            .map(|block| match *block {
                RowBlock::Equality(n)   => ZeroConeT(n),
                RowBlock::Inequality(n) => NonnegativeConeT(n),
            })
            .collect::<Vec<_>>();

        let settings = self.settings();
        let mut solver = DefaultSolver::new(
            &quad,
            &lp.objective,
            &matrix,
            &lp.rhs,
            &cones,
            settings,
        );
        solver.solve();

        let status = self.classify(solver.solution.status);
        if status == LpStatus::Optimal {
            LpSolution {
                status,
                primal: solver.solution.x.clone(),
                dual: solver.solution.z.clone(),
                objective_value: solver.solution.obj_val,
            }
        } else {
            LpSolution {
                status,
                primal: Vec::new(),
                dual: Vec::new(),
                objective_value: f64::NAN,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // min -x  s.t.  x ≤ 1,  -x ≤ 0.
    fn bounded_program() -> LinearProgram {
        LinearProgram {
            n_rows: 2,
            n_cols: 1,
            objective: vec![-1f64],
            col_ptr: vec![0, 2],
            row_idx: vec![0, 1],
            values: vec![1f64, -1f64],
            blocks: vec![RowBlock::Inequality(2)],
            rhs: vec![1f64, 0f64],
        }
    }

    #[test]
    fn test_solve_bounded() {
        let solver = ClarabelSolver::new(false);
        let solution = solver.solve(&bounded_program());
        assert_eq!(solution.status, LpStatus::Optimal);
        assert!((solution.primal[0] - 1f64).abs() < 1e-6);
        assert!((solution.objective_value + 1f64).abs() < 1e-6);
    }

    #[test]
    fn test_solve_infeasible() {
        // x = 1 and x = 2 cannot both hold.
        let lp = LinearProgram {
            n_rows: 2,
            n_cols: 1,
            objective: vec![0f64],
            col_ptr: vec![0, 2],
            row_idx: vec![0, 1],
            values: vec![1f64, 1f64],
            blocks: vec![RowBlock::Equality(2)],
            rhs: vec![1f64, 2f64],
        };
        let solver = ClarabelSolver::new(false);
        let solution = solver.solve(&lp);
        assert_eq!(solution.status, LpStatus::Infeasible);
        assert!(solution.primal.is_empty());
    }

    #[test]
    fn test_solve_unbounded() {
        // min -x  s.t.  -x ≤ 0.
        let lp = LinearProgram {
            n_rows: 1,
            n_cols: 1,
            objective: vec![-1f64],
            col_ptr: vec![0, 1],
            row_idx: vec![0],
            values: vec![-1f64],
            blocks: vec![RowBlock::Inequality(1)],
            rhs: vec![0f64],
        };
        let solver = ClarabelSolver::new(false);
        let solution = solver.solve(&lp);
        assert_eq!(solution.status, LpStatus::Unbounded);
    }

    #[test]
    fn test_barrier_profile_solves_too() {
        let solver = ClarabelSolver::new(true);
        let solution = solver.solve(&bounded_program());
        assert_eq!(solution.status, LpStatus::Optimal);
        assert!((solution.primal[0] - 1f64).abs() < 1e-6);
    }
}
