//! The standard-form LP snapshot handed to a solver backend.

use serde::{Serialize, Deserialize};

/// A contiguous block of constraint rows sharing one sense.
/// Blocks are listed top-to-bottom; their counts sum to the row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowBlock {
    /// Rows of the form `a·x = b`.
    Equality(usize),
    /// Rows of the form `a·x ≤ b`.
    Inequality(usize),
}

impl RowBlock {
    /// Number of rows in this block.
    pub fn len(&self) -> usize {
        match *self {
            RowBlock::Equality(n) | RowBlock::Inequality(n) => n,
        }
    }

    /// `true` if the block spans no row.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A linear program `min cᵗx  s.t.  Ax {≤,=} b` with `A` in compressed
/// sparse column form.  Variable bounds are encoded as explicit rows.
///
/// A `LinearProgram` is a read-only snapshot: the boosting engine clones
/// its incremental state into one of these per solve, and the backend
/// never receives a handle into engine state.
#[derive(Debug, Clone)]
pub struct LinearProgram {
    /// Number of constraint rows.
    pub n_rows: usize,
    /// Number of variables.
    pub n_cols: usize,
    /// Objective coefficients `c`, one per variable.
    pub objective: Vec<f64>,
    /// CSC column pointers of `A`; length `n_cols + 1`.
    pub col_ptr: Vec<usize>,
    /// CSC row indices, ascending within each column.
    pub row_idx: Vec<usize>,
    /// CSC non-zero values.
    pub values: Vec<f64>,
    /// Row senses, grouped top-to-bottom.
    pub blocks: Vec<RowBlock>,
    /// Right-hand side `b`, one entry per row.
    pub rhs: Vec<f64>,
}

/// Outcome classification of a single LP solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LpStatus {
    /// A primal/dual optimal solution was found.
    Optimal,
    /// The program has no feasible point.
    Infeasible,
    /// The objective is unbounded below.
    Unbounded,
    /// The backend gave up: iteration limit, numerical trouble, etc.
    SolverError,
}

/// The solution object a backend returns.  Freshly allocated per solve.
#[derive(Debug, Clone)]
pub struct LpSolution {
    /// Outcome of the solve.
    pub status: LpStatus,
    /// Primal values, one per variable.
    /// Empty unless `status` is [`LpStatus::Optimal`].
    pub primal: Vec<f64>,
    /// Dual values, one per row.
    /// Empty unless `status` is [`LpStatus::Optimal`].
    pub dual: Vec<f64>,
    /// Objective value `cᵗx` at the returned point.
    /// `NaN` unless `status` is [`LpStatus::Optimal`].
    pub objective_value: f64,
}

/// The contract an LP backend must satisfy.
///
/// A backend accepts a [`LinearProgram`] and classifies the outcome into
/// [`LpStatus`].  The boosting engine treats anything other than
/// [`LpStatus::Optimal`] as a hard failure of `update`.
pub trait LpSolver {
    /// The backend name as accepted by `initialize`.
    fn name(&self) -> &str;

    /// Solve `lp` and return a fresh solution object.
    fn solve(&self, lp: &LinearProgram) -> LpSolution;
}
