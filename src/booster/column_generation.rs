//! Incremental construction of the multiclass soft-margin LP.
//!
//! The engine solves
//!
//! ```txt
//! min  -ρ + D Σ_n ξ_n,    D = 1 / (ν N)
//! s.t. Σ_j w_j (u_j[n][y_n] - u_j[n][y]) ≥ ρ - ξ_n,   ∀n, ∀y ≠ y_n
//!      Σ_j w_j = 1,
//!      w ≥ 0,  ξ ≥ 0,
//! ```
//!
//! where `u_j[n][y]` is the score classifier `j` assigns to label `y` on
//! example `n` and `y_n` is the correct label of example `n`.  Without
//! weight sharing the single weight `w_j` splits into one weight per
//! (classifier, label) pair and the simplex constraint holds per label.
//!
//! The variable order is chosen so that adding a classifier appends
//! *columns*, never touching rows already emitted (column generation):
//!
//! ```txt
//! # of
//! rows      ρ   ξ1  ... ξN        w1       ...       wW
//!         ┏   ┃           ┃                             ┓   ┏   ┓
//!         ┃ 1 ┃ -1  ...  0 ┃ -margin_1(1,y) ...         ┃ ≤ ┃ 0 ┃
//! N(K-1)  ┃ . ┃  .  .    . ┃       .        ...    .    ┃ . ┃ . ┃
//!         ┃ 1 ┃  0  ... -1 ┃ -margin_1(N,y) ...         ┃ ≤ ┃ 0 ┃
//!        ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//!  S      ┃ 0 ┃  0  ...  0 ┃       1        ...    1    ┃ = ┃ 1 ┃
//!        ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//!         ┃ 0 ┃ -1  ...  0 ┃                             ┃ ≤ ┃ 0 ┃
//!  N      ┃ . ┃  .  .    . ┃           O                 ┃ . ┃ . ┃
//!         ┃ 0 ┃  0  ... -1 ┃                             ┃ ≤ ┃ 0 ┃
//!        ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//!         ┃ 0 ┃            ┃      -1        ...    0    ┃ ≤ ┃ 0 ┃
//!  W      ┃ . ┃      O     ┃       .        ...    .    ┃ . ┃ . ┃
//!         ┃ 0 ┃            ┃       0        ...   -1    ┃ ≤ ┃ 0 ┃
//!         ┗   ┃            ┃                             ┛   ┗   ┛
//! ```
//!
//! `S` is the number of simplex rows (1 with weight sharing, K without)
//! and `W` the number of weight columns emitted so far.  The margin rows,
//! simplex rows and `ξ` rows are laid down once; only the trailing
//! weight-nonnegativity block grows with `W`, and the row index of each
//! weight row never changes once assigned.  The persistent CSC arena
//! therefore stays valid across appends, and a solve takes a cheap clone.

use std::iter;

use crate::matrix::ScoreMatrix;
use crate::solver::{LinearProgram, RowBlock};

pub(super) struct ColumnGeneration {
    // correct label index of each training example
    example_labels: Vec<usize>,
    n_classes: usize,
    weight_sharing: bool,
    slack_penalty: f64,

    // persistent CSC arena over [ρ, ξ_1, ..., ξ_N, weight columns]
    col_ptr: Vec<usize>,
    row_idx: Vec<usize>,
    values: Vec<f64>,

    n_weight_cols: usize,
}

impl ColumnGeneration {
    /// Lays down the `ρ` and `ξ` columns.  Weight columns arrive later
    /// through [`ColumnGeneration::append_classifier`].
    pub(super) fn new(
        example_labels: Vec<usize>,
        n_classes: usize,
        nu: f64,
        weight_sharing: bool,
    ) -> Self {
        let n_examples = example_labels.len();
        let slack_penalty = 1f64 / (nu * n_examples as f64);

        let mut this = Self {
            example_labels,
            n_classes,
            weight_sharing,
            slack_penalty,

            col_ptr: vec![0],
            row_idx: Vec::new(),
            values: Vec::new(),

            n_weight_cols: 0,
        };

        // column for `ρ`: +1 in every margin row.
        for row in 0..this.n_margin_rows() {
            this.row_idx.push(row);
            this.values.push(1f64);
        }

        // columns for `ξ.`: -1 in the margin rows of the owning example,
        // -1 in its own nonnegativity row.
        for n in 0..n_examples {
            this.col_ptr.push(this.row_idx.len());

            let correct = this.example_labels[n];
            for y in 0..this.n_classes {
                if y == correct {
                    continue;
                }
                this.row_idx.push(this.margin_row(n, y));
                this.values.push(-1f64);
            }

            this.row_idx.push(this.xi_row(n));
            this.values.push(-1f64);
        }

        this
    }

    pub(super) fn n_examples(&self) -> usize {
        self.example_labels.len()
    }

    fn n_margin_rows(&self) -> usize {
        self.n_examples() * (self.n_classes - 1)
    }

    fn n_simplex_rows(&self) -> usize {
        if self.weight_sharing { 1 } else { self.n_classes }
    }

    fn n_rows(&self) -> usize {
        self.n_margin_rows()
            + self.n_simplex_rows()
            + self.n_examples()
            + self.n_weight_cols
    }

    fn n_cols(&self) -> usize {
        1 + self.n_examples() + self.n_weight_cols
    }

    /// Row of the constraint `ρ - ξ_n - margin(n, y) ≤ 0`,
    /// where `y` is a wrong label of example `n`.
    fn margin_row(&self, n: usize, y: usize) -> usize {
        let correct = self.example_labels[n];
        debug_assert!(y != correct);
        let offset = if y < correct { y } else { y - 1 };
        n * (self.n_classes - 1) + offset
    }

    fn simplex_row(&self, class: usize) -> usize {
        self.n_margin_rows() + class
    }

    fn xi_row(&self, n: usize) -> usize {
        self.n_margin_rows() + self.n_simplex_rows() + n
    }

    fn weight_row(&self, j: usize) -> usize {
        self.n_margin_rows() + self.n_simplex_rows() + self.n_examples() + j
    }

    /// Appends the column block of one weak classifier:
    /// a single shared-weight column, or one column per label.
    /// Rows emitted by earlier calls are reused unchanged.
    pub(super) fn append_classifier(&mut self, scores: &ScoreMatrix) {
        if self.weight_sharing {
            self.append_shared_column(scores);
        } else {
            for class in 0..self.n_classes {
                self.append_class_column(scores, class);
            }
        }
    }

    fn append_shared_column(&mut self, scores: &ScoreMatrix) {
        self.col_ptr.push(self.row_idx.len());

        for n in 0..self.n_examples() {
            let correct = self.example_labels[n];
            for y in 0..self.n_classes {
                if y == correct {
                    continue;
                }
                self.row_idx.push(self.margin_row(n, y));
                self.values.push(-(scores.get(n, correct) - scores.get(n, y)));
            }
        }

        self.row_idx.push(self.simplex_row(0));
        self.values.push(1f64);

        self.row_idx.push(self.weight_row(self.n_weight_cols));
        self.values.push(-1f64);

        self.n_weight_cols += 1;
    }

    /// One column of the per-label weight block `A_{j,class}`.
    /// When `class` is the correct label of example `n`, the weight
    /// scales the correct-label score in every margin row of `n`;
    /// otherwise it scales the wrong-label score in the single margin
    /// row pitting `n` against `class`.
    fn append_class_column(&mut self, scores: &ScoreMatrix, class: usize) {
        self.col_ptr.push(self.row_idx.len());

        for n in 0..self.n_examples() {
            let correct = self.example_labels[n];
            if class == correct {
                for y in 0..self.n_classes {
                    if y == correct {
                        continue;
                    }
                    self.row_idx.push(self.margin_row(n, y));
                    self.values.push(-scores.get(n, correct));
                }
            } else {
                self.row_idx.push(self.margin_row(n, class));
                self.values.push(scores.get(n, class));
            }
        }

        self.row_idx.push(self.simplex_row(class));
        self.values.push(1f64);

        self.row_idx.push(self.weight_row(self.n_weight_cols));
        self.values.push(-1f64);

        self.n_weight_cols += 1;
    }

    /// Clones the arena into a standard-form [`LinearProgram`]
    /// over the current classifier pool.
    pub(super) fn snapshot(&self) -> LinearProgram {
        let col_ptr = {
            let mut col_ptr = self.col_ptr.clone();
            col_ptr.push(self.row_idx.len());
            col_ptr
        };

        LinearProgram {
            n_rows: self.n_rows(),
            n_cols: self.n_cols(),
            objective: self.objective(),
            col_ptr,
            row_idx: self.row_idx.clone(),
            values: self.values.clone(),
            blocks: vec![
                RowBlock::Inequality(self.n_margin_rows()),
                RowBlock::Equality(self.n_simplex_rows()),
                RowBlock::Inequality(self.n_examples()),
                RowBlock::Inequality(self.n_weight_cols),
            ],
            rhs: self.rhs(),
        }
    }

    fn objective(&self) -> Vec<f64> {
        iter::once(-1f64)
            .chain(iter::repeat(self.slack_penalty).take(self.n_examples()))
            .chain(iter::repeat(0f64).take(self.n_weight_cols))
            .collect()
    }

    fn rhs(&self) -> Vec<f64> {
        let mut rhs = vec![0f64; self.n_rows()];
        for class in 0..self.n_simplex_rows() {
            rhs[self.simplex_row(class)] = 1f64;
        }
        rhs
    }
}
