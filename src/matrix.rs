//! A validated, rectangular score matrix.

use serde::{Serialize, Deserialize};

use crate::error::BoostError;

/// An immutable row-major matrix of real-valued scores,
/// one row per training example and one column per label.
///
/// Conversion from nested rows is the only way to build an arbitrary
/// matrix, and it rejects empty or ragged input with
/// [`BoostError::Dimension`], so every `ScoreMatrix` in existence is
/// rectangular.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreMatrix {
    n_rows: usize,
    n_cols: usize,
    data: Vec<f64>,
}

impl ScoreMatrix {
    /// Builds a matrix from a slice of equal-length rows.
    ///
    /// Time complexity: `O(n_rows * n_cols)`.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, BoostError>
        where R: AsRef<[f64]>,
    {
        let n_rows = rows.len();
        if n_rows == 0 {
            return Err(BoostError::Dimension(
                "score matrix has no rows".into()
            ));
        }

        let n_cols = rows[0].as_ref().len();
        if n_cols == 0 {
            return Err(BoostError::Dimension(
                "score matrix has no columns".into()
            ));
        }

        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n_cols {
                return Err(BoostError::Dimension(format!(
                    "ragged score matrix: \
                    row 0 has {n_cols} columns but row {i} has {}",
                    row.len(),
                )));
            }
            data.extend_from_slice(row);
        }

        Ok(Self { n_rows, n_cols, data })
    }

    /// The `k × k` one-hot scoring matrix:
    /// each example's correct label scores `1.0`, all others `0.0`.
    pub fn identity(k: usize) -> Self {
        let mut data = vec![0f64; k * k];
        for i in 0..k {
            data[i * k + i] = 1f64;
        }
        Self { n_rows: k, n_cols: k, data }
    }

    /// Returns `(n_rows, n_cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// The score of example `i` for label index `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n_rows && j < self.n_cols);
        self.data[i * self.n_cols + j]
    }

    /// The score row of example `i`.
    pub fn row(&self, i: usize) -> &[f64] {
        assert!(i < self.n_rows);
        &self.data[i * self.n_cols..(i + 1) * self.n_cols]
    }
}

impl TryFrom<Vec<Vec<f64>>> for ScoreMatrix {
    type Error = BoostError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_success() {
        let matrix = ScoreMatrix::from_rows(&[
            vec![1f64, 0f64, 0f64],
            vec![0f64, 1f64, 0f64],
        ]).unwrap();
        assert_eq!(matrix.shape(), (2, 3));
        assert_eq!(matrix.get(1, 1), 1f64);
        assert_eq!(matrix.row(0), &[1f64, 0f64, 0f64]);
    }

    #[test]
    fn test_from_rows_failure_ragged() {
        let ret = ScoreMatrix::from_rows(&[
            vec![1f64, 0f64],
            vec![0f64],
        ]);
        assert!(matches!(ret, Err(BoostError::Dimension(_))));
    }

    #[test]
    fn test_from_rows_failure_empty() {
        let rows: Vec<Vec<f64>> = Vec::new();
        let ret = ScoreMatrix::from_rows(&rows);
        assert!(matches!(ret, Err(BoostError::Dimension(_))));
    }

    #[test]
    fn test_try_from_nested_vec() {
        let matrix: ScoreMatrix = vec![
            vec![0.5, 0.5],
            vec![0.1, 0.9],
        ].try_into().unwrap();
        assert_eq!(matrix.shape(), (2, 2));
    }

    #[test]
    fn test_identity() {
        let matrix = ScoreMatrix::identity(3);
        assert_eq!(matrix.shape(), (3, 3));
        for i in 0..3 {
            for j in 0..3 {
                let expect = if i == j { 1f64 } else { 0f64 };
                assert_eq!(matrix.get(i, j), expect);
            }
        }
    }
}
