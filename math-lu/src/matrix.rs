//! Dense matrix helpers shared by the decomposers and backends
//!
//! Matrices are `ndarray` arrays with row-major semantics (row index outer,
//! column index inner). Native engines see the same data as a flat row-major
//! buffer of `n * n` values.

use crate::error::LuError;
use ndarray::{Array2, ArrayView2, ArrayViewMut2};

/// Check that `a` is a non-empty square matrix and return its dimension
pub fn check_square(a: ArrayView2<'_, f64>) -> Result<usize, LuError> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(LuError::DimensionMismatch {
            expected: rows,
            got: cols,
        });
    }
    if rows == 0 {
        return Err(LuError::EmptyMatrix);
    }
    Ok(rows)
}

/// Copy a matrix into a row-major flat buffer
///
/// Works for any memory layout of `a` (including transposed or strided views).
pub fn flatten(a: ArrayView2<'_, f64>) -> Vec<f64> {
    a.iter().copied().collect()
}

/// Rebuild an `n x n` matrix from a row-major flat buffer
pub fn unflatten(n: usize, data: Vec<f64>) -> Result<Array2<f64>, LuError> {
    let len = data.len();
    Array2::from_shape_vec((n, n), data).map_err(|_| LuError::DimensionMismatch {
        expected: n * n,
        got: len,
    })
}

/// Borrow a row-major flat buffer as an `n x n` mutable matrix view
pub fn square_view_mut(n: usize, data: &mut [f64]) -> Result<ArrayViewMut2<'_, f64>, LuError> {
    let len = data.len();
    ArrayViewMut2::from_shape((n, n), data).map_err(|_| LuError::DimensionMismatch {
        expected: n * n,
        got: len,
    })
}

/// Frobenius norm of `a - b`
///
/// Panics if the shapes differ.
pub fn frobenius_distance(a: ArrayView2<'_, f64>, b: ArrayView2<'_, f64>) -> f64 {
    assert_eq!(a.dim(), b.dim(), "Matrix shapes must match for distance");
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
