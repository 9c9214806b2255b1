//! LU factorization without pivoting (Doolittle, column-broadcast order)
//!
//! At step `k` the row `k` of U is finalized from the already computed rows
//! of U and columns of L, then column `k` of L is computed and scaled by the
//! pivot. Accesses along row `k` are sequential, which suits row-major storage.

use crate::error::LuError;
use crate::matrix::check_square;
use ndarray::ArrayViewMut2;

/// Factor `a` in place into combined LU storage, without row exchanges.
///
/// On success the strictly lower part of `a` holds the multipliers of the
/// unit lower-triangular L and the diagonal and upper part hold U.
///
/// The input values do not survive the call. On error the contents of `a` are
/// unspecified (rows before the failing step are already eliminated).
///
/// An exactly zero pivot is reported as [`LuError::SingularMatrix`] at every
/// step, including the last one. Classic in-place Doolittle codes divide by
/// the zero pivot and let infinities and NaNs flow into L instead; this
/// function stops before the division so both decomposers agree on what a
/// singular input is. Matrices that are nonsingular but need a row exchange
/// (for example a zero in the top-left corner) are rejected the same way; use
/// [`plu_in_place`](super::plu_in_place) for those.
pub fn lu_in_place(mut a: ArrayViewMut2<'_, f64>) -> Result<(), LuError> {
    let n = check_square(a.view())?;

    for k in 0..n {
        // U[k][i] -= L[k][j] * U[j][i]
        for i in k..n {
            for j in 0..k {
                let update = a[[k, j]] * a[[j, i]];
                a[[k, i]] -= update;
            }
        }

        let pivot = a[[k, k]];
        if pivot == 0.0 {
            return Err(LuError::SingularMatrix { step: k });
        }

        // L[i][k] = (A[i][k] - L[i][j] * U[j][k]) / U[k][k]
        for i in (k + 1)..n {
            for j in 0..k {
                let update = a[[i, j]] * a[[j, k]];
                a[[i, k]] -= update;
            }
            a[[i, k]] /= pivot;
        }
    }

    Ok(())
}

/// Multiply combined LU storage back into `A = L·U`, in place.
///
/// This is the exact inverse traversal of [`lu_in_place`]: after it returns,
/// `a` holds (up to rounding) the matrix that was originally factored.
pub fn reconstruct_in_place(mut a: ArrayViewMut2<'_, f64>) -> Result<(), LuError> {
    let n = check_square(a.view())?;

    for k in (0..n).rev() {
        for i in (k + 1)..n {
            a[[i, k]] *= a[[k, k]];
            for j in 0..k {
                let update = a[[i, j]] * a[[j, k]];
                a[[i, k]] += update;
            }
        }
        for i in k..n {
            for j in 0..k {
                let update = a[[k, j]] * a[[j, i]];
                a[[k, i]] += update;
            }
        }
    }

    Ok(())
}
