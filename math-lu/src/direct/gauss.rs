//! Gaussian elimination without pivoting, with back-substitution

use crate::error::LuError;
use crate::matrix::check_square;
use ndarray::{ArrayViewMut1, ArrayViewMut2};

/// Solve `A·x = b` in place.
///
/// On success `b` holds `x` and `a` holds the same combined LU storage as
/// [`lu_in_place`](super::lu_in_place) would produce (up to rounding order).
/// Both inputs are overwritten; on error their contents are unspecified.
pub fn gauss_solve_in_place(
    mut a: ArrayViewMut2<'_, f64>,
    mut b: ArrayViewMut1<'_, f64>,
) -> Result<(), LuError> {
    let n = check_square(a.view())?;
    if b.len() != n {
        return Err(LuError::DimensionMismatch {
            expected: n,
            got: b.len(),
        });
    }

    for k in 0..n {
        let pivot = a[[k, k]];
        if pivot == 0.0 {
            return Err(LuError::SingularMatrix { step: k });
        }
        for i in (k + 1)..n {
            // The multiplier replaces the entry it eliminates
            a[[i, k]] /= pivot;
            let mult = a[[i, k]];
            for j in (k + 1)..n {
                let update = mult * a[[k, j]];
                a[[i, j]] -= update;
            }
            let update = mult * b[k];
            b[i] -= update;
        }
    }

    for i in (0..n).rev() {
        for j in (i + 1)..n {
            let update = a[[i, j]] * b[j];
            b[i] -= update;
        }
        b[i] /= a[[i, i]];
    }

    Ok(())
}
