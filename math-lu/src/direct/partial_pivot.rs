//! LU factorization with partial pivoting (right-looking elimination)
//!
//! Computes `P·A = L·U` in place. At every step the remaining row with the
//! largest magnitude in the pivot column is swapped into place, which keeps
//! every multiplier bounded by one.

use crate::error::LuError;
use crate::matrix::check_square;
use crate::permutation::Permutation;
use ndarray::ArrayViewMut2;

/// Factor `a` in place into combined LU storage of the row-permuted matrix.
///
/// Returns the permutation `p` such that row `i` of `P·A` is row `p[i]` of the
/// original `a`. Ties in the pivot search resolve to the lowest row index.
///
/// Only an exactly zero pivot column is an error; tiny pivots are accepted.
/// The input values do not survive the call, and on error the contents of `a`
/// are unspecified (rows may already have been swapped and eliminated).
pub fn plu_in_place(mut a: ArrayViewMut2<'_, f64>) -> Result<Permutation, LuError> {
    let n = check_square(a.view())?;
    let mut perm = Permutation::identity(n);

    for k in 0..n {
        let mut max_row = k;
        for i in (k + 1)..n {
            if a[[i, k]].abs() > a[[max_row, k]].abs() {
                max_row = i;
            }
        }

        if a[[max_row, k]] == 0.0 {
            return Err(LuError::SingularMatrix { step: k });
        }

        if max_row != k {
            for j in 0..n {
                a.swap([k, j], [max_row, j]);
            }
            perm.swap(k, max_row);
            log::trace!("pivot step {}: swapped rows {} and {}", k, k, max_row);
        }

        let pivot = a[[k, k]];
        for i in (k + 1)..n {
            a[[i, k]] /= pivot;
            let mult = a[[i, k]];
            for j in (k + 1)..n {
                let update = mult * a[[k, j]];
                a[[i, j]] -= update;
            }
        }
    }

    Ok(perm)
}
