//! C ABI for the LU kernels.
//!
//! Builds a shared library exporting the two entry points expected by the
//! `math-audio-lu` native backend:
//!
//! ```c
//! void lu_in_place(int n, double *A);
//! void plu(int n, double *A, int *P);
//! ```
//!
//! `A` is a row-major `n x n` buffer factored in place into combined LU
//! storage; `P` receives the row permutation. Neither call can report an
//! error: on an exactly zero pivot at step `k` elimination stops with
//! `A[k][k] == 0`, which is how callers detect singular input.

#![warn(missing_docs)]

use math_audio_lu::matrix::square_view_mut;
use math_audio_lu::{lu_in_place as lu_kernel, plu_in_place as plu_kernel};
use std::ffi::c_int;

/// Borrow the raw matrix buffer, rejecting null pointers and empty sizes
///
/// # Safety
///
/// If `a` is non-null it must point to `n * n` writable doubles.
unsafe fn matrix_slice<'a>(n: c_int, a: *mut f64) -> Option<(usize, &'a mut [f64])> {
    let n = usize::try_from(n).ok().filter(|&n| n > 0)?;
    if a.is_null() {
        return None;
    }
    Some((n, unsafe { std::slice::from_raw_parts_mut(a, n * n) }))
}

/// Factor `A = L·U` in place without pivoting.
///
/// # Safety
///
/// `a` must point to `n * n` writable doubles in row-major order.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lu_in_place(n: c_int, a: *mut f64) {
    let Some((n, data)) = (unsafe { matrix_slice(n, a) }) else {
        return;
    };
    let Ok(view) = square_view_mut(n, data) else {
        return;
    };
    if let Err(e) = lu_kernel(view) {
        log::debug!("lu_in_place stopped: {}", e);
    }
}

/// Factor `P·A = L·U` in place with partial pivoting.
///
/// `p` is filled with the identity first and then with the final row
/// permutation when elimination completes.
///
/// # Safety
///
/// `a` must point to `n * n` writable doubles in row-major order and `p` to
/// `n` writable ints.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn plu(n: c_int, a: *mut f64, p: *mut c_int) {
    if p.is_null() {
        return;
    }
    let Some((n, data)) = (unsafe { matrix_slice(n, a) }) else {
        return;
    };
    let perm_out = unsafe { std::slice::from_raw_parts_mut(p, n) };
    for (i, slot) in perm_out.iter_mut().enumerate() {
        // n fits in c_int, so every index does too
        *slot = i as c_int;
    }

    let Ok(view) = square_view_mut(n, data) else {
        return;
    };
    match plu_kernel(view) {
        Ok(perm) => {
            for (slot, &src) in perm_out.iter_mut().zip(perm.as_slice()) {
                *slot = src as c_int;
            }
        }
        Err(e) => log::debug!("plu stopped: {}", e),
    }
}
