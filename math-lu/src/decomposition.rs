//! Decomposition entry points and result types
//!
//! All functions here borrow the input matrix and factor a private copy, so
//! the caller's values survive the call. Use the kernels in [`crate::direct`]
//! to factor in place instead.

use crate::backend::{self, LuBackend, ReferenceBackend};
use crate::config::LuConfig;
use crate::direct::{lu_in_place, plu_in_place, unpack};
use crate::error::LuError;
use crate::matrix::{check_square, flatten, unflatten};
use crate::permutation::Permutation;
use ndarray::{Array1, Array2};

/// `A = L·U` without pivoting
#[derive(Debug, Clone, PartialEq)]
pub struct LuDecomposition {
    /// Unit lower-triangular factor
    pub l: Array2<f64>,
    /// Upper-triangular factor
    pub u: Array2<f64>,
}

/// `P·A = L·U` with partial pivoting
#[derive(Debug, Clone, PartialEq)]
pub struct PluDecomposition {
    /// Row permutation: row `i` of `P·A` is row `p[i]` of `A`
    pub p: Permutation,
    /// Unit lower-triangular factor
    pub l: Array2<f64>,
    /// Upper-triangular factor
    pub u: Array2<f64>,
}

/// Result of [`decompose`], shaped by the pivoting flag
#[derive(Debug, Clone, PartialEq)]
pub enum Decomposition {
    Lu(LuDecomposition),
    Plu(PluDecomposition),
}

impl Decomposition {
    pub fn l(&self) -> &Array2<f64> {
        match self {
            Decomposition::Lu(d) => &d.l,
            Decomposition::Plu(d) => &d.l,
        }
    }

    pub fn u(&self) -> &Array2<f64> {
        match self {
            Decomposition::Lu(d) => &d.u,
            Decomposition::Plu(d) => &d.u,
        }
    }

    /// Row permutation, present only for the pivoted variant
    pub fn permutation(&self) -> Option<&Permutation> {
        match self {
            Decomposition::Lu(_) => None,
            Decomposition::Plu(d) => Some(&d.p),
        }
    }

    /// Matrix dimension
    pub fn dim(&self) -> usize {
        self.u().nrows()
    }

    /// Solve `A·x = b` using the factors
    pub fn solve(&self, b: &Array1<f64>) -> Result<Array1<f64>, LuError> {
        let n = self.dim();
        if b.len() != n {
            return Err(LuError::DimensionMismatch {
                expected: n,
                got: b.len(),
            });
        }

        let mut x = match self.permutation() {
            Some(p) => p.apply_vec(b.view()),
            None => b.clone(),
        };
        let l = self.l();
        let u = self.u();

        // Forward substitution: Ly = Pb
        for i in 0..n {
            for j in 0..i {
                let update = l[[i, j]] * x[j];
                x[i] -= update;
            }
        }

        // Backward substitution: Ux = y
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                let update = u[[i, j]] * x[j];
                x[i] -= update;
            }
            let u_ii = u[[i, i]];
            if u_ii == 0.0 {
                return Err(LuError::SingularMatrix { step: i });
            }
            x[i] /= u_ii;
        }

        Ok(x)
    }

    /// Determinant of the original matrix
    pub fn determinant(&self) -> f64 {
        let diag: f64 = self.u().diag().iter().product();
        match self.permutation() {
            Some(p) => p.sign() * diag,
            None => diag,
        }
    }

    /// Multiply the factors back into the original matrix `A`
    pub fn reconstruct(&self) -> Array2<f64> {
        let lu = self.l().dot(self.u());
        match self.permutation() {
            Some(p) => p.inverse().apply_rows(lu.view()),
            None => lu,
        }
    }
}

/// Factor `a` with the given backend.
///
/// The matrix is copied into a row-major buffer, factored by `backend`, and
/// unpacked into L and U; with `pivot` set the permutation is returned too.
pub fn decompose(
    a: &Array2<f64>,
    pivot: bool,
    backend: &dyn LuBackend,
) -> Result<Decomposition, LuError> {
    let n = check_square(a.view())?;
    log::debug!(
        "LU decomposition: n={}, pivoting={}, backend={:?}",
        n,
        pivot,
        backend
    );

    let mut data = flatten(a.view());

    if pivot {
        let mut perm_buf = vec![0_i32; n];
        backend.factor(n, &mut data, Some(&mut perm_buf))?;
        let p = Permutation::from_c_buffer(&perm_buf)?;
        let combined = unflatten(n, data)?;
        let (l, u) = unpack(combined.view());
        Ok(Decomposition::Plu(PluDecomposition { p, l, u }))
    } else {
        backend.factor(n, &mut data, None)?;
        let combined = unflatten(n, data)?;
        let (l, u) = unpack(combined.view());
        Ok(Decomposition::Lu(LuDecomposition { l, u }))
    }
}

/// Factor `a` with the pivoting flag and backend taken from `config`
pub fn decompose_with_config(a: &Array2<f64>, config: &LuConfig) -> Result<Decomposition, LuError> {
    let backend = backend::from_config(&config.backend)?;
    decompose(a, config.pivoting, &*backend)
}

/// `A = L·U` without pivoting, using the pure-Rust kernel
pub fn lu(a: &Array2<f64>) -> Result<LuDecomposition, LuError> {
    let mut combined = a.clone();
    lu_in_place(combined.view_mut())?;
    let (l, u) = unpack(combined.view());
    Ok(LuDecomposition { l, u })
}

/// `P·A = L·U` with partial pivoting, using the pure-Rust kernel
pub fn plu(a: &Array2<f64>) -> Result<PluDecomposition, LuError> {
    let mut combined = a.clone();
    let p = plu_in_place(combined.view_mut())?;
    let (l, u) = unpack(combined.view());
    Ok(PluDecomposition { p, l, u })
}

/// Same as [`decompose`] with the [`ReferenceBackend`]
pub fn decompose_reference(a: &Array2<f64>, pivot: bool) -> Result<Decomposition, LuError> {
    decompose(a, pivot, &ReferenceBackend)
}
