//! Row permutations produced by partial pivoting
//!
//! A [`Permutation`] of length `n` is always a bijection on `[0, n)`. It is
//! read as "row `p[i]` of the original matrix becomes row `i`", so that
//! `P·A = L·U` where `P·A` is [`Permutation::apply_rows`] applied to `A`.

use crate::error::LuError;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use std::ops::Index;

/// Row permutation stored as a sequence of source-row indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    indices: Vec<usize>,
}

impl Permutation {
    /// Identity permutation of length `n`
    pub fn identity(n: usize) -> Self {
        Self {
            indices: (0..n).collect(),
        }
    }

    /// Build a permutation from source-row indices, checking it is a bijection
    pub fn from_indices(indices: Vec<usize>) -> Result<Self, LuError> {
        let n = indices.len();
        let mut seen = vec![false; n];
        for (index, &value) in indices.iter().enumerate() {
            if value >= n || seen[value] {
                return Err(LuError::InvalidPermutation {
                    index,
                    value: value as i64,
                });
            }
            seen[value] = true;
        }
        Ok(Self { indices })
    }

    /// Build a permutation from a C `int` buffer filled by a native engine
    pub fn from_c_buffer(buffer: &[i32]) -> Result<Self, LuError> {
        let indices = buffer
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                usize::try_from(value).map_err(|_| LuError::InvalidPermutation {
                    index,
                    value: i64::from(value),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_indices(indices)
    }

    /// Number of rows permuted
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    /// Exchange entries `a` and `b`; keeps the bijection invariant
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.indices.swap(a, b);
    }

    /// Compute `P·A`: row `i` of the result is row `p[i]` of `a`
    ///
    /// Panics if `a` does not have `len()` rows.
    pub fn apply_rows(&self, a: ArrayView2<'_, f64>) -> Array2<f64> {
        assert_eq!(a.nrows(), self.len(), "Row count must match permutation");
        a.select(Axis(0), &self.indices)
    }

    /// Compute `P·b` for a vector
    ///
    /// Panics if `b` does not have `len()` entries.
    pub fn apply_vec(&self, b: ArrayView1<'_, f64>) -> Array1<f64> {
        assert_eq!(b.len(), self.len(), "Vector length must match permutation");
        self.indices.iter().map(|&src| b[src]).collect()
    }

    /// Explicit permutation matrix with `M[i][p[i]] = 1`
    pub fn to_matrix(&self) -> Array2<f64> {
        let n = self.len();
        let mut m = Array2::zeros((n, n));
        for (i, &src) in self.indices.iter().enumerate() {
            m[[i, src]] = 1.0;
        }
        m
    }

    /// Inverse permutation, so that `inverse().apply_rows(P·A) == A`
    pub fn inverse(&self) -> Self {
        let mut inv = vec![0; self.len()];
        for (i, &src) in self.indices.iter().enumerate() {
            inv[src] = i;
        }
        Self { indices: inv }
    }

    /// Determinant of the permutation matrix: `+1.0` for even, `-1.0` for odd
    pub fn sign(&self) -> f64 {
        let n = self.len();
        let mut visited = vec![false; n];
        let mut transpositions = 0;
        for start in 0..n {
            if visited[start] {
                continue;
            }
            let mut cycle_len = 0;
            let mut i = start;
            while !visited[i] {
                visited[i] = true;
                i = self.indices[i];
                cycle_len += 1;
            }
            transpositions += cycle_len - 1;
        }
        if transpositions % 2 == 0 { 1.0 } else { -1.0 }
    }
}

impl Index<usize> for Permutation {
    type Output = usize;

    fn index(&self, i: usize) -> &usize {
        &self.indices[i]
    }
}
