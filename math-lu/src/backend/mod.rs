//! Execution backends for the in-place factorization
//!
//! A backend factors a row-major flat buffer in place. Two implementations
//! exist:
//! - [`ReferenceBackend`]: the pure-Rust kernels from [`crate::direct`]
//! - [`NativeBackend`] (feature `native`): an external engine loaded from a
//!   shared library, called through the C contract
//!   `void lu_in_place(int n, double *A)` / `void plu(int n, double *A, int *P)`
//!
//! The decomposition entry points flatten, factor, unflatten and unpack
//! identically whichever backend is selected.

mod reference;

#[cfg(feature = "native")]
mod native;

pub use reference::ReferenceBackend;

#[cfg(feature = "native")]
pub use native::{LU_SYMBOL, LuInPlaceFn, NativeBackend, PLU_SYMBOL, PluFn};

use crate::config::BackendConfig;
use crate::error::LuError;
use std::fmt::Debug;

/// Capability to factor a dense matrix stored as a row-major flat buffer.
pub trait LuBackend: Send + Sync + Debug {
    /// Factor the `n x n` buffer `data` in place into combined LU storage.
    ///
    /// With `permutation` set to `None` the no-pivot variant is used. With a
    /// buffer of length `n` the partially pivoted variant is used and the
    /// buffer receives the final row permutation (identity-initialized, then
    /// swapped along with the rows).
    ///
    /// On error the buffers hold unspecified values.
    fn factor(
        &self,
        n: usize,
        data: &mut [f64],
        permutation: Option<&mut [i32]>,
    ) -> Result<(), LuError>;
}

/// Instantiate the backend described by `config`
pub fn from_config(config: &BackendConfig) -> Result<Box<dyn LuBackend>, LuError> {
    match config {
        BackendConfig::Reference => Ok(Box::new(ReferenceBackend)),
        BackendConfig::Native { library } => {
            #[cfg(feature = "native")]
            {
                Ok(Box::new(NativeBackend::load(library)?))
            }

            #[cfg(not(feature = "native"))]
            {
                Err(LuError::BackendUnavailable {
                    library: library.clone(),
                    reason: "built without the `native` feature".to_string(),
                })
            }
        }
    }
}

/// Check the sizes of the buffers handed to a backend
pub(crate) fn check_buffers(
    n: usize,
    data: &[f64],
    permutation: Option<&[i32]>,
) -> Result<(), LuError> {
    let expected = n.checked_mul(n).ok_or(LuError::DimensionMismatch {
        expected: usize::MAX,
        got: data.len(),
    })?;
    if data.len() != expected {
        return Err(LuError::DimensionMismatch {
            expected,
            got: data.len(),
        });
    }
    match permutation {
        Some(perm) if perm.len() != n => Err(LuError::DimensionMismatch {
            expected: n,
            got: perm.len(),
        }),
        _ => Ok(()),
    }
}
