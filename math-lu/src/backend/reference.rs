//! Pure-Rust backend running the in-place kernels on the flat buffer

use super::{LuBackend, check_buffers};
use crate::direct::{lu_in_place, plu_in_place};
use crate::error::LuError;
use crate::matrix::square_view_mut;

/// Backend that executes [`lu_in_place`] / [`plu_in_place`] directly
#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceBackend;

impl LuBackend for ReferenceBackend {
    fn factor(
        &self,
        n: usize,
        data: &mut [f64],
        permutation: Option<&mut [i32]>,
    ) -> Result<(), LuError> {
        check_buffers(n, data, permutation.as_deref())?;
        let a = square_view_mut(n, data)?;

        match permutation {
            None => lu_in_place(a),
            Some(out) => {
                let perm = plu_in_place(a)?;
                for (slot, &src) in out.iter_mut().zip(perm.as_slice()) {
                    *slot = i32::try_from(src).map_err(|_| LuError::DimensionMismatch {
                        expected: i32::MAX as usize,
                        got: n,
                    })?;
                }
                Ok(())
            }
        }
    }
}
