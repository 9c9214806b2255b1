//! Native backend: an external factorization engine behind a C ABI
//!
//! The engine is a shared library exporting
//!
//! ```c
//! void lu_in_place(int n, double *A);
//! void plu(int n, double *A, int *P);
//! ```
//!
//! where `A` is the row-major `n x n` matrix and `P` a caller-allocated
//! buffer of `n` ints. Libraries are loaded at most once per path per process;
//! a failed load is not remembered, so it can be retried later.

use super::{LuBackend, check_buffers};
use crate::error::LuError;
use libloading::Library;
use std::collections::HashMap;
use std::ffi::c_int;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

/// `void lu_in_place(int n, double *A)`
pub type LuInPlaceFn = unsafe extern "C" fn(n: c_int, a: *mut f64);

/// `void plu(int n, double *A, int *P)`
pub type PluFn = unsafe extern "C" fn(n: c_int, a: *mut f64, p: *mut c_int);

/// Exported name of the no-pivot entry point
pub const LU_SYMBOL: &[u8] = b"lu_in_place\0";

/// Exported name of the partial pivoting entry point
pub const PLU_SYMBOL: &[u8] = b"plu\0";

static LIBRARIES: OnceLock<Mutex<HashMap<PathBuf, Arc<Library>>>> = OnceLock::new();

/// Load `path`, or return the copy already loaded by this process
fn load_library(path: &Path) -> Result<Arc<Library>, LuError> {
    let registry = LIBRARIES.get_or_init(Default::default);
    // The map is never left half-updated, so a poisoned lock is still usable
    let mut libraries = registry.lock().unwrap_or_else(|e| e.into_inner());

    if let Some(library) = libraries.get(path) {
        return Ok(Arc::clone(library));
    }

    let library = unsafe { Library::new(path) }.map_err(|e| {
        log::warn!("Failed to load native LU engine {}: {}", path.display(), e);
        LuError::BackendUnavailable {
            library: path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;
    log::debug!("Loaded native LU engine from {}", path.display());

    let library = Arc::new(library);
    libraries.insert(path.to_path_buf(), Arc::clone(&library));
    Ok(library)
}

/// Backend delegating the factorization to an external C engine
#[derive(Clone)]
pub struct NativeBackend {
    origin: PathBuf,
    lu: LuInPlaceFn,
    plu: PluFn,
    // Keeps the symbols above valid
    _library: Option<Arc<Library>>,
}

impl NativeBackend {
    /// Load the engine from the shared library at `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LuError> {
        let path = path.as_ref();
        let library = load_library(path)?;

        let unavailable = |e: libloading::Error| LuError::BackendUnavailable {
            library: path.to_path_buf(),
            reason: e.to_string(),
        };

        // SAFETY: the symbol types match the documented C contract, and the
        // library handle is stored next to the copied function pointers.
        let lu: LuInPlaceFn = unsafe {
            *library
                .get::<LuInPlaceFn>(LU_SYMBOL)
                .map_err(unavailable)?
        };
        let plu: PluFn = unsafe { *library.get::<PluFn>(PLU_SYMBOL).map_err(unavailable)? };

        Ok(Self {
            origin: path.to_path_buf(),
            lu,
            plu,
            _library: Some(library),
        })
    }

    /// Build a backend from engine entry points already linked into the process
    ///
    /// # Safety
    ///
    /// Both functions must follow the C contract of this module: read and
    /// write exactly `n * n` doubles (and `n` ints for `plu`) and nothing else.
    pub unsafe fn from_symbols(lu: LuInPlaceFn, plu: PluFn) -> Self {
        Self {
            origin: PathBuf::from("<linked>"),
            lu,
            plu,
            _library: None,
        }
    }

    /// Path of the library this backend was loaded from
    pub fn origin(&self) -> &Path {
        &self.origin
    }
}

impl fmt::Debug for NativeBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeBackend")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl LuBackend for NativeBackend {
    fn factor(
        &self,
        n: usize,
        data: &mut [f64],
        permutation: Option<&mut [i32]>,
    ) -> Result<(), LuError> {
        check_buffers(n, data, permutation.as_deref())?;
        let dim = c_int::try_from(n).map_err(|_| LuError::DimensionMismatch {
            expected: c_int::MAX as usize,
            got: n,
        })?;

        match permutation {
            // SAFETY: buffer lengths were checked against `n` above
            None => unsafe { (self.lu)(dim, data.as_mut_ptr()) },
            Some(perm) => unsafe { (self.plu)(dim, data.as_mut_ptr(), perm.as_mut_ptr()) },
        }

        // The C entry points cannot report failure: a zero on the U diagonal
        // marks the step where elimination met an exactly zero pivot.
        match (0..n).find(|&k| data[k * n + k] == 0.0) {
            Some(step) => Err(LuError::SingularMatrix { step }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe extern "C" fn fake_lu(n: c_int, a: *mut f64) {
        // Leave the matrix untouched except for zeroing the last diagonal entry
        let n = n as usize;
        unsafe { *a.add(n * n - 1) = 0.0 };
    }

    unsafe extern "C" fn fake_plu(n: c_int, _a: *mut f64, p: *mut c_int) {
        for i in 0..n {
            unsafe { *p.add(i as usize) = n - 1 - i };
        }
    }

    #[test]
    fn test_load_missing_library() {
        let err = NativeBackend::load("/nonexistent/libgauss.so").unwrap_err();
        assert!(matches!(err, LuError::BackendUnavailable { .. }));
        assert!(!err.is_numeric());

        // Failures are not cached: a retry reports the same error again
        let again = NativeBackend::load("/nonexistent/libgauss.so").unwrap_err();
        assert!(matches!(again, LuError::BackendUnavailable { .. }));
    }

    #[test]
    fn test_zero_diagonal_reported_as_singular() {
        let backend = unsafe { NativeBackend::from_symbols(fake_lu, fake_plu) };
        let mut data = vec![1.0, 2.0, 3.0, 4.0];
        let err = backend.factor(2, &mut data, None).unwrap_err();
        assert!(matches!(err, LuError::SingularMatrix { step: 1 }));
    }

    #[test]
    fn test_permutation_buffer_filled_by_engine() {
        let backend = unsafe { NativeBackend::from_symbols(fake_lu, fake_plu) };
        let mut data = vec![1.0, 0.0, 0.0, 1.0];
        let mut perm = vec![0; 2];
        backend.factor(2, &mut data, Some(&mut perm)).unwrap();
        assert_eq!(perm, vec![1, 0]);
    }

    #[test]
    fn test_buffer_length_checked_before_call() {
        let backend = unsafe { NativeBackend::from_symbols(fake_lu, fake_plu) };
        let mut data = vec![1.0; 3];
        assert!(matches!(
            backend.factor(2, &mut data, None),
            Err(LuError::DimensionMismatch { .. })
        ));
        // n * n does not fit in usize
        assert!(matches!(
            backend.factor(usize::MAX, &mut [], Some(&mut [][..])),
            Err(LuError::DimensionMismatch { got: 0, .. })
        ));
    }
}
