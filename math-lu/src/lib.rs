//! Dense LU factorization for square `f64` matrices
//!
//! This crate factors a square matrix `A` into a unit lower-triangular `L`
//! and an upper-triangular `U`, either directly (`A = L·U`) or with partial
//! pivoting (`P·A = L·U`).
//!
//! # Features
//!
//! - **In-place kernels**: Doolittle without pivoting, right-looking
//!   elimination with partial pivoting, and an unpacker for the combined storage
//! - **Backends**: the pure-Rust kernels, or an external C engine loaded from
//!   a shared library (`native` feature)
//! - **Configuration**: JSON selection of pivoting and backend
//! - **Extras**: solve, determinant, reconstruction, Gaussian elimination
//!
//! # Example
//!
//! ```
//! use math_audio_lu::{ReferenceBackend, decompose};
//! use ndarray::array;
//!
//! let a = array![[2.0, 3.0, -1.0], [4.0, 1.0, 2.0], [-2.0, 7.0, 2.0]];
//! let result = decompose(&a, true, &ReferenceBackend)?;
//!
//! assert_eq!(result.permutation().map(|p| p[0]), Some(1));
//! assert_eq!(result.l()[[1, 1]], 1.0);
//! # Ok::<(), math_audio_lu::LuError>(())
//! ```

pub mod backend;
pub mod config;
pub mod decomposition;
pub mod direct;
pub mod error;
pub mod matrix;
pub mod permutation;

// Re-export main types
pub use backend::{LuBackend, ReferenceBackend};
#[cfg(feature = "native")]
pub use backend::NativeBackend;
pub use config::{BackendConfig, LuConfig};
pub use error::LuError;
pub use permutation::Permutation;

// Re-export entry points
pub use decomposition::{
    Decomposition, LuDecomposition, PluDecomposition, decompose, decompose_reference,
    decompose_with_config, lu, plu,
};

// Re-export in-place kernels
pub use direct::{
    gauss_solve_in_place, lu_in_place, plu_in_place, reconstruct_in_place, unpack,
};
