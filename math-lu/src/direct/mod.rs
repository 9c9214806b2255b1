//! In-place dense LU kernels
//!
//! This module provides the numeric core:
//! - [`lu_in_place`]: Doolittle factorization without pivoting
//! - [`plu_in_place`]: factorization with partial pivoting
//! - [`unpack`]: split combined storage into L and U
//! - [`reconstruct_in_place`], [`gauss_solve_in_place`]: companions of the no-pivot kernel

mod doolittle;
mod gauss;
mod partial_pivot;
mod unpack;

pub use doolittle::{lu_in_place, reconstruct_in_place};
pub use gauss::gauss_solve_in_place;
pub use partial_pivot::plu_in_place;
pub use unpack::unpack;
