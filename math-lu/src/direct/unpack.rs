//! Split combined LU storage into separate L and U matrices

use ndarray::{Array2, ArrayView2};

/// Extract unit lower-triangular L and upper-triangular U from combined storage.
///
/// Works on the output of either decomposer; it performs no numeric checks
/// and never mutates its input.
///
/// Panics if `combined` is not square.
pub fn unpack(combined: ArrayView2<'_, f64>) -> (Array2<f64>, Array2<f64>) {
    let n = combined.nrows();
    assert_eq!(n, combined.ncols(), "Combined LU storage must be square");

    let l = Array2::from_shape_fn((n, n), |(i, j)| match j.cmp(&i) {
        std::cmp::Ordering::Less => combined[[i, j]],
        std::cmp::Ordering::Equal => 1.0,
        std::cmp::Ordering::Greater => 0.0,
    });
    let u = Array2::from_shape_fn((n, n), |(i, j)| if j < i { 0.0 } else { combined[[i, j]] });

    (l, u)
}
