//! Property tests for the LU decomposers on random matrices

use approx::assert_relative_eq;
use math_audio_lu::matrix::frobenius_distance;
use math_audio_lu::{
    Decomposition, LuError, ReferenceBackend, decompose, gauss_solve_in_place, lu, lu_in_place,
    plu, plu_in_place, reconstruct_in_place, unpack,
};
use ndarray::{Array1, Array2, array};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_matrix(rng: &mut StdRng, n: usize) -> Array2<f64> {
    Array2::from_shape_fn((n, n), |_| rng.random_range(-1.0..1.0))
}

/// Strictly diagonally dominant, so no row exchange is ever needed
fn random_dominant_matrix(rng: &mut StdRng, n: usize) -> Array2<f64> {
    let mut a = random_matrix(rng, n);
    for i in 0..n {
        a[[i, i]] += n as f64 + 1.0;
    }
    a
}

fn relative_error(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
    let scale = a.iter().map(|x| x * x).sum::<f64>().sqrt().max(1.0);
    frobenius_distance(a.view(), b.view()) / scale
}

fn assert_triangular(l: &Array2<f64>, u: &Array2<f64>) {
    let n = l.nrows();
    for i in 0..n {
        assert_eq!(l[[i, i]], 1.0, "L diagonal must be exactly one");
        for j in (i + 1)..n {
            assert_eq!(l[[i, j]], 0.0, "L must be zero above the diagonal");
        }
        for j in 0..i {
            assert_eq!(u[[i, j]], 0.0, "U must be zero below the diagonal");
        }
    }
}

#[test]
fn test_no_pivot_reconstruction() {
    let mut rng = StdRng::seed_from_u64(42);
    for &n in &[1, 2, 3, 5, 17, 50] {
        let a = random_dominant_matrix(&mut rng, n);
        let d = lu(&a).expect("dominant matrices factor without pivoting");

        assert_triangular(&d.l, &d.u);
        let err = relative_error(&a, &d.l.dot(&d.u));
        assert!(err < 1e-9, "n={n}: relative error {err}");
    }
}

#[test]
fn test_pivoted_reconstruction() {
    let mut rng = StdRng::seed_from_u64(7);
    for &n in &[1, 2, 4, 10, 33, 64] {
        let a = random_matrix(&mut rng, n);
        let d = plu(&a).expect("random matrices are nonsingular");

        assert_triangular(&d.l, &d.u);
        let pa = d.p.apply_rows(a.view());
        let err = relative_error(&pa, &d.l.dot(&d.u));
        assert!(err < 1e-9, "n={n}: relative error {err}");

        // Same thing with an explicit permutation matrix
        let err = relative_error(&d.p.to_matrix().dot(&a), &d.l.dot(&d.u));
        assert!(err < 1e-9, "n={n}: relative error {err}");
    }
}

#[test]
fn test_permutation_is_bijection() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        let n = rng.random_range(1..30);
        let a = random_matrix(&mut rng, n);
        let d = plu(&a).unwrap();

        let mut seen = vec![false; n];
        for &src in d.p.as_slice() {
            assert!(src < n);
            assert!(!seen[src], "duplicate index {src}");
            seen[src] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}

#[test]
fn test_pivoted_multipliers_bounded() {
    let mut rng = StdRng::seed_from_u64(11);
    let a = random_matrix(&mut rng, 40);
    let d = plu(&a).unwrap();
    assert!(d.l.iter().all(|x| x.abs() <= 1.0));
}

#[test]
fn test_concrete_scenario() {
    let a = array![[2.0, 3.0, -1.0], [4.0, 1.0, 2.0], [-2.0, 7.0, 2.0]];

    let d = lu(&a).unwrap();
    assert_relative_eq!(d.l[[1, 0]], 2.0);
    assert_relative_eq!(d.l[[2, 0]], -1.0);
    assert_relative_eq!(d.l[[2, 1]], -2.0, epsilon = 1e-12);
    assert_eq!(d.u.row(0).to_vec(), vec![2.0, 3.0, -1.0]);
    assert_relative_eq!(d.u[[1, 1]], -5.0);
    assert_relative_eq!(d.u[[1, 2]], 4.0);
    assert_relative_eq!(d.u[[2, 2]], 9.0, epsilon = 1e-12);
    assert!(relative_error(&a, &d.l.dot(&d.u)) < 1e-12);

    let d = plu(&a).unwrap();
    assert_eq!(d.p[0], 1);
    assert_eq!(d.p.as_slice(), &[1, 2, 0]);
    assert!(relative_error(&d.p.apply_rows(a.view()), &d.l.dot(&d.u)) < 1e-12);
}

#[test]
fn test_singular_detection() {
    // Column 0 is entirely zero
    let a = array![[0.0, 1.0, 2.0], [0.0, 3.0, 1.0], [0.0, 2.0, 5.0]];
    assert!(matches!(plu(&a), Err(LuError::SingularMatrix { step: 0 })));
    assert!(matches!(lu(&a), Err(LuError::SingularMatrix { step: 0 })));

    // Duplicate rows: the second column runs out of nonzero candidates
    let b = array![[1.0, 2.0, 3.0], [1.0, 2.0, 3.0], [0.0, 1.0, 4.0]];
    assert!(matches!(plu(&b), Err(LuError::SingularMatrix { .. })));

    for pivot in [false, true] {
        let err = decompose(&a, pivot, &ReferenceBackend).unwrap_err();
        assert!(err.is_numeric());
    }
}

#[test]
fn test_failed_call_leaves_caller_matrix_intact() {
    let a = array![[1.0, 2.0], [2.0, 4.0]];
    let snapshot = a.clone();
    assert!(decompose(&a, true, &ReferenceBackend).is_err());
    assert_eq!(a, snapshot);

    // The in-place kernel does not make that promise
    let mut b = a.clone();
    assert!(plu_in_place(b.view_mut()).is_err());
    assert_ne!(b, snapshot);
}

#[test]
fn test_unpack_idempotent() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut a = random_matrix(&mut rng, 8);
    plu_in_place(a.view_mut()).unwrap();

    let first = unpack(a.view());
    let second = unpack(a.view());
    assert_eq!(first, second);
}

#[test]
fn test_in_place_reconstruct_large() {
    let mut rng = StdRng::seed_from_u64(2024);
    let a0 = random_dominant_matrix(&mut rng, 200);
    let mut a = a0.clone();

    lu_in_place(a.view_mut()).unwrap();
    reconstruct_in_place(a.view_mut()).unwrap();

    assert!(relative_error(&a0, &a) < 1e-9);
}

#[test]
fn test_gauss_solve_matches_factor_solve() {
    let mut rng = StdRng::seed_from_u64(99);
    let a0 = random_dominant_matrix(&mut rng, 12);
    let b0 = Array1::from_shape_fn(12, |_| rng.random_range(-5.0..5.0));

    let mut a = a0.clone();
    let mut x = b0.clone();
    gauss_solve_in_place(a.view_mut(), x.view_mut()).unwrap();

    let d = decompose(&a0, true, &ReferenceBackend).unwrap();
    let y = d.solve(&b0).unwrap();

    for i in 0..12 {
        assert_relative_eq!(x[i], y[i], epsilon = 1e-10);
    }
    let residual = &a0.dot(&x) - &b0;
    assert!(residual.iter().all(|r| r.abs() < 1e-10));
}

#[test]
fn test_determinant_agrees_between_variants() {
    let mut rng = StdRng::seed_from_u64(8);
    let a = random_dominant_matrix(&mut rng, 6);

    let plain = decompose(&a, false, &ReferenceBackend).unwrap();
    let pivoted = decompose(&a, true, &ReferenceBackend).unwrap();
    assert!(matches!(plain, Decomposition::Lu(_)));
    assert!(matches!(pivoted, Decomposition::Plu(_)));

    let det = plain.determinant();
    assert_relative_eq!(det, pivoted.determinant(), max_relative = 1e-10);
}
