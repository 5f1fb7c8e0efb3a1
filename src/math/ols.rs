//! Ordinary least squares solver.
//!
//! Each scoring task reduces to one dense regression problem:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! solved once at startup and again on every retrain.
//!
//! Implementation choices:
//! - We solve via SVD rather than the normal equations. The degree-2 design
//!   matrix mixes raw euro amounts with their squared products, and forming
//!   `XᵀX` would square an already wide condition number.
//! - Tolerances passed to the SVD solve are *relative* to the largest singular
//!   value; the caller is expected to equilibrate columns, but the dominant
//!   singular value still sets the meaningful cutoff scale.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    let max_sv = svd.singular_values.max();
    if !(max_sv.is_finite() && max_sv > 0.0) {
        return None;
    }

    // Try progressively looser cutoffs if the strict solve fails.
    for &rel_tol in &[1e-12, 1e-9, 1e-6] {
        if let Ok(beta) = svd.solve(y, max_sv * rel_tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn least_squares_handles_tall_overdetermined_system() {
        // y = 1 + 2x with a symmetric residual; exact LS solution is known.
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
        let y = DVector::from_row_slice(&[1.1, 2.9, 5.1, 6.9]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 1.06).abs() < 1e-9);
        assert!((beta[1] - 1.96).abs() < 1e-9);
    }

    #[test]
    fn degenerate_matrix_is_rejected() {
        let x = DMatrix::from_row_slice(2, 2, &[0.0, 0.0, 0.0, 0.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0]);
        assert!(solve_least_squares(&x, &y).is_none());
    }
}
