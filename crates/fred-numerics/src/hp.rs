//! Hodrick-Prescott filter.
//!
//! The trend `τ` minimises `Σ(y - τ)² + λ Σ(Δ²τ)²`, i.e. solves
//! `(I + λ D'D) τ = y` where `D` is the second-difference operator. The
//! system matrix is symmetric positive definite and pentadiagonal, so it is
//! factored with a banded Cholesky decomposition in `O(n)`.

use fred_core::{FredError, Result};

/// Second-difference stencil.
const STENCIL: [f64; 3] = [1.0, -2.0, 1.0];

/// Diagonal, first and second super-diagonals of `I + λ D'D`.
fn system_bands(n: usize, lambda: f64) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut d0 = vec![1.0; n];
    let mut d1 = vec![0.0; n];
    let mut d2 = vec![0.0; n];
    // Each row r of D touches columns r, r+1, r+2.
    for r in 0..n - 2 {
        for a in 0..3 {
            d0[r + a] += lambda * STENCIL[a] * STENCIL[a];
            if a + 1 < 3 {
                d1[r + a] += lambda * STENCIL[a] * STENCIL[a + 1];
            }
            if a + 2 < 3 {
                d2[r + a] += lambda * STENCIL[a] * STENCIL[a + 2];
            }
        }
    }
    (d0, d1, d2)
}

/// Applies the Hodrick-Prescott filter with smoothing parameter `lambda`.
///
/// Returns `(cycle, trend)` with `cycle = y - trend`. Series shorter than
/// three observations have no curvature to penalise and are returned as
/// pure trend.
///
/// # Errors
/// - [`FredError::InvalidParameter`] if `lambda` is not positive and finite.
/// - [`FredError::Numerics`] if the factorisation breaks down.
pub fn hp_filter(y: &[f64], lambda: f64) -> Result<(Vec<f64>, Vec<f64>)> {
    if !(lambda.is_finite() && lambda > 0.0) {
        return Err(FredError::InvalidParameter(format!(
            "HP smoothing parameter must be positive, got {lambda}"
        )));
    }
    let n = y.len();
    if n < 3 {
        return Ok((vec![0.0; n], y.to_vec()));
    }

    let (d0, d1, d2) = system_bands(n, lambda);

    // L with diagonal l0 and sub-diagonals l1, l2 such that A = L L'.
    let mut l0 = vec![0.0; n];
    let mut l1 = vec![0.0; n];
    let mut l2 = vec![0.0; n];
    for i in 0..n {
        let mut pivot = d0[i];
        if i >= 1 {
            pivot -= l1[i - 1] * l1[i - 1];
        }
        if i >= 2 {
            pivot -= l2[i - 2] * l2[i - 2];
        }
        if pivot <= 0.0 || !pivot.is_finite() {
            return Err(FredError::Numerics(format!(
                "HP system not positive definite at row {i}"
            )));
        }
        l0[i] = pivot.sqrt();

        let mut off = d1[i];
        if i >= 1 {
            off -= l2[i - 1] * l1[i - 1];
        }
        l1[i] = off / l0[i];
        l2[i] = d2[i] / l0[i];
    }

    // Forward substitution: L z = y.
    let mut z = vec![0.0; n];
    for i in 0..n {
        let mut acc = y[i];
        if i >= 1 {
            acc -= l1[i - 1] * z[i - 1];
        }
        if i >= 2 {
            acc -= l2[i - 2] * z[i - 2];
        }
        z[i] = acc / l0[i];
    }

    // Back substitution: L' τ = z.
    let mut trend = vec![0.0; n];
    for i in (0..n).rev() {
        let mut acc = z[i];
        if i + 1 < n {
            acc -= l1[i] * trend[i + 1];
        }
        if i + 2 < n {
            acc -= l2[i] * trend[i + 2];
        }
        trend[i] = acc / l0[i];
    }

    let cycle = y.iter().zip(&trend).map(|(v, t)| v - t).collect();
    Ok((cycle, trend))
}
