//! Ordinary least squares.
//!
//! Systems here are tiny (a constant and a time index), so the design matrix
//! is solved with SVD, which copes with tall matrices and near-collinear
//! columns.

use nalgebra::{DMatrix, DVector};

use fred_core::{FredError, Result};

/// Result of a least-squares fit.
#[derive(Clone, Debug, PartialEq)]
pub struct OlsFit {
    /// Estimated coefficients, one per design column.
    pub coefficients: Vec<f64>,
    /// Fitted values, one per design row.
    pub fitted: Vec<f64>,
}

fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);
    // Progressively looser tolerances for near-singular designs.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }
    None
}

/// Fits `y = X β` by least squares.
///
/// `design` is row-major with `columns` entries per row.
///
/// # Errors
/// - [`FredError::InvalidParameter`] if the shapes disagree.
/// - [`FredError::InsufficientData`] if there are fewer rows than columns.
/// - [`FredError::Numerics`] if the system cannot be solved.
pub fn ols_fit(design: &[f64], columns: usize, y: &[f64]) -> Result<OlsFit> {
    if columns == 0 || design.len() != y.len() * columns {
        return Err(FredError::InvalidParameter(format!(
            "design of {} values does not match {} rows x {columns} columns",
            design.len(),
            y.len()
        )));
    }
    if y.len() < columns {
        return Err(FredError::InsufficientData {
            required: columns,
            actual: y.len(),
        });
    }

    let x = DMatrix::from_row_slice(y.len(), columns, design);
    let target = DVector::from_column_slice(y);
    let beta = solve_least_squares(&x, &target)
        .ok_or_else(|| FredError::Numerics("least-squares system is singular".to_string()))?;
    let fitted = &x * &beta;

    Ok(OlsFit {
        coefficients: beta.iter().copied().collect(),
        fitted: fitted.iter().copied().collect(),
    })
}

/// Fits a constant plus linear time trend to `y`.
///
/// Missing (`NaN`) observations are excluded from estimation, but the trend
/// is evaluated at every index, so the result has the same length as `y`.
///
/// # Errors
/// Returns [`FredError::InsufficientData`] with fewer than two finite values.
pub fn linear_trend(y: &[f64]) -> Result<Vec<f64>> {
    let mut design = Vec::with_capacity(2 * y.len());
    let mut observed = Vec::with_capacity(y.len());
    for (t, v) in y.iter().enumerate() {
        if v.is_finite() {
            design.extend_from_slice(&[1.0, t as f64]);
            observed.push(*v);
        }
    }
    if observed.len() < 2 {
        return Err(FredError::InsufficientData {
            required: 2,
            actual: observed.len(),
        });
    }

    let fit = ols_fit(&design, 2, &observed)?;
    let (intercept, slope) = (fit.coefficients[0], fit.coefficients[1]);
    Ok((0..y.len())
        .map(|t| intercept + slope * t as f64)
        .collect())
}
