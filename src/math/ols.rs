//! Ordinary least squares for a single regressor.
//!
//! We solve
//!
//! ```text
//! minimize Σ (y_i − (a·x_i + b))^2
//! ```
//!
//! two ways:
//!
//! - closed form on centered data:
//!   `a = Σ(x−x̄)(y−ȳ) / Σ(x−x̄)²`, `b = ȳ − a·x̄`
//! - SVD of the `[1, x]` design matrix (nalgebra), which generalizes to more
//!   columns and serves as a cross-check of the closed form.
//!
//! Both reject inputs whose values are all identical: the slope is undefined.

use nalgebra::{DMatrix, DVector};

use crate::domain::Line;
use crate::error::FitError;

/// Closed-form OLS line through `(x_i, y_i)`.
pub fn fit_line(x: &[f64], y: &[f64]) -> Result<Line, FitError> {
    check_inputs(x, y)?;

    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        sxy += dx * (yi - y_mean);
        sxx += dx * dx;
    }

    if !(sxx.is_finite() && sxx > 0.0) {
        return Err(degenerate(x));
    }

    let slope = sxy / sxx;
    Ok(Line::new(slope, y_mean - slope * x_mean))
}

/// OLS line via SVD of the `[1, x]` design matrix.
pub fn fit_line_svd(x: &[f64], y: &[f64]) -> Result<Line, FitError> {
    check_inputs(x, y)?;

    let design = design_matrix(x);
    let target = DVector::from_column_slice(y);
    let beta = solve_least_squares(&design, &target)
        .ok_or_else(|| FitError::Solver("SVD could not solve the [1, x] system".into()))?;

    Ok(Line::new(beta[1], beta[0]))
}

/// Design matrix with an intercept column followed by `x`.
pub fn design_matrix(x: &[f64]) -> DMatrix<f64> {
    DMatrix::from_fn(x.len(), 2, |i, j| if j == 0 { 1.0 } else { x[i] })
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // A rank-deficient design would silently yield the minimum-norm solution;
    // refuse it instead.
    let max_sv = svd.singular_values.max();
    let min_sv = svd.singular_values.min();
    if !(max_sv > 0.0 && min_sv > max_sv * 1e-12) {
        return None;
    }

    let beta = svd.solve(y, 1e-12).ok()?;
    beta.iter().all(|v| v.is_finite()).then_some(beta)
}

fn check_inputs(x: &[f64], y: &[f64]) -> Result<(), FitError> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch {
            inputs: x.len(),
            outputs: y.len(),
        });
    }
    let Some(&first) = x.first() else {
        return Err(FitError::Empty);
    };
    // Compare against the first value rather than the mean: the mean of
    // identical values can differ from them in the last bit.
    if x.iter().all(|&xi| xi == first) {
        return Err(degenerate(x));
    }
    Ok(())
}

fn degenerate(x: &[f64]) -> FitError {
    FitError::DegenerateInput {
        n: x.len(),
        value: x.first().copied().unwrap_or(f64::NAN),
    }
}
