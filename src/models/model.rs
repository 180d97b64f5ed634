//! Curve evaluation over the shared grid.
//!
//! Every compared curve (truth and both fits) goes through the same `predict`
//! so they are sampled at identical x positions.

use crate::domain::{EvaluationGrid, GROUND_TRUTH, Line};

/// Evaluate `line` at every grid point, in grid order.
pub fn predict(line: &Line, grid: &EvaluationGrid) -> Vec<f64> {
    grid.iter().map(|&x| line.eval(x)).collect()
}

/// The ground-truth curve `2x + 1` over the grid.
pub fn predict_truth(grid: &EvaluationGrid) -> Vec<f64> {
    predict(&GROUND_TRUTH, grid)
}

/// `(x, y)` pairs for plotting.
pub fn curve_points(xs: &[f64], ys: &[f64]) -> Vec<(f64, f64)> {
    xs.iter().copied().zip(ys.iter().copied()).collect()
}
