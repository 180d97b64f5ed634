//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during generation and fitting
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::ops::Deref;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, FitError};

/// A straight line `y = slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

/// The relation every observation is generated from: `y = 2x + 1`.
pub const GROUND_TRUTH: Line = Line {
    slope: 2.0,
    intercept: 1.0,
};

impl Line {
    pub const fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Signed parameter error of `self` relative to `reference`.
    pub fn error_against(&self, reference: &Line) -> ParamError {
        ParamError {
            slope: self.slope - reference.slope,
            intercept: self.intercept - reference.intercept,
        }
    }
}

/// Signed estimation error of a fitted line's parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamError {
    pub slope: f64,
    pub intercept: f64,
}

impl ParamError {
    /// `|Δslope| + |Δintercept|`.
    pub fn total(&self) -> f64 {
        self.slope.abs() + self.intercept.abs()
    }
}

/// Input ("concentration") levels, one per observation.
///
/// Built once per sampling design and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputVector(Vec<f64>);

impl InputVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Deref for InputVector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for InputVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Inputs paired with their observed outputs.
///
/// Invariant: `inputs.len() == outputs.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationSet {
    inputs: InputVector,
    outputs: Vec<f64>,
}

impl ObservationSet {
    pub fn new(inputs: InputVector, outputs: Vec<f64>) -> Result<Self, FitError> {
        if inputs.len() != outputs.len() {
            return Err(FitError::LengthMismatch {
                inputs: inputs.len(),
                outputs: outputs.len(),
            });
        }
        Ok(Self { inputs, outputs })
    }

    pub fn inputs(&self) -> &InputVector {
        &self.inputs
    }

    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// `(x, y)` pairs in observation order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.inputs.iter().copied().zip(self.outputs.iter().copied())
    }
}

/// Goodness-of-fit diagnostics on the training observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    pub r_squared: f64,
    pub n: usize,
}

/// A fitted line plus the observations it was estimated from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    pub line: Line,
    pub observations: ObservationSet,
    pub quality: FitQuality,
}

/// Shared x-axis for every compared curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationGrid(Vec<f64>);

impl EvaluationGrid {
    /// `n` evenly spaced points from `min` to `max`, both endpoints included.
    pub fn linspace(min: f64, max: f64, n: usize) -> Result<Self, AppError> {
        if !(min.is_finite() && max.is_finite() && max > min) {
            return Err(AppError::config(format!(
                "Invalid evaluation grid range [{min}, {max}]."
            )));
        }
        if n < 2 {
            return Err(AppError::config("Evaluation grid needs at least 2 points."));
        }

        let step = (max - min) / (n as f64 - 1.0);
        let mut xs: Vec<f64> = (0..n).map(|i| min + i as f64 * step).collect();
        // Pin the endpoint so accumulated rounding never shortens the range.
        xs[n - 1] = max;
        Ok(Self(xs))
    }

    pub fn from_points(xs: Vec<f64>) -> Self {
        Self(xs)
    }

    pub fn min(&self) -> f64 {
        self.0.first().copied().unwrap_or(0.0)
    }

    pub fn max(&self) -> f64 {
        self.0.last().copied().unwrap_or(0.0)
    }
}

impl Deref for EvaluationGrid {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

/// Which pseudo-random stream produces the Gaussian noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RngKind {
    /// MT19937 with the polar Gaussian (cached spare variate).
    Legacy,
    /// `StdRng` with `rand_distr::Normal`.
    Std,
}

/// How the least-squares problem is solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Solver {
    /// Centered closed-form slope/intercept.
    ClosedForm,
    /// SVD of the `[1, x]` design matrix.
    Svd,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus env and defaults).
#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    pub seed: u32,
    pub noise_std: f64,
    pub rng: RngKind,
    pub solver: Solver,

    pub grid_min: f64,
    pub grid_max: f64,
    pub grid_points: usize,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub svg: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            noise_std: 0.5,
            rng: RngKind::Legacy,
            solver: Solver::ClosedForm,
            grid_min: 0.0,
            grid_max: 3.5,
            grid_points: 100,
            plot: true,
            plot_width: 80,
            plot_height: 24,
            svg: None,
            export_json: None,
            export_csv: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observation_set_rejects_length_mismatch() {
        let err = ObservationSet::new(vec![1.0, 2.0].into(), vec![3.0]).unwrap_err();
        assert_eq!(err, FitError::LengthMismatch { inputs: 2, outputs: 1 });
    }

    #[test]
    fn linspace_hits_both_endpoints() {
        let grid = EvaluationGrid::linspace(0.0, 3.5, 100).unwrap();
        assert_eq!(grid.len(), 100);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[99], 3.5);
        let step = 3.5 / 99.0;
        assert!((grid[1] - step).abs() < 1e-15);
        assert!(grid.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn linspace_rejects_bad_ranges() {
        assert!(EvaluationGrid::linspace(1.0, 1.0, 10).is_err());
        assert!(EvaluationGrid::linspace(0.0, 1.0, 1).is_err());
        assert!(EvaluationGrid::linspace(f64::NAN, 1.0, 10).is_err());
    }

    #[test]
    fn param_error_total_is_l1() {
        let e = Line::new(1.9, 1.2).error_against(&GROUND_TRUTH);
        assert!((e.slope + 0.1).abs() < 1e-12);
        assert!((e.intercept - 0.2).abs() < 1e-12);
        assert!((e.total() - 0.3).abs() < 1e-12);
    }
}
