//! Fitting a line to one observation set.
//!
//! Given an `ObservationSet` we:
//! - solve the OLS problem with the configured solver
//! - compute SSE / RMSE / R² on the training points
//!
//! and return a `FittedModel` that keeps the observations for plotting.

use log::debug;

use crate::domain::{FitQuality, FittedModel, Line, ObservationSet, Solver};
use crate::error::FitError;
use crate::math::{fit_line, fit_line_svd};

/// Fit `y = a·x + b` to `observations`.
pub fn fit(observations: &ObservationSet, solver: Solver) -> Result<FittedModel, FitError> {
    let x = observations.inputs().as_slice();
    let y = observations.outputs();

    let line = match solver {
        Solver::ClosedForm => fit_line(x, y)?,
        Solver::Svd => fit_line_svd(x, y)?,
    };
    if !(line.slope.is_finite() && line.intercept.is_finite()) {
        return Err(FitError::Solver(format!(
            "non-finite parameters (slope={}, intercept={})",
            line.slope, line.intercept
        )));
    }

    let quality = fit_quality(&line, observations);
    debug!(
        "fit n={} slope={:.6} intercept={:.6} rmse={:.4}",
        quality.n, line.slope, line.intercept, quality.rmse
    );

    Ok(FittedModel {
        line,
        observations: observations.clone(),
        quality,
    })
}

/// Residual diagnostics of `line` on `observations`.
pub fn fit_quality(line: &Line, observations: &ObservationSet) -> FitQuality {
    let n = observations.len();
    let y = observations.outputs();
    let y_mean = if n > 0 { y.iter().sum::<f64>() / n as f64 } else { 0.0 };

    let mut sse = 0.0;
    let mut sst = 0.0;
    for (x, yi) in observations.points() {
        let r = yi - line.eval(x);
        sse += r * r;
        sst += (yi - y_mean) * (yi - y_mean);
    }

    let rmse = if n > 0 { (sse / n as f64).sqrt() } else { 0.0 };
    let r_squared = if sst > 0.0 {
        1.0 - sse / sst
    } else if sse == 0.0 {
        1.0
    } else {
        0.0
    };

    FitQuality {
        sse,
        rmse,
        r_squared,
        n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{RandomSource, SamplingDesign, observe};
    use crate::domain::{GROUND_TRUTH, InputVector, RngKind};

    #[test]
    fn noiseless_balanced_data_recovers_ground_truth() {
        for solver in [Solver::ClosedForm, Solver::Svd] {
            let mut src = RandomSource::seed(RngKind::Legacy, 42);
            let obs = observe(&SamplingDesign::balanced().inputs, 0.0, &mut src).unwrap();
            let model = fit(&obs, solver).unwrap();
            assert!((model.line.slope - 2.0).abs() < 1e-12, "{solver:?}");
            assert!((model.line.intercept - 1.0).abs() < 1e-12, "{solver:?}");
            assert!(model.quality.sse < 1e-20);
            assert!((model.quality.r_squared - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn all_identical_inputs_raise_degenerate_error() {
        let obs = ObservationSet::new(InputVector::new(vec![1.0; 20]), vec![3.0; 20]).unwrap();
        for solver in [Solver::ClosedForm, Solver::Svd] {
            let err = fit(&obs, solver).unwrap_err();
            assert!(matches!(err, FitError::DegenerateInput { n: 20, .. }), "{solver:?}: {err}");
        }
    }

    #[test]
    fn model_keeps_its_observations() {
        let obs = ObservationSet::new(vec![0.0, 1.0, 2.0].into(), vec![1.0, 3.2, 4.8]).unwrap();
        let model = fit(&obs, Solver::ClosedForm).unwrap();
        assert_eq!(model.observations, obs);
        assert_eq!(model.quality.n, 3);
    }

    #[test]
    fn quality_of_truth_on_perturbed_points() {
        let obs = ObservationSet::new(vec![0.0, 1.0].into(), vec![1.5, 2.5]).unwrap();
        let q = fit_quality(&GROUND_TRUTH, &obs);
        assert!((q.sse - 0.5).abs() < 1e-12);
        assert!((q.rmse - 0.5).abs() < 1e-12);
    }
}
