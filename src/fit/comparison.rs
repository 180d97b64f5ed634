//! How far each fitted line lands from the ground truth.

use serde::{Deserialize, Serialize};

use crate::domain::{FittedModel, GROUND_TRUTH, ParamError};

/// Error summary for one fitted model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TruthGap {
    /// Signed slope/intercept error.
    pub params: ParamError,
    /// RMSE between the fitted and true curves over the evaluation grid.
    pub curve_rmse: f64,
}

impl TruthGap {
    pub fn new(model: &FittedModel, fitted_curve: &[f64], true_curve: &[f64]) -> Self {
        Self {
            params: model.line.error_against(&GROUND_TRUTH),
            curve_rmse: curve_rmse(fitted_curve, true_curve),
        }
    }
}

/// Root-mean-square difference of two equally sampled curves.
///
/// Extra trailing points on the longer curve are ignored; an empty pair is `0.0`.
pub fn curve_rmse(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let ss: f64 = a.iter().zip(b).map(|(p, q)| (p - q) * (p - q)).sum();
    (ss / n as f64).sqrt()
}

/// Which design's fit is closer to the truth by total absolute parameter error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Closer {
    Balanced,
    Biased,
    Tie,
}

pub fn closer_to_truth(balanced: &TruthGap, biased: &TruthGap) -> Closer {
    let a = balanced.params.total();
    let b = biased.params.total();
    if a < b {
        Closer::Balanced
    } else if b < a {
        Closer::Biased
    } else {
        Closer::Tie
    }
}
