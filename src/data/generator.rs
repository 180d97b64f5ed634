//! Noisy observations of the ground-truth line.

use log::debug;

use crate::data::rng::NoiseSource;
use crate::domain::{GROUND_TRUTH, InputVector, ObservationSet};
use crate::error::AppError;

/// Observe `2x + 1 + ε` for each input, with `ε ~ N(0, noise_std²)`.
///
/// Exactly one draw is taken per input, in input order, so the stream advances
/// by `inputs.len()` draws.
pub fn observe(
    inputs: &InputVector,
    noise_std: f64,
    source: &mut dyn NoiseSource,
) -> Result<ObservationSet, AppError> {
    let noise = source.normal(0.0, noise_std, inputs.len())?;
    let outputs: Vec<f64> = inputs
        .iter()
        .zip(&noise)
        .map(|(&x, &e)| GROUND_TRUTH.eval(x) + e)
        .collect();

    debug!("observed {} points (noise std {noise_std})", outputs.len());

    ObservationSet::new(inputs.clone(), outputs)
        .map_err(|e| AppError::new(4, format!("Observation set construction failed: {e}")))
}
