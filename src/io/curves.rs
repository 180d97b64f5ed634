//! Read/write curves JSON files.
//!
//! A curves file is the portable record of one run:
//! - run settings (seed, stream kind, noise std, solver)
//! - both fitted models, including the observations they were fit on
//! - the shared grid and all three curves
//!
//! `sbias plot` re-renders a saved file without re-running the experiment.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::pipeline::ExperimentOutput;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvesFile {
    pub tool: String,
    #[serde(flatten)]
    pub run: ExperimentOutput,
}

/// Write a curves JSON file.
pub fn write_curves_json(path: &Path, run: &ExperimentOutput) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::config(format!("Failed to create curves JSON '{}': {e}", path.display())))?;

    let curves = CurvesFile {
        tool: "sbias".to_string(),
        run: run.clone(),
    };

    serde_json::to_writer_pretty(file, &curves)
        .map_err(|e| AppError::config(format!("Failed to write curves JSON: {e}")))?;

    Ok(())
}

/// Read and validate a curves JSON file.
pub fn read_curves_json(path: &Path) -> Result<CurvesFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::config(format!("Failed to open curves JSON '{}': {e}", path.display())))?;
    let curves: CurvesFile =
        serde_json::from_reader(file).map_err(|e| AppError::config(format!("Invalid curves JSON: {e}")))?;
    validate(&curves.run)?;
    Ok(curves)
}

fn validate(run: &ExperimentOutput) -> Result<(), AppError> {
    let n = run.grid.len();
    if n < 2 {
        return Err(AppError::config("Invalid curves JSON: grid needs at least 2 points."));
    }
    for (label, curve) in [
        ("true_curve", &run.true_curve),
        ("balanced.curve", &run.balanced.curve),
        ("biased.curve", &run.biased.curve),
    ] {
        if curve.len() != n {
            return Err(AppError::config(format!(
                "Invalid curves JSON: {label} has {} points, grid has {n}.",
                curve.len()
            )));
        }
    }
    for design in [&run.balanced, &run.biased] {
        let obs = &design.model.observations;
        if obs.inputs().len() != obs.outputs().len() {
            return Err(AppError::config(format!(
                "Invalid curves JSON: {} observations have {} inputs but {} outputs.",
                design.name,
                obs.inputs().len(),
                obs.outputs().len()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_experiment;
    use crate::domain::ExperimentConfig;

    #[test]
    fn saved_run_reloads_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curves.json");
        let run = run_experiment(&ExperimentConfig::default()).unwrap();

        write_curves_json(&path, &run).unwrap();
        let loaded = read_curves_json(&path).unwrap();

        assert_eq!(loaded.tool, "sbias");
        assert_eq!(loaded.run, run);
    }

    #[test]
    fn truncated_curve_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curves.json");
        let mut run = run_experiment(&ExperimentConfig::default()).unwrap();
        run.biased.curve.pop();

        write_curves_json(&path, &run).unwrap();
        let err = read_curves_json(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("biased.curve"));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = read_curves_json(Path::new("/nonexistent/curves.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
