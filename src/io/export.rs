//! Export per-observation results to CSV.
//!
//! One row per observation of both designs, with the fitted value, residual,
//! and the ground-truth value at the same input. Easy to consume in
//! spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::app::pipeline::{DesignRun, ExperimentOutput};
use crate::domain::GROUND_TRUTH;
use crate::error::AppError;

/// Write per-observation results to a CSV file.
pub fn write_results_csv(path: &Path, run: &ExperimentOutput) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::config(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_results(BufWriter::new(file), run)
}

/// Write the CSV rows to any writer.
pub fn write_results<W: Write>(mut out: W, run: &ExperimentOutput) -> Result<(), AppError> {
    let io_err = |e: std::io::Error| AppError::config(format!("Failed to write export CSV: {e}"));

    writeln!(out, "design,index,x,y_obs,y_true,y_fit,residual").map_err(io_err)?;
    for design in [&run.balanced, &run.biased] {
        write_design(&mut out, design).map_err(io_err)?;
    }
    out.flush().map_err(io_err)
}

fn write_design<W: Write>(out: &mut W, design: &DesignRun) -> std::io::Result<()> {
    let line = &design.model.line;
    for (i, (x, y)) in design.model.observations.points().enumerate() {
        let y_fit = line.eval(x);
        writeln!(
            out,
            "{},{},{},{:.10},{:.10},{:.10},{:.10}",
            design.name,
            i,
            x,
            y,
            GROUND_TRUTH.eval(x),
            y_fit,
            y - y_fit
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_experiment;
    use crate::domain::ExperimentConfig;

    #[test]
    fn one_row_per_observation_plus_header() {
        let run = run_experiment(&ExperimentConfig::default()).unwrap();
        let mut buf = Vec::new();
        write_results(&mut buf, &run).unwrap();
        let txt = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = txt.lines().collect();

        assert_eq!(lines.len(), 1 + 25 + 32);
        assert_eq!(lines[0], "design,index,x,y_obs,y_true,y_fit,residual");
        assert!(lines[1].starts_with("balanced,0,0.1,1.4483570765,1.2000000000,"));
        assert!(lines[26].starts_with("biased,0,1,"));
    }

    #[test]
    fn writes_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let run = run_experiment(&ExperimentConfig::default()).unwrap();
        write_results_csv(&path, &run).unwrap();
        let txt = std::fs::read_to_string(&path).unwrap();
        assert_eq!(txt.lines().count(), 58);
    }
}
