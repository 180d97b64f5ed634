//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::app::pipeline::{DesignRun, ExperimentOutput};
use crate::data::SamplingDesign;
use crate::domain::GROUND_TRUTH;
use crate::fit::Closer;

/// Format the full run summary (settings, designs, fitted lines, errors).
pub fn format_run_summary(run: &ExperimentOutput) -> String {
    let mut out = String::new();

    out.push_str("=== sbias - Sampling Bias vs. OLS ===\n");
    out.push_str(&format!(
        "Seed: {} ({:?} stream) | noise std: {} | solver: {:?}\n",
        run.seed, run.rng, run.noise_std, run.solver
    ));
    out.push_str(&format!(
        "Truth: y = {}x + {}\n",
        GROUND_TRUTH.slope, GROUND_TRUTH.intercept
    ));
    out.push_str(&format!(
        "Grid: n={} | x=[{:.3}, {:.3}]\n",
        run.grid.len(),
        run.grid.min(),
        run.grid.max()
    ));

    out.push_str("\nDesigns:\n");
    for design in [SamplingDesign::balanced(), SamplingDesign::biased()] {
        out.push_str(&format!(
            "  {:<9} n={:<3} {}\n",
            design.name,
            design.len(),
            fmt_levels(&design.level_counts())
        ));
    }

    out.push_str("\nFits:\n");
    out.push_str(&format!(
        "  {:<9} {:>10} {:>10} {:>10} {:>10} {:>8} {:>8} {:>10}\n",
        "design", "slope", "intercept", "d_slope", "d_icept", "RMSE", "R2", "curve_err"
    ));
    out.push_str(&fmt_fit_row(&run.balanced));
    out.push_str(&fmt_fit_row(&run.biased));

    out.push('\n');
    out.push_str(&match run.closer {
        Closer::Balanced => format!(
            "Balanced fit is closer to the truth (total |error| {:.4} vs {:.4}).\n",
            run.balanced.gap.params.total(),
            run.biased.gap.params.total()
        ),
        Closer::Biased => format!(
            "Biased fit is closer to the truth (total |error| {:.4} vs {:.4}).\n",
            run.biased.gap.params.total(),
            run.balanced.gap.params.total()
        ),
        Closer::Tie => "Both fits are equally far from the truth.\n".to_string(),
    });

    out
}

fn fmt_fit_row(run: &DesignRun) -> String {
    let line = &run.model.line;
    let q = &run.model.quality;
    format!(
        "  {:<9} {:>10.4} {:>10.4} {:>+10.4} {:>+10.4} {:>8.4} {:>8.4} {:>10.4}\n",
        run.name,
        line.slope,
        line.intercept,
        run.gap.params.slope,
        run.gap.params.intercept,
        q.rmse,
        q.r_squared,
        run.gap.curve_rmse
    )
}

fn fmt_levels(counts: &[(f64, usize)]) -> String {
    counts
        .iter()
        .map(|(level, n)| format!("{level}x{n}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_experiment;
    use crate::domain::ExperimentConfig;

    #[test]
    fn level_list_formatting() {
        assert_eq!(fmt_levels(&[(1.0, 20), (0.1, 3)]), "1x20 0.1x3");
    }

    #[test]
    fn summary_mentions_both_designs_and_winner() {
        let run = run_experiment(&ExperimentConfig::default()).unwrap();
        let txt = format_run_summary(&run);
        assert!(txt.contains("balanced  n=25"));
        assert!(txt.contains("biased    n=32"));
        assert!(txt.contains("Balanced fit is closer to the truth"));
        assert!(txt.contains("1.8782"));
    }
}
