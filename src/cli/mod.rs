//! Command-line parsing for the sampling-bias experiment.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the simulation/fitting code.
//!
//! Core settings can also come from the environment (or a `.env` file):
//! `SBIAS_SEED`, `SBIAS_NOISE_STD`, `SBIAS_RNG`, `SBIAS_SOLVER`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{RngKind, Solver};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "sbias",
    version,
    about = "Compare OLS fits from balanced vs. biased sampling designs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Simulate both designs, fit them, print diagnostics, and optionally plot/export.
    Run(RunArgs),
    /// Plot a previously exported curves JSON.
    Plot(PlotArgs),
}

/// Options for a simulation run.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Seed for the noise stream.
    #[arg(long, env = "SBIAS_SEED", default_value_t = 42)]
    pub seed: u32,

    /// Standard deviation of the Gaussian observation noise.
    #[arg(long, env = "SBIAS_NOISE_STD", default_value_t = 0.5)]
    pub noise_std: f64,

    /// Noise stream: MT19937 with polar Gaussians, or `StdRng`.
    #[arg(long, env = "SBIAS_RNG", value_enum, default_value_t = RngKind::Legacy)]
    pub rng: RngKind,

    /// Least-squares solver.
    #[arg(long, env = "SBIAS_SOLVER", value_enum, default_value_t = Solver::ClosedForm)]
    pub solver: Solver,

    /// Lower end of the evaluation grid.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub grid_min: f64,

    /// Upper end of the evaluation grid.
    #[arg(long, default_value_t = 3.5, allow_negative_numbers = true)]
    pub grid_max: f64,

    /// Number of evaluation grid points.
    #[arg(long, default_value_t = 100)]
    pub grid_points: usize,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 24)]
    pub height: usize,

    /// Render the comparison chart to an SVG file.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,

    /// Export grid, curves, fits, and observations to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Export per-observation residuals to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,
}

/// Options for plotting a saved run.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Curves JSON file produced by `sbias run --export-json`.
    #[arg(long, value_name = "JSON")]
    pub curves: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 24)]
    pub height: usize,

    /// Also render the chart to an SVG file.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn run_flags_parse() {
        let cli = Cli::try_parse_from([
            "sbias", "run", "--seed", "7", "--rng", "std", "--solver", "svd", "--grid-min", "-1",
            "--no-plot",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.seed, 7);
        assert_eq!(args.rng, RngKind::Std);
        assert_eq!(args.solver, Solver::Svd);
        assert_eq!(args.grid_min, -1.0);
        assert!(args.no_plot);
    }
}
