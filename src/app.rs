//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - runs the experiment pipeline
//! - prints the summary and terminal plot
//! - writes optional SVG/JSON/CSV outputs

use std::io::stdout;

use clap::Parser;
use log::{debug, info};

use crate::cli::{Command, PlotArgs, RunArgs};
use crate::domain::ExperimentConfig;
use crate::error::AppError;
use crate::plot::{AsciiReporter, SvgReporter};
use crate::report::Reporter;

pub mod pipeline;

/// Entry point for the `sbias` binary.
pub fn run() -> Result<(), AppError> {
    match dotenvy::dotenv() {
        Ok(path) => debug!("loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => return Err(AppError::config(format!("Failed to read .env: {e}"))),
    }

    // `sbias` and `sbias --seed 7` behave like `sbias run ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let config = config_from_args(&args);
    let run = pipeline::run_experiment(&config)?;

    println!("{}", crate::report::format_run_summary(&run));

    let frame = run.frame();
    if config.plot {
        AsciiReporter::new(stdout().lock(), config.plot_width, config.plot_height).render(&frame)?;
    }
    if let Some(path) = &config.svg {
        SvgReporter::new(path).render(&frame)?;
    }

    // Optional exports.
    if let Some(path) = &config.export_json {
        crate::io::write_curves_json(path, &run)?;
        info!("wrote curves to {}", path.display());
    }
    if let Some(path) = &config.export_csv {
        crate::io::write_results_csv(path, &run)?;
        info!("wrote results to {}", path.display());
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curves = crate::io::read_curves_json(&args.curves)?;
    let frame = curves.run.frame();

    AsciiReporter::new(stdout().lock(), args.width, args.height).render(&frame)?;
    if let Some(path) = &args.svg {
        SvgReporter::new(path).render(&frame)?;
    }
    Ok(())
}

pub fn config_from_args(args: &RunArgs) -> ExperimentConfig {
    ExperimentConfig {
        seed: args.seed,
        noise_std: args.noise_std,
        rng: args.rng,
        solver: args.solver,
        grid_min: args.grid_min,
        grid_max: args.grid_max,
        grid_points: args.grid_points,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        svg: args.svg.clone(),
        export_json: args.export_json.clone(),
        export_csv: args.export_csv.clone(),
    }
}

/// Rewrite argv so `sbias` defaults to `sbias run`.
///
/// Rules:
/// - `sbias`                      -> `sbias run`
/// - `sbias --seed 7 ...`         -> `sbias run --seed 7 ...`
/// - `sbias --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "plot");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "run flags".
    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs() {
        assert_eq!(rewrite_args(argv(&["sbias"])), argv(&["sbias", "run"]));
    }

    #[test]
    fn leading_flags_are_run_flags() {
        assert_eq!(
            rewrite_args(argv(&["sbias", "--seed", "7"])),
            argv(&["sbias", "run", "--seed", "7"])
        );
    }

    #[test]
    fn help_and_subcommands_pass_through() {
        for args in [
            &["sbias", "--help"][..],
            &["sbias", "plot", "--curves", "c.json"][..],
            &["sbias", "run", "--no-plot"][..],
        ] {
            assert_eq!(rewrite_args(argv(args)), argv(args));
        }
    }

    #[test]
    fn config_mirrors_args() {
        let cli = crate::cli::Cli::parse_from(["sbias", "run", "--no-plot", "--noise-std", "0.25"]);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        let config = config_from_args(&args);
        assert!(!config.plot);
        assert_eq!(config.noise_std, 0.25);
        assert_eq!(config.grid_points, 100);
    }
}
