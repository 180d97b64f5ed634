//! `sampling-bias` library crate.
//!
//! Simulates noisy observations of `y = 2x + 1` under a balanced and a biased
//! sampling design, fits both with ordinary least squares, and compares the
//! fits against the truth on a shared grid.
//!
//! The binary (`sbias`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - rendering stays behind the `report::Reporter` boundary

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
