//! Input/output helpers.
//!
//! - `curves`: JSON record of a run (write + reload for plotting)
//! - `export`: per-observation CSV

pub mod curves;
pub mod export;

pub use curves::{CurvesFile, read_curves_json, write_curves_json};
pub use export::write_results_csv;
