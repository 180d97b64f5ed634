//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the ground-truth relation and fitted lines (`Line`, `GROUND_TRUTH`)
//! - observation containers (`InputVector`, `ObservationSet`)
//! - fit outputs (`FittedModel`, `FitQuality`, `ParamError`)
//! - run configuration (`ExperimentConfig`, `RngKind`, `Solver`)

pub mod types;

pub use types::*;
