//! Line fitting and fit comparison.
//!
//! Responsibilities:
//!
//! - fit one observation set with the configured solver
//! - compare fitted lines against the ground truth

pub mod comparison;
pub mod fitter;

pub use comparison::*;
pub use fitter::*;
