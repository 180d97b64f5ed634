//! Evaluating lines on the evaluation grid.

pub mod model;

pub use model::*;
