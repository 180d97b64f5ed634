//! Synthetic data: noise streams, sampling designs, and observation generation.

pub mod design;
pub mod generator;
pub mod rng;

pub use design::SamplingDesign;
pub use generator::observe;
pub use rng::{NoiseSource, RandomSource, ReplaySource};
