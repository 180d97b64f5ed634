//! Sampling designs: how many observations land on each input level.
//!
//! Both designs are deterministic; randomness enters only when observations
//! are generated for them.

use serde::{Deserialize, Serialize};

use crate::domain::InputVector;

/// Levels shared by both designs.
pub const LEVELS: [f64; 5] = [0.1, 0.5, 1.0, 2.0, 3.0];

/// A named sampling design and the input vector it produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingDesign {
    pub name: String,
    pub inputs: InputVector,
}

impl SamplingDesign {
    /// Repeat each `(level, reps)` entry in order and concatenate.
    pub fn from_levels(name: impl Into<String>, plan: &[(f64, usize)]) -> Self {
        let total = plan.iter().map(|&(_, reps)| reps).sum();
        let mut inputs = Vec::with_capacity(total);
        for &(level, reps) in plan {
            inputs.extend(std::iter::repeat_n(level, reps));
        }
        Self {
            name: name.into(),
            inputs: InputVector::new(inputs),
        }
    }

    /// Every level five times, in level order (25 samples).
    pub fn balanced() -> Self {
        let plan: Vec<(f64, usize)> = LEVELS.iter().map(|&level| (level, 5)).collect();
        Self::from_levels("balanced", &plan)
    }

    /// Level 1.0 twenty times, then 0.1, 0.5, 2.0, 3.0 three times each (32 samples).
    pub fn biased() -> Self {
        Self::from_levels(
            "biased",
            &[(1.0, 20), (0.1, 3), (0.5, 3), (2.0, 3), (3.0, 3)],
        )
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// `(level, count)` in first-appearance order.
    pub fn level_counts(&self) -> Vec<(f64, usize)> {
        let mut counts: Vec<(f64, usize)> = Vec::new();
        for &x in self.inputs.iter() {
            match counts.iter_mut().find(|(level, _)| *level == x) {
                Some((_, n)) => *n += 1,
                None => counts.push((x, 1)),
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(design: &SamplingDesign, level: f64) -> usize {
        design.inputs.iter().filter(|&&x| x == level).count()
    }

    #[test]
    fn balanced_has_five_of_each_level() {
        let d = SamplingDesign::balanced();
        assert_eq!(d.len(), 25);
        for level in LEVELS {
            assert_eq!(count(&d, level), 5, "level {level}");
        }
        assert_eq!(&d.inputs[..6], &[0.1, 0.1, 0.1, 0.1, 0.1, 0.5]);
    }

    #[test]
    fn biased_concentrates_on_one() {
        let d = SamplingDesign::biased();
        assert_eq!(d.len(), 32);
        assert_eq!(count(&d, 1.0), 20);
        for level in [0.1, 0.5, 2.0, 3.0] {
            assert_eq!(count(&d, level), 3, "level {level}");
        }
        assert!(d.inputs[..20].iter().all(|&x| x == 1.0));
        assert_eq!(&d.inputs[20..], &[0.1, 0.1, 0.1, 0.5, 0.5, 0.5, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0]);
    }

    #[test]
    fn level_counts_preserve_first_appearance_order() {
        let d = SamplingDesign::biased();
        assert_eq!(
            d.level_counts(),
            vec![(1.0, 20), (0.1, 3), (0.5, 3), (2.0, 3), (3.0, 3)]
        );
    }

    #[test]
    fn empty_plan_gives_empty_design() {
        let d = SamplingDesign::from_levels("none", &[]);
        assert!(d.is_empty());
    }
}
