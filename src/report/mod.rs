//! Reporting boundary: the finished values a renderer consumes.
//!
//! The pipeline never draws anything. It produces a [`ReportFrame`] and hands
//! it to whichever [`Reporter`] the front-end picked (terminal plot, SVG, ...).

pub mod format;

pub use format::*;

use crate::domain::ObservationSet;
use crate::error::AppError;

pub const X_LABEL: &str = "Concentration";
pub const Y_LABEL: &str = "Sensor Response";
pub const TITLE: &str = "Effect of Sampling Bias on Linear Regression Fit";

/// Everything a reporter needs: three curves on one grid, two raw scatters,
/// and display metadata.
#[derive(Debug, Clone, Copy)]
pub struct ReportFrame<'a> {
    pub grid: &'a [f64],
    pub true_curve: &'a [f64],
    pub balanced_curve: &'a [f64],
    pub biased_curve: &'a [f64],
    pub balanced: &'a ObservationSet,
    pub biased: &'a ObservationSet,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub title: &'a str,
}

impl<'a> ReportFrame<'a> {
    /// A frame with the standard labels and title.
    pub fn new(
        grid: &'a [f64],
        true_curve: &'a [f64],
        balanced_curve: &'a [f64],
        biased_curve: &'a [f64],
        balanced: &'a ObservationSet,
        biased: &'a ObservationSet,
    ) -> Self {
        Self {
            grid,
            true_curve,
            balanced_curve,
            biased_curve,
            balanced,
            biased,
            x_label: X_LABEL,
            y_label: Y_LABEL,
            title: TITLE,
        }
    }

    /// `(min, max)` over the grid and both scatters' x values.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        let xs = self
            .grid
            .iter()
            .copied()
            .chain(self.balanced.inputs().iter().copied())
            .chain(self.biased.inputs().iter().copied());
        finite_range(xs)
    }

    /// `(min, max)` over every curve and both scatters' y values.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        let ys = self
            .true_curve
            .iter()
            .chain(self.balanced_curve)
            .chain(self.biased_curve)
            .chain(self.balanced.outputs())
            .chain(self.biased.outputs())
            .copied();
        finite_range(ys)
    }
}

fn finite_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    (min.is_finite() && max.is_finite() && max > min).then_some((min, max))
}

/// Renders a frame somewhere (terminal, file, ...).
pub trait Reporter {
    fn render(&mut self, frame: &ReportFrame<'_>) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_cover_curves_and_points() {
        let balanced = ObservationSet::new(vec![0.5, 1.0].into(), vec![2.0, 9.0]).unwrap();
        let biased = ObservationSet::new(vec![4.0].into(), vec![-1.0]).unwrap();
        let grid = [0.0, 1.0, 2.0];
        let curve = [1.0, 3.0, 5.0];
        let frame = ReportFrame::new(&grid, &curve, &curve, &curve, &balanced, &biased);

        assert_eq!(frame.x_range(), Some((0.0, 4.0)));
        assert_eq!(frame.y_range(), Some((-1.0, 9.0)));
        assert_eq!(frame.title, TITLE);
    }
}
