//! Plotters-powered SVG chart of a report frame.
//!
//! The chart mirrors the terminal plot: true line in black, balanced fit and
//! data in blue, biased fit and data in red, with a legend and light mesh.

use std::path::PathBuf;

use log::info;
use plotters::prelude::*;

use crate::error::AppError;
use crate::models::curve_points;
use crate::report::{ReportFrame, Reporter};

/// Writes each frame to an SVG file at `path` (overwriting it).
pub struct SvgReporter {
    path: PathBuf,
    size: (u32, u32),
}

impl SvgReporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            size: (1000, 600),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }
}

impl Reporter for SvgReporter {
    fn render(&mut self, frame: &ReportFrame<'_>) -> Result<(), AppError> {
        draw_chart(frame, &self.path, self.size).map_err(|e| {
            AppError::config(format!("Failed to render SVG '{}': {e}", self.path.display()))
        })?;
        info!("wrote chart to {}", self.path.display());
        Ok(())
    }
}

fn draw_chart(
    frame: &ReportFrame<'_>,
    path: &std::path::Path,
    size: (u32, u32),
) -> Result<(), Box<dyn std::error::Error>> {
    let (x0, x1) = frame.x_range().unwrap_or((0.0, 1.0));
    let (y0, y1) = frame.y_range().unwrap_or((0.0, 1.0));
    let y_pad = (y1 - y0) * 0.05;

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(frame.title, ("sans-serif", 22))
        .margin(12)
        .set_label_area_size(LabelAreaPosition::Left, 50)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(x0..x1, (y0 - y_pad)..(y1 + y_pad))?;

    chart
        .configure_mesh()
        .x_desc(frame.x_label)
        .y_desc(frame.y_label)
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    let blue = RGBColor(31, 119, 180);
    let red = RGBColor(214, 39, 40);

    // 1) Curves.
    let curve = |ys: &[f64]| curve_points(frame.grid, ys);
    chart
        .draw_series(LineSeries::new(curve(frame.true_curve), BLACK.stroke_width(2)))?
        .label("True Line (y = 2x + 1)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(2)));
    chart
        .draw_series(LineSeries::new(curve(frame.balanced_curve), blue.stroke_width(2)))?
        .label("Balanced Fit")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], blue.stroke_width(2)));
    chart
        .draw_series(LineSeries::new(curve(frame.biased_curve), red.stroke_width(2)))?
        .label("Biased Fit")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], red.stroke_width(2)));

    // 2) Raw observations.
    chart
        .draw_series(
            frame
                .balanced
                .points()
                .map(|p| Circle::new(p, 4, blue.mix(0.6).filled())),
        )?
        .label("Balanced Data")
        .legend(move |(x, y)| Circle::new((x + 10, y), 4, blue.mix(0.6).filled()));
    chart
        .draw_series(
            frame
                .biased
                .points()
                .map(|p| Circle::new(p, 4, red.mix(0.4).filled())),
        )?
        .label("Biased Data")
        .legend(move |(x, y)| Circle::new((x + 10, y), 4, red.mix(0.4).filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
