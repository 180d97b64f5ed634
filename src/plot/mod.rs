//! Reporter implementations: terminal ASCII plot and SVG chart.

pub mod ascii;
pub mod svg;

pub use ascii::{AsciiReporter, render_ascii_plot};
pub use svg::SvgReporter;
