//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - true line: `.`
//! - balanced fit: `b`, biased fit: `r`
//! - balanced data: `o`, biased data: `x`, both in one cell: `*`
//!
//! Curves never overwrite each other; the true line is drawn first.

use std::io::Write;

use crate::error::AppError;
use crate::report::{ReportFrame, Reporter};

const LEGEND: &str = "legend: . true  b balanced fit  r biased fit  o balanced data  x biased data  * both\n";

/// Writes the ASCII plot of each frame to `out`.
pub struct AsciiReporter<W: Write> {
    out: W,
    width: usize,
    height: usize,
}

impl<W: Write> AsciiReporter<W> {
    pub fn new(out: W, width: usize, height: usize) -> Self {
        Self { out, width, height }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for AsciiReporter<W> {
    fn render(&mut self, frame: &ReportFrame<'_>) -> Result<(), AppError> {
        let txt = render_ascii_plot(frame, self.width, self.height);
        self.out
            .write_all(txt.as_bytes())
            .map_err(|e| AppError::config(format!("Failed to write plot: {e}")))
    }
}

/// Render a frame into a string (title, range header, grid rows, legend).
pub fn render_ascii_plot(frame: &ReportFrame<'_>, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = frame.x_range().unwrap_or((0.0, 1.0));
    let (y_min, y_max) = frame.y_range().unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);
    let axes = Axes {
        x_min,
        x_max,
        y_min,
        y_max,
        width,
        height,
    };

    let mut grid = vec![vec![' '; width]; height];

    draw_curve(&mut grid, frame.grid, frame.true_curve, &axes, '.');
    draw_curve(&mut grid, frame.grid, frame.balanced_curve, &axes, 'b');
    draw_curve(&mut grid, frame.grid, frame.biased_curve, &axes, 'r');

    for (x, y) in frame.balanced.points() {
        grid[axes.row(y)][axes.col(x)] = 'o';
    }
    for (x, y) in frame.biased.points() {
        let cell = &mut grid[axes.row(y)][axes.col(x)];
        *cell = if *cell == 'o' { '*' } else { 'x' };
    }

    let mut out = String::new();
    out.push_str(frame.title);
    out.push('\n');
    out.push_str(&format!(
        "x=[{x_min:.2}, {x_max:.2}] {} | y=[{y_min:.2}, {y_max:.2}] {}\n",
        frame.x_label, frame.y_label
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out.push_str(LEGEND);

    out
}

struct Axes {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    width: usize,
    height: usize,
}

impl Axes {
    fn col(&self, x: f64) -> usize {
        let u = ((x - self.x_min) / (self.x_max - self.x_min)).clamp(0.0, 1.0);
        (u * (self.width as f64 - 1.0)).round() as usize
    }

    fn row(&self, y: f64) -> usize {
        let u = ((y - self.y_min) / (self.y_max - self.y_min)).clamp(0.0, 1.0);
        // y=top is max -> row 0
        (self.height as f64 - 1.0 - (u * (self.height as f64 - 1.0))).round() as usize
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn draw_curve(grid: &mut [Vec<char>], xs: &[f64], ys: &[f64], axes: &Axes, ch: char) {
    let mut prev = None;
    for (&x, &y) in xs.iter().zip(ys) {
        if !(x.is_finite() && y.is_finite()) {
            prev = None;
            continue;
        }
        let col = axes.col(x);
        let row = axes.row(y);
        match prev {
            Some((c0, r0)) => draw_line(grid, c0, r0, col, row, ch),
            None => {
                if grid[row][col] == ' ' {
                    grid[row][col] = ch;
                }
            }
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish). Only fills blank cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
