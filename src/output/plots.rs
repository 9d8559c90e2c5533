//! Plotting for the count-of-counts distribution and its power-law fit
//!
//! Two figures are rendered with [`plotters`] and saved as PNG files:
//!
//! * `loglog.png`: the distribution on log/log axes with the fitted curve
//!   overlaid. A straight line on these axes is what suggests a power law.
//! * `histogram.png`: the distribution as unit-width bars centered on each
//!   count, x clipped to `[0, 20]`, with the fitted curve and its
//!   coefficients in the legend.
//!
//! The fitted curve is sampled at 100 evenly spaced points on `[1, 50]`.

use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::fit::powerlaw::FitResult;
use crate::frequency::distribution::CountDistribution;

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to create plot directory: {0}")]
    OutputDir(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

pub const LOGLOG_FILE: &str = "loglog.png";
pub const HISTOGRAM_FILE: &str = "histogram.png";

const CURVE_START: f64 = 1.0;
const CURVE_END: f64 = 50.0;
const CURVE_SAMPLES: usize = 100;
const HISTOGRAM_X_MAX: f64 = 20.0;

/// Trait for rendering the distribution and fit. Returns the files written.
pub trait PlotRenderer {
    fn render(&self, distribution: &CountDistribution, fit: &FitResult) -> Result<Vec<PathBuf>>;
}

/// Renders both figures as PNG files into `output_dir`.
pub struct PngPlotRenderer {
    pub output_dir: PathBuf,
    pub size: (u32, u32),
}

impl PngPlotRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            size: (1200, 800),
        }
    }
}

impl PlotRenderer for PngPlotRenderer {
    fn render(&self, distribution: &CountDistribution, fit: &FitResult) -> Result<Vec<PathBuf>> {
        if distribution.is_empty() {
            return Err(PlotError::InvalidData(
                "Count distribution cannot be empty".to_string(),
            ));
        }
        fs::create_dir_all(&self.output_dir)?;

        let (x, y) = distribution.points();
        let points: Vec<(f64, f64)> = x.into_iter().zip(y).collect();

        let loglog = self.output_dir.join(LOGLOG_FILE);
        draw_loglog(&points, fit, &loglog, self.size)?;

        let histogram = self.output_dir.join(HISTOGRAM_FILE);
        draw_histogram(&points, fit, &histogram, self.size)?;

        info!(dir = %self.output_dir.display(), "Saved distribution plots");
        Ok(vec![loglog, histogram])
    }
}

/// Sample the fitted curve at `samples` evenly spaced points on `[start, end]`.
pub fn curve_samples(fit: &FitResult, start: f64, end: f64, samples: usize) -> Vec<(f64, f64)> {
    if samples < 2 {
        return vec![(start, fit.evaluate(start))];
    }
    let step = (end - start) / (samples - 1) as f64;
    (0..samples)
        .map(|i| {
            let x = start + step * i as f64;
            (x, fit.evaluate(x))
        })
        .collect()
}

/// Legend text for the histogram overlay.
pub fn fit_label(fit: &FitResult) -> String {
    format!("fit: y = a x^b   a = {:5.3}   b = {:5.3}", fit.a, fit.b)
}

fn draw_loglog(points: &[(f64, f64)], fit: &FitResult, path: &Path, size: (u32, u32)) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let x_min = points.iter().map(|(x, _)| *x).fold(CURVE_START, f64::min);
    let x_max = points.iter().map(|(x, _)| *x).fold(CURVE_END, f64::max);
    let y_max = points.iter().map(|(_, y)| *y * 1.5).fold(1000.0, f64::max);
    let y_min = 1.0;

    let mut chart = ChartBuilder::on(&root)
        .caption("Data on log/log scale", ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d((x_min..x_max).log_scale(), (y_min..y_max).log_scale())
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Count")
        .y_desc("Count Frequency")
        .label_style(("sans-serif", 25))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(points.iter().map(|&(x, y)| {
            // Small square marker; the log axes make a fixed ratio look uniform
            Rectangle::new([(x * 0.97, y * 0.95), (x * 1.03, y * 1.05)], BLUE.filled())
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?
        .label("Data")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], BLUE.filled()));

    let curve: Vec<(f64, f64)> = curve_samples(fit, CURVE_START, CURVE_END, CURVE_SAMPLES)
        .into_iter()
        .filter(|&(_, y)| y.is_finite() && (y_min..=y_max).contains(&y))
        .collect();

    chart
        .draw_series(LineSeries::new(curve, BLACK.stroke_width(2)))
        .map_err(|e| PlotError::Drawing(e.to_string()))?
        .label("Linear relationship on a log/log scale suggests a power law")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(2)));

    chart
        .configure_series_labels()
        .label_font(("sans-serif", 22))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}

fn draw_histogram(points: &[(f64, f64)], fit: &FitResult, path: &Path, size: (u32, u32)) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let bars: Vec<(f64, f64)> = points
        .iter()
        .copied()
        .filter(|&(x, _)| x <= HISTOGRAM_X_MAX)
        .collect();
    let curve: Vec<(f64, f64)> = curve_samples(fit, CURVE_START, CURVE_END, CURVE_SAMPLES)
        .into_iter()
        .filter(|&(x, y)| x <= HISTOGRAM_X_MAX && y.is_finite() && y >= 0.0)
        .collect();

    let y_top = bars
        .iter()
        .chain(curve.iter())
        .map(|(_, y)| *y)
        .fold(1.0, f64::max)
        * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Histogram with data fitted to a power law", ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d(0.0..HISTOGRAM_X_MAX, 0.0..y_top)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Count")
        .y_desc("Count Frequency")
        .x_labels(21)
        .x_label_formatter(&|x| format!("{:.0}", x.round()))
        .label_style(("sans-serif", 25))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(bars.iter().map(|&(x, y)| {
            let left = (x - 0.5).max(0.0);
            let right = (x + 0.5).min(HISTOGRAM_X_MAX);
            Rectangle::new([(left, 0.0), (right, y)], GREEN.filled())
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(curve, BLACK.stroke_width(2)))
        .map_err(|e| PlotError::Drawing(e.to_string()))?
        .label(fit_label(fit))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(2)));

    chart
        .configure_series_labels()
        .label_font(("sans-serif", 25))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}
