//! Bar chart rendering.
//!
//! Each aggregate becomes one [`BarChart`], drawn with `plotters` into an SVG
//! string. Values may be negative (sentiment); bars then grow downwards from
//! zero.

use plotters::coord::Shift;
use plotters::coord::ranged1d::{IntoSegmentedCoord, SegmentValue};
use plotters::prelude::*;

use crate::error::{Result, SlackpackError};

/// Default page size in pixels.
pub const CHART_SIZE: (u32, u32) = (900, 600);

/// A titled bar chart with one bar per category.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<(String, f64)>,
}

impl BarChart {
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            bars: Vec::new(),
        }
    }

    /// Builder method to set bars from integer counts.
    #[must_use]
    pub fn with_counts<I, S>(mut self, counts: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        self.bars = counts
            .into_iter()
            .map(|(label, count)| (label.into(), count as f64))
            .collect();
        self
    }

    /// Builder method to set bars from real values.
    #[must_use]
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.bars = values
            .into_iter()
            .map(|(label, value)| (label.into(), value))
            .collect();
        self
    }

    /// Returns `true` if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Y axis range: always includes zero, never degenerate.
    pub fn value_range(&self) -> (f64, f64) {
        let (mut low, mut high) = self
            .bars
            .iter()
            .fold((0.0_f64, 0.0_f64), |(lo, hi), (_, v)| (lo.min(*v), hi.max(*v)));

        if high - low < f64::EPSILON {
            high = low + 1.0;
        }
        // Headroom so the tallest bar doesn't touch the frame.
        let pad = (high - low) * 0.05;
        if high > 0.0 {
            high += pad;
        }
        if low < 0.0 {
            low -= pad;
        }
        (low, high)
    }

    /// Renders the chart to an SVG document.
    pub fn render_svg(&self, size: (u32, u32)) -> Result<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            self.draw(&root)
                .map_err(|e| SlackpackError::render(&self.title, e))?;
            root.present()
                .map_err(|e| SlackpackError::render(&self.title, e))?;
        }
        Ok(svg)
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;

        let slots = self.bars.len().max(1);
        let (low, high) = self.value_range();
        let longest_label = self.bars.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);

        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, ("sans-serif", 26))
            .margin(20)
            .x_label_area_size(40 + (longest_label.min(24) as u32) * 7)
            .y_label_area_size(70)
            .build_cartesian_2d((0..slots).into_segmented(), low..high)?;

        let labels: Vec<&str> = self.bars.iter().map(|(l, _)| l.as_str()).collect();
        let formatter = |value: &SegmentValue<usize>| match value {
            SegmentValue::CenterOf(i) => labels.get(*i).map(|l| (*l).to_string()).unwrap_or_default(),
            _ => String::new(),
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(slots)
            .x_label_formatter(&formatter)
            .x_label_style(
                ("sans-serif", 13)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .axis_desc_style(("sans-serif", 16))
            .draw()?;

        chart.draw_series(self.bars.iter().enumerate().map(|(i, (_, value))| {
            let (from, to) = if *value >= 0.0 { (0.0, *value) } else { (*value, 0.0) };
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(i), from), (SegmentValue::Exact(i + 1), to)],
                BLUE.mix(0.7).filled(),
            );
            bar.set_margin(0, 0, 4, 4);
            bar
        }))?;

        Ok(())
    }
}
