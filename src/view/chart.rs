//! Line chart and the canvas it is drawn on
//!
//! A canvas holds at most one chart. Drawing a new chart replaces the
//! previous one, so repeated refreshes never stack charts.

use serde::Serialize;

/// Dataset label of the trend chart
pub const CHART_LABEL: &str = "Confirmed for the last two weeks";

/// Line and fill colour of the trend chart
pub const CHART_COLOR: &str = "#feb72b";

/// Canvas id the dashboard draws its trend chart on
pub const LINE_CHART_ID: &str = "lineChart";

/// A single-dataset line chart
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LineChart {
    pub label: String,
    pub color: String,
    /// X-axis labels, one per point
    pub labels: Vec<String>,
    /// Y values, one per point
    pub values: Vec<u64>,
}

impl LineChart {
    /// Chart with the dashboard's default label and colour
    pub fn new(values: Vec<u64>, labels: Vec<String>) -> Self {
        Self {
            label: CHART_LABEL.to_string(),
            color: CHART_COLOR.to_string(),
            labels,
            values,
        }
    }

    /// Number of plottable points (labels and values paired up)
    pub fn len(&self) -> usize {
        self.values.len().min(self.labels.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Plot into a text grid `height` rows tall, plus an axis and a label row
    pub fn plot(&self, height: usize) -> Vec<String> {
        if self.is_empty() {
            return vec!["(no data)".to_string()];
        }

        let n = self.len();
        let height = height.max(2);
        let values = &self.values[..n];
        let labels = &self.labels[..n];
        let min = values.iter().copied().min().unwrap_or(0);
        let max = values.iter().copied().max().unwrap_or(0);
        let span = max - min;

        let rows: Vec<usize> = values
            .iter()
            .map(|v| {
                if span == 0 {
                    0
                } else {
                    ((v - min) as f64 / span as f64 * (height - 1) as f64).round() as usize
                }
            })
            .collect();

        let col_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(1) + 1;
        let axis_width = max.to_string().len();

        let mut lines = Vec::with_capacity(height + 2);
        for r in (0..height).rev() {
            let tick = if r == height - 1 {
                max.to_string()
            } else if r == 0 {
                min.to_string()
            } else {
                String::new()
            };

            let mut line = format!("{:>w$} |", tick, w = axis_width);
            for &row in &rows {
                let cell = if row == r { "*" } else { "" };
                line.push_str(&format!("{:^w$}", cell, w = col_width));
            }
            lines.push(line.trim_end().to_string());
        }

        lines.push(format!(
            "{:>w$} +{}",
            "",
            "-".repeat(col_width * n),
            w = axis_width
        ));

        let mut label_line = format!("{:>w$}  ", "", w = axis_width);
        for label in labels {
            label_line.push_str(&format!("{:^w$}", label, w = col_width));
        }
        lines.push(label_line.trim_end().to_string());

        lines
    }
}

/// Drawing surface holding the current chart
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Canvas {
    pub id: String,
    chart: Option<LineChart>,
}

impl Canvas {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            chart: None,
        }
    }

    /// Draw a chart, destroying whatever was drawn before
    ///
    /// Returns the chart that was replaced, if any.
    pub fn draw(&mut self, chart: LineChart) -> Option<LineChart> {
        self.chart.replace(chart)
    }

    /// The chart currently on the canvas
    pub fn chart(&self) -> Option<&LineChart> {
        self.chart.as_ref()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(LINE_CHART_ID)
    }
}
