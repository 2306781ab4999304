//! Chart Model Module
//! Numeric content of the charts, independent of how they are drawn.

use crate::charts::Color;
use crate::config::{GRID_COLUMNS, TICK_ROTATION_DEGREES};
use crate::error::Result;
use serde::Serialize;

/// One bar of a value-count panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub count: usize,
}

/// Bar chart of the value counts of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountPanel {
    pub column: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
    /// Upper y limit, including the margin above the tallest bar.
    pub y_max: f64,
}

impl CountPanel {
    /// Sum of bar heights, i.e. the number of non-missing rows.
    pub fn total(&self) -> usize {
        self.bars.iter().map(|b| b.count).sum()
    }

    pub fn count_of(&self, label: &str) -> Option<usize> {
        self.bars.iter().find(|b| b.label == label).map(|b| b.count)
    }
}

/// Value-count panels laid out row-major, three per row.
///
/// Only populated cells exist: the grid is as wide as its panel count allows
/// (one column for a single panel) and the last row may hold fewer panels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartGrid {
    pub rows: usize,
    pub cols: usize,
    pub panels: Vec<CountPanel>,
}

impl ChartGrid {
    pub fn new(panels: Vec<CountPanel>) -> Self {
        Self {
            rows: panels.len().div_ceil(GRID_COLUMNS),
            cols: panels.len().clamp(1, GRID_COLUMNS),
            panels,
        }
    }

    /// (row, column) of the panel at `index`.
    pub fn cell(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Panels in grid row `row`.
    pub fn row(&self, row: usize) -> &[CountPanel] {
        let start = (row * self.cols).min(self.panels.len());
        let end = (start + self.cols).min(self.panels.len());
        &self.panels[start..end]
    }

    pub fn panel(&self, column: &str) -> Option<&CountPanel> {
        self.panels.iter().find(|p| p.column == column)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One stack layer: a target category and its share in every bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub label: String,
    pub color: Color,
    /// One proportion per bar, aligned with `ProportionChart::categories`.
    pub proportions: Vec<f64>,
}

/// Stacked bar chart of a target column's proportions across one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProportionChart {
    pub column: String,
    pub target_column: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub tick_rotation: f64,
    /// Bar labels (categories of `column`).
    pub categories: Vec<String>,
    /// Stack layers (categories of `target_column`), bottom first.
    pub segments: Vec<Segment>,
}

impl ProportionChart {
    pub fn new(column: &str, target_column: &str) -> Self {
        Self {
            column: column.to_string(),
            target_column: target_column.to_string(),
            title: format!("Percentage Distribution of {} across {}", target_column, column),
            x_label: column.to_string(),
            y_label: "Percentage".to_string(),
            legend_title: target_column.to_string(),
            tick_rotation: TICK_ROTATION_DEGREES,
            categories: Vec::new(),
            segments: Vec::new(),
        }
    }

    /// Segments of bar `index` as (target label, proportion).
    pub fn bar(&self, index: usize) -> Vec<(&str, f64)> {
        self.segments
            .iter()
            .filter_map(|s| s.proportions.get(index).map(|p| (s.label.as_str(), *p)))
            .collect()
    }

    /// Stacked height of bar `index`.
    pub fn bar_total(&self, index: usize) -> f64 {
        self.bar(index).iter().map(|(_, p)| p).sum()
    }

    /// Share of `target` within the bar for `category`.
    pub fn proportion(&self, category: &str, target: &str) -> Option<f64> {
        let index = self.categories.iter().position(|c| c == category)?;
        self.segments
            .iter()
            .find(|s| s.label == target)
            .and_then(|s| s.proportions.get(index).copied())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
