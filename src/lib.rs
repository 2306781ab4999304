//! Chartify EDA - categorical charts for exploratory data analysis
//!
//! Two chart builders over a Polars `DataFrame`:
//! - [`render_value_counts`]: a grid of value-count bar charts, three per row
//! - [`render_proportions`]: per column, a stacked bar chart of a target
//!   column's row-normalized proportions, shown on a [`RenderSurface`]

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod gui;
pub mod stats;

pub use charts::{
    render_proportions, render_value_counts, CategoricalCountPlotter,
    CategoricalProportionPlotter, ChartGrid, ChartRecorder, PaletteSpec, ProportionChart,
    RenderSurface, StaticChartRenderer,
};
pub use config::RenderConfig;
pub use error::{ChartError, Result};
