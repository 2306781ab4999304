//! Error Module
//! Error taxonomy shared by the chart plotters, palettes and renderer.

use polars::prelude::PolarsError;
use std::io;
use thiserror::Error;

/// Result type alias using [`ChartError`].
pub type Result<T> = std::result::Result<T, ChartError>;

#[derive(Error, Debug)]
pub enum ChartError {
    /// Requested column is absent from the dataset.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// No columns were requested.
    #[error("empty selection: at least one column is required")]
    EmptySelection,

    /// Palette name does not resolve to a known color sequence.
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Only raised under `PaletteWrap::Strict`.
    #[error("palette has {available} colors but {needed} are required")]
    PaletteExhausted { needed: usize, available: usize },

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("Rendering error: {0}")]
    Render(String),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
