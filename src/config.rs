//! Render Configuration Module
//! Figure sizes, fonts and the default policies used by the plotters.

use crate::charts::PaletteWrap;
use crate::error::Result;
use crate::stats::CountOrder;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Panels per row in a value-count grid.
pub const GRID_COLUMNS: usize = 3;

/// Fraction of the tallest bar added above it so labels are not clipped.
pub const Y_MARGIN: f64 = 0.1;

/// Rotation of the x tick labels on proportion charts, in degrees.
pub const TICK_ROTATION_DEGREES: f64 = 45.0;

/// Rendering settings. Missing fields in a settings file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Pixel size of one value-count panel (6in x 6in at 100 dpi).
    pub panel_width: u32,
    pub panel_height: u32,
    /// Pixel size of one proportion chart.
    pub figure_width: u32,
    pub figure_height: u32,
    pub font_family: String,
    pub title_font_size: u32,
    pub label_font_size: u32,
    pub tick_font_size: u32,
    pub count_order: CountOrder,
    pub palette_wrap: PaletteWrap,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            panel_width: 600,
            panel_height: 600,
            figure_width: 640,
            figure_height: 480,
            font_family: "sans-serif".to_string(),
            title_font_size: 20,
            label_font_size: 16,
            tick_font_size: 13,
            count_order: CountOrder::default(),
            palette_wrap: PaletteWrap::default(),
        }
    }
}

impl RenderConfig {
    /// Load settings from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&text)?;
        log::info!("Loaded render settings from {}", path.as_ref().display());
        Ok(config)
    }
}
