//! Charts module - chart models, plotters, rendering and display surfaces

mod colors;
mod model;
mod plotter;
mod renderer;
mod surface;

pub use colors::{hls_palette, husl_palette, Color, PaletteSpec, PaletteWrap, PALETTE_NAMES};
pub use model::{Bar, ChartGrid, CountPanel, ProportionChart, Segment};
pub use plotter::{
    render_proportions, render_value_counts, CategoricalCountPlotter,
    CategoricalProportionPlotter,
};
pub use renderer::StaticChartRenderer;
pub use surface::{ChartRecorder, PngDirectory, RenderSurface};
