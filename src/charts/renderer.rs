//! Static Chart Renderer
//! Draws chart models to PNG and SVG with plotters.
//!
//! Layout:
//! 1. Value-count grid: one panel per cell, 3 cells per row, empty cells left blank
//! 2. Proportion chart: stacked bars, 45° tick labels, legend titled with the target column

use crate::charts::{ChartGrid, Color as ChartColor, CountPanel, ProportionChart};
use crate::config::RenderConfig;
use crate::error::{ChartError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::io::Cursor;
use std::path::Path;

type DrawResult<T, DB> = std::result::Result<T, DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Default bar fill for value-count panels.
const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Upper y limit of proportion charts (5% headroom above a full bar).
const PROPORTION_Y_MAX: f64 = 1.05;

/// Horizontal gap between neighbouring bars, in pixels per side.
const BAR_GAP: u32 = 8;

fn rgb(color: ChartColor) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn render_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> ChartError {
    ChartError::Render(err.to_string())
}

/// Label of a segmented x position; only segment centers carry text.
fn segment_label(value: &SegmentValue<usize>, labels: &[String]) -> String {
    match value {
        SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticChartRenderer {
    config: RenderConfig,
}

impl StaticChartRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Pixel size of a whole grid figure.
    pub fn grid_size(&self, grid: &ChartGrid) -> Result<(u32, u32)> {
        let scale = |panel: u32, cells: usize| {
            u32::try_from(cells)
                .ok()
                .and_then(|cells| panel.checked_mul(cells))
                .ok_or_else(|| ChartError::Render(format!("{} cells do not fit a bitmap", cells)))
        };
        Ok((
            scale(self.config.panel_width, grid.cols)?,
            scale(self.config.panel_height, grid.rows.max(1))?,
        ))
    }

    /// Whether the configured font family can be loaded for text layout.
    pub fn font_available(&self) -> bool {
        (self.config.font_family.as_str(), self.config.tick_font_size as f64)
            .into_font()
            .box_size("Ag")
            .is_ok()
    }

    pub fn proportion_size(&self) -> (u32, u32) {
        (self.config.figure_width, self.config.figure_height)
    }

    /// Render a value-count grid to PNG bytes.
    pub fn render_grid_png(&self, grid: &ChartGrid) -> Result<Vec<u8>> {
        let (width, height) = self.grid_size(grid)?;
        let mut buffer = vec![0u8; rgb_buffer_len(width, height)?];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            self.draw_grid(&root, grid).map_err(render_error)?;
            root.present().map_err(render_error)?;
        }
        log::debug!("Rendered grid {}x{} px", width, height);
        encode_png(buffer, width, height)
    }

    pub fn save_grid_png(&self, grid: &ChartGrid, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.render_grid_png(grid)?)?;
        log::info!("Saved value-count grid to {}", path.as_ref().display());
        Ok(())
    }

    pub fn save_grid_svg(&self, grid: &ChartGrid, path: impl AsRef<Path>) -> Result<()> {
        let root = SVGBackend::new(path.as_ref(), self.grid_size(grid)?).into_drawing_area();
        self.draw_grid(&root, grid).map_err(render_error)?;
        root.present().map_err(render_error)?;
        log::info!("Saved value-count grid to {}", path.as_ref().display());
        Ok(())
    }

    /// Render a proportion chart to PNG bytes.
    pub fn render_proportion_png(&self, chart: &ProportionChart) -> Result<Vec<u8>> {
        let (width, height) = self.proportion_size();
        let mut buffer = vec![0u8; rgb_buffer_len(width, height)?];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            self.draw_proportion_chart(&root, chart).map_err(render_error)?;
            root.present().map_err(render_error)?;
        }
        encode_png(buffer, width, height)
    }

    pub fn save_proportion_png(&self, chart: &ProportionChart, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.render_proportion_png(chart)?)?;
        Ok(())
    }

    pub fn save_proportion_svg(&self, chart: &ProportionChart, path: impl AsRef<Path>) -> Result<()> {
        let root = SVGBackend::new(path.as_ref(), self.proportion_size()).into_drawing_area();
        self.draw_proportion_chart(&root, chart).map_err(render_error)?;
        root.present().map_err(render_error)?;
        Ok(())
    }

    fn text(&self, size: u32) -> TextStyle<'_> {
        TextStyle::from((self.config.font_family.as_str(), size as f64).into_font()).color(&BLACK)
    }

    fn draw_grid<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        grid: &ChartGrid,
    ) -> DrawResult<(), DB> {
        root.fill(&WHITE)?;
        let cells = root.split_evenly((grid.rows.max(1), grid.cols));

        // Cells past the last panel stay blank
        for (panel, cell) in grid.panels.iter().zip(cells.iter()) {
            self.draw_count_panel(cell, panel)?;
        }
        Ok(())
    }

    fn draw_count_panel<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        panel: &CountPanel,
    ) -> DrawResult<(), DB> {
        let n = panel.bars.len().max(1);
        let labels: Vec<String> = panel.bars.iter().map(|b| b.label.clone()).collect();
        let x_formatter = |v: &SegmentValue<usize>| segment_label(v, &labels);

        let mut chart = ChartBuilder::on(area)
            .caption(&panel.title, self.text(self.config.title_font_size))
            .margin(15)
            .x_label_area_size(55)
            .y_label_area_size(60)
            .build_cartesian_2d((0..n).into_segmented(), 0f64..panel.y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&x_formatter)
            .x_desc(panel.x_label.as_str())
            .y_desc(panel.y_label.as_str())
            .label_style(self.text(self.config.tick_font_size))
            .axis_desc_style(self.text(self.config.label_font_size))
            .draw()?;

        chart.draw_series(panel.bars.iter().enumerate().map(|(i, bar)| {
            let mut rect = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), bar.count as f64),
                ],
                BAR_COLOR.filled(),
            );
            rect.set_margin(0, 0, BAR_GAP, BAR_GAP);
            rect
        }))?;

        Ok(())
    }

    fn draw_proportion_chart<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        chart: &ProportionChart,
    ) -> DrawResult<(), DB> {
        root.fill(&WHITE)?;

        let tick_style = self.text(self.config.tick_font_size);
        let n = chart.categories.len().max(1);
        let slant = chart.tick_rotation.to_radians();

        // Room below the axis for the longest slanted label plus the axis title
        let mut longest = 0u32;
        for label in &chart.categories {
            longest = longest.max(root.estimate_text_size(label, &tick_style)?.0);
        }
        let label_area = ((longest as f64 * slant.sin()) as u32 + 2 * self.config.label_font_size + 20)
            .min(self.config.figure_height / 2);

        let mut cc = ChartBuilder::on(root)
            .caption(&chart.title, self.text(self.config.title_font_size))
            .margin(15)
            .x_label_area_size(label_area)
            .y_label_area_size(60)
            .build_cartesian_2d((0..n).into_segmented(), 0f64..PROPORTION_Y_MAX)?;

        cc.configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&|_| String::new())
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .label_style(tick_style.clone())
            .axis_desc_style(self.text(self.config.label_font_size))
            .draw()?;

        // Legend title is a swatch-less first entry
        cc.draw_series(std::iter::empty::<Rectangle<(SegmentValue<usize>, f64)>>())?
            .label(chart.legend_title.as_str())
            .legend(|(x, y)| EmptyElement::at((x, y)));

        let mut bottoms = vec![0.0f64; chart.categories.len()];
        for segment in &chart.segments {
            let color = rgb(segment.color);
            let rects: Vec<Rectangle<(SegmentValue<usize>, f64)>> = segment
                .proportions
                .iter()
                .enumerate()
                .map(|(i, &share)| {
                    let base = bottoms[i];
                    bottoms[i] += share;
                    let mut rect = Rectangle::new(
                        [
                            (SegmentValue::Exact(i), base),
                            (SegmentValue::Exact(i + 1), base + share),
                        ],
                        color.filled(),
                    );
                    rect.set_margin(0, 0, BAR_GAP, BAR_GAP);
                    rect
                })
                .collect();

            cc.draw_series(rects)?
                .label(segment.label.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
        }

        cc.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK)
            .label_font(tick_style.clone())
            .draw()?;

        for (i, label) in chart.categories.iter().enumerate() {
            let (x, y) = cc.backend_coord(&(SegmentValue::CenterOf(i), 0.0));
            draw_slanted_label(root, label, (x, y + 6), slant, &tick_style)?;
        }

        Ok(())
    }
}

/// Draw `text` along a line rising at `angle`, right-aligned so the label ends
/// at `anchor`. Glyphs stay upright.
fn draw_slanted_label<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    text: &str,
    anchor: (i32, i32),
    angle: f64,
    style: &TextStyle,
) -> DrawResult<(), DB> {
    let mut glyphs = Vec::new();
    let mut widths = Vec::new();
    for c in text.chars() {
        let glyph = c.to_string();
        let (width, _) = area.estimate_text_size(&glyph, style)?;
        glyphs.push(glyph);
        widths.push(width as f64);
    }

    for (glyph, position) in glyphs.into_iter().zip(slanted_positions(&widths, anchor, angle)) {
        area.draw(&Text::new(glyph, position, style.clone()))?;
    }
    Ok(())
}

/// Start point of each glyph on a line rising at `angle` whose far end is
/// `anchor`.
fn slanted_positions(widths: &[f64], anchor: (i32, i32), angle: f64) -> Vec<(i32, i32)> {
    let (cos, sin) = (angle.cos(), angle.sin());
    let length: f64 = widths.iter().sum();

    let mut x = anchor.0 as f64 - length * cos;
    let mut y = anchor.1 as f64 + length * sin;
    widths
        .iter()
        .map(|width| {
            let position = (x.round() as i32, y.round() as i32);
            x += width * cos;
            y -= width * sin;
            position
        })
        .collect()
}

/// Byte length of an RGB bitmap; the bitmap backend indexes it with `u32`.
fn rgb_buffer_len(width: u32, height: u32) -> Result<usize> {
    width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(3))
        .map(|len| len as usize)
        .ok_or_else(|| {
            ChartError::Render(format!("{}x{} px is too large for a bitmap", width, height))
        })
}

fn encode_png(buffer: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>> {
    let image = image::RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| ChartError::Render("bitmap buffer size mismatch".to_string()))?;
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

impl ChartGrid {
    /// Save with the default render settings.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        StaticChartRenderer::default().save_grid_png(self, path)
    }

    pub fn save_svg(&self, path: impl AsRef<Path>) -> Result<()> {
        StaticChartRenderer::default().save_grid_svg(self, path)
    }
}

impl ProportionChart {
    /// Save with the default render settings.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        StaticChartRenderer::default().save_proportion_png(self, path)
    }

    pub fn save_svg(&self, path: impl AsRef<Path>) -> Result<()> {
        StaticChartRenderer::default().save_proportion_svg(self, path)
    }
}
