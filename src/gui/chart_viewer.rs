//! Chart Viewer Widget
//! Right side scrollable panel showing value-count grids and proportion charts
//! with egui_plot.

use crate::charts::{ChartGrid, Color, CountPanel, ProportionChart, RenderSurface};
use crate::config::GRID_COLUMNS;
use crate::error::Result;
use egui::{Color32, RichText, ScrollArea};
use egui_plot::{Bar, BarChart, Plot};

/// Chart card configuration
const CHART_SPACING: f32 = 15.0;
const CARD_WIDTH: f32 = 420.0;
const PANEL_HEIGHT: f32 = 300.0;
const PROPORTION_HEIGHT: f32 = 340.0;
const BAR_WIDTH: f64 = 0.6;

/// Default fill for value-count bars
const BAR_COLOR: Color32 = Color32::from_rgb(31, 119, 180);

fn color32(color: Color) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

/// Charts currently on display.
#[derive(Default)]
pub struct ChartViewer {
    /// Latest value-count grid
    pub grid: Option<ChartGrid>,
    /// Proportion charts in the order they were shown
    pub proportion_charts: Vec<ProportionChart>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all charts
    pub fn clear(&mut self) {
        self.grid = None;
        self.proportion_charts.clear();
    }

    pub fn set_grid(&mut self, grid: ChartGrid) {
        self.grid = Some(grid);
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_none() && self.proportion_charts.is_empty()
    }

    /// Draw the chart viewer
    pub fn show(&mut self, ui: &mut egui::Ui) {
        if self.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Charts").size(20.0));
            });
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if let Some(grid) = &self.grid {
                    ui.label(RichText::new("Value Counts").size(18.0).strong());
                    ui.add_space(8.0);
                    Self::draw_grid(ui, grid);
                    ui.add_space(CHART_SPACING);
                }

                for (i, chart) in self.proportion_charts.iter().enumerate() {
                    Self::draw_proportion_card(ui, chart, i);
                    ui.add_space(CHART_SPACING);
                }
            });
    }

    /// Draw the grid row by row; the last row only holds its populated cells
    fn draw_grid(ui: &mut egui::Ui, grid: &ChartGrid) {
        for row in 0..grid.rows {
            ui.horizontal(|ui| {
                for (col, panel) in grid.row(row).iter().enumerate() {
                    let id = row * GRID_COLUMNS + col;
                    Self::draw_count_card(ui, panel, id);
                    ui.add_space(CHART_SPACING);
                }
            });
            ui.add_space(CHART_SPACING);
        }
    }

    fn card_frame(ui: &egui::Ui) -> egui::Frame {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_gray(120)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
    }

    fn draw_count_card(ui: &mut egui::Ui, panel: &CountPanel, id: usize) {
        Self::card_frame(ui).show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.vertical(|ui| {
                ui.label(RichText::new(&panel.title).size(15.0).strong());
                ui.add_space(6.0);

                let labels: Vec<String> = panel.bars.iter().map(|b| b.label.clone()).collect();
                let bars: Vec<Bar> = panel
                    .bars
                    .iter()
                    .enumerate()
                    .map(|(i, bar)| {
                        Bar::new(i as f64, bar.count as f64)
                            .width(BAR_WIDTH)
                            .fill(BAR_COLOR)
                            .name(&bar.label)
                    })
                    .collect();

                Plot::new(format!("counts_{}_{}", id, panel.column))
                    .height(PANEL_HEIGHT)
                    .allow_zoom(false)
                    .allow_drag(false)
                    .allow_scroll(false)
                    .include_y(0.0)
                    .include_y(panel.y_max)
                    .x_axis_label(panel.x_label.clone())
                    .y_axis_label(panel.y_label.clone())
                    .x_axis_formatter(move |mark, _range| category_tick(mark.value, &labels))
                    .show(ui, |plot_ui| {
                        plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR));
                    });
            });
        });
    }

    fn draw_proportion_card(ui: &mut egui::Ui, chart: &ProportionChart, id: usize) {
        Self::card_frame(ui).show(ui, |ui| {
            ui.set_width(CARD_WIDTH * 2.0);
            ui.vertical(|ui| {
                ui.label(RichText::new(&chart.title).size(15.0).strong());
                ui.add_space(6.0);

                // Legend: title, then one swatch per target category
                ui.horizontal(|ui| {
                    ui.label(RichText::new(format!("{}:", chart.legend_title)).strong());
                    for segment in &chart.segments {
                        let (rect, _) =
                            ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                        ui.painter().rect_filled(rect, 3.0, color32(segment.color));
                        ui.label(segment.label.as_str());
                        ui.add_space(8.0);
                    }
                });

                ui.add_space(6.0);

                let mut layers: Vec<BarChart> = Vec::new();
                for segment in &chart.segments {
                    let color = color32(segment.color);
                    let bars: Vec<Bar> = segment
                        .proportions
                        .iter()
                        .enumerate()
                        .map(|(i, &share)| {
                            Bar::new(i as f64, share)
                                .width(BAR_WIDTH)
                                .fill(color)
                                .name(format!("{} / {}", chart.categories[i], segment.label))
                        })
                        .collect();

                    let below: Vec<&BarChart> = layers.iter().collect();
                    let layer = BarChart::new(bars)
                        .color(color)
                        .name(&segment.label)
                        .stack_on(&below);
                    layers.push(layer);
                }

                let labels = chart.categories.clone();
                Plot::new(format!("proportions_{}_{}", id, chart.column))
                    .height(PROPORTION_HEIGHT)
                    .allow_zoom(false)
                    .allow_drag(false)
                    .allow_scroll(false)
                    .include_y(0.0)
                    .include_y(1.05)
                    .x_axis_label(chart.x_label.clone())
                    .y_axis_label(chart.y_label.clone())
                    .x_axis_formatter(move |mark, _range| category_tick(mark.value, &labels))
                    .show(ui, |plot_ui| {
                        for layer in layers {
                            plot_ui.bar_chart(layer);
                        }
                    });
            });
        });
    }
}

/// Tick text for a bar position; grid marks between bars stay unlabeled.
fn category_tick(value: f64, labels: &[String]) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

impl RenderSurface for ChartViewer {
    fn show(&mut self, chart: &ProportionChart) -> Result<()> {
        self.proportion_charts.push(chart.clone());
        Ok(())
    }
}
