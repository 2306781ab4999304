//! Chartify EDA Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{
    CategoricalCountPlotter, CategoricalProportionPlotter, PaletteSpec, PngDirectory,
    RenderSurface, StaticChartRenderer,
};
use crate::config::RenderConfig;
use crate::data::DataLoader;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use polars::prelude::*;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete {
        df: DataFrame,
        path: PathBuf,
    },
    Error(String),
}

/// Main application window.
pub struct ChartifyApp {
    loader: DataLoader,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    config: RenderConfig,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl ChartifyApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            loader: DataLoader::new(),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            config: RenderConfig::default(),
            load_rx: None,
            is_loading: false,
        }
    }

    /// Handle CSV file selection, loading in a background thread
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            // Clear previous charts
            self.chart_viewer.clear();
            self.control_panel.settings.csv_path = Some(path.clone());
            self.control_panel.set_progress(0.0, "Loading CSV file...");
            self.is_loading = true;

            let (tx, rx) = channel();
            self.load_rx = Some(rx);

            thread::spawn(move || {
                let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));

                match DataLoader::read_csv(&path.to_string_lossy()) {
                    Ok(df) => {
                        let _ = tx.send(LoadResult::Complete { df, path });
                    }
                    Err(e) => {
                        let _ = tx.send(LoadResult::Error(e.to_string()));
                    }
                }
            });
        }
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_progress(0.0, &status);
                    }
                    LoadResult::Complete { df, path } => {
                        let row_count = df.height();
                        self.loader.set_dataframe(df, Some(path));
                        let columns = self.loader.get_columns();
                        let categorical = self.loader.get_categorical_columns();
                        self.control_panel
                            .update_columns(columns.clone(), &categorical);
                        self.control_panel.set_progress(
                            0.0,
                            &format!(
                                "Loaded {} rows, {} columns ({} categorical)",
                                row_count,
                                columns.len(),
                                categorical.len()
                            ),
                        );
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        log::error!("Failed to load CSV: {}", error);
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Load render settings from a JSON file
    fn handle_load_settings(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        else {
            return;
        };

        match RenderConfig::from_json_file(&path) {
            Ok(config) => {
                self.config = config;
                self.control_panel.settings.settings_path = Some(path);
                self.control_panel.set_progress(0.0, "Render settings loaded");
            }
            Err(e) => {
                log::error!("Failed to load settings: {}", e);
                self.control_panel
                    .set_progress(0.0, &format!("Error: {}", e));
            }
        }
    }

    fn handle_plot_value_counts(&mut self) {
        let Some(df) = self.loader.get_dataframe() else {
            self.control_panel.set_progress(0.0, "No data loaded");
            return;
        };
        let columns = self.control_panel.get_selected_cols();

        match CategoricalCountPlotter::from_config(&self.config).render(df, &columns) {
            Ok(grid) => {
                let count = grid.panels.len();
                self.chart_viewer.set_grid(grid);
                self.control_panel.export_enabled = true;
                self.control_panel
                    .set_progress(100.0, &format!("Complete! {} value-count panels", count));
            }
            Err(e) => {
                log::error!("Value counts failed: {}", e);
                self.control_panel
                    .set_progress(0.0, &format!("Error: {}", e));
            }
        }
    }

    fn handle_plot_proportions(&mut self) {
        let Some(df) = self.loader.get_dataframe() else {
            self.control_panel.set_progress(0.0, "No data loaded");
            return;
        };
        let columns = self.control_panel.get_selected_cols();
        let target = self.control_panel.settings.target_col.clone();
        let palette = PaletteSpec::Named(self.control_panel.settings.palette.clone());

        self.chart_viewer.proportion_charts.clear();
        let plotter = CategoricalProportionPlotter::from_config(palette, &self.config);

        match plotter.render(df, &columns, &target, &mut self.chart_viewer) {
            Ok(charts) => {
                self.control_panel.export_enabled = true;
                self.control_panel.set_progress(
                    100.0,
                    &format!("Complete! {} proportion charts for {}", charts.len(), target),
                );
            }
            Err(e) => {
                log::error!("Proportion charts failed: {}", e);
                self.control_panel
                    .set_progress(0.0, &format!("Error: {}", e));
            }
        }
    }

    /// Export the value-count grid to a PNG file and the proportion charts
    /// into a folder next to it
    fn handle_export_png(&mut self) {
        if self.chart_viewer.is_empty() {
            self.control_panel.set_progress(0.0, "No charts to export");
            return;
        }

        let Some(output_path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("value_counts.png")
            .save_file()
        else {
            return; // User cancelled
        };

        match self.export_charts(&output_path) {
            Ok(message) => {
                log::info!("{}", message);
                self.control_panel.set_progress(100.0, &message);
                if let Some(dir) = output_path.parent() {
                    if let Err(e) = open::that(dir) {
                        log::warn!("Could not open {}: {}", dir.display(), e);
                    }
                }
            }
            Err(e) => {
                log::error!("Export failed: {}", e);
                self.control_panel
                    .set_progress(0.0, &format!("Error: {}", e));
            }
        }
    }

    fn export_charts(&self, output_path: &std::path::Path) -> crate::Result<String> {
        let renderer = StaticChartRenderer::new(self.config.clone());
        if !renderer.font_available() {
            log::warn!(
                "Font family '{}' could not be loaded; export may fail",
                self.config.font_family
            );
        }
        let mut exported = 0;

        if let Some(grid) = &self.chart_viewer.grid {
            renderer.save_grid_png(grid, output_path)?;
            exported += 1;
        }

        if !self.chart_viewer.proportion_charts.is_empty() {
            let stem = output_path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "charts".to_string());
            let dir = output_path.with_file_name(format!("{}_proportions", stem));
            let mut surface = PngDirectory::new(&dir, renderer)?;
            for chart in &self.chart_viewer.proportion_charts {
                surface.show(chart)?;
            }
            exported += surface.written().len();
        }

        Ok(format!("Complete! Exported {} images", exported))
    }
}

impl eframe::App for ChartifyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::LoadSettings => self.handle_load_settings(),
                        ControlPanelAction::PlotValueCounts => self.handle_plot_value_counts(),
                        ControlPanelAction::PlotProportions => self.handle_plot_proportions(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
