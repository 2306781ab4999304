//! Chartify EDA - Categorical Chart Viewer
//!
//! Desktop viewer for value-count grids and target-proportion charts of CSV data.

use chartify_eda::gui::ChartifyApp;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1500.0, 900.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("Chartify EDA"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Chartify EDA",
        options,
        Box::new(|cc| Ok(Box::new(ChartifyApp::new(cc)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {}", e))
}
