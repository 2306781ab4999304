//! Control Panel Widget
//! Left side panel with data source, column selection and chart actions.

use crate::charts::PALETTE_NAMES;
use egui::{Color32, ComboBox, RichText, ScrollArea};
use std::path::PathBuf;

/// User settings for chart generation
#[derive(Clone)]
pub struct UserSettings {
    pub csv_path: Option<PathBuf>,
    pub target_col: String,
    pub palette: String,
    pub settings_path: Option<PathBuf>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            csv_path: None,
            target_col: String::new(),
            palette: "husl".to_string(),
            settings_path: None,
        }
    }
}

/// Left side control panel with file selection and plotting controls.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub columns: Vec<String>,
    pub selected_cols: Vec<bool>,
    pub progress: f32,
    pub status: String,
    pub plot_enabled: bool,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            columns: Vec::new(),
            selected_cols: Vec::new(),
            progress: 0.0,
            status: "Ready".to_string(),
            plot_enabled: false,
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update available columns after CSV load, preselecting the categorical ones
    pub fn update_columns(&mut self, columns: Vec<String>, categorical: &[String]) {
        self.selected_cols = columns.iter().map(|c| categorical.contains(c)).collect();
        self.settings.target_col = categorical.last().cloned().unwrap_or_default();
        self.plot_enabled = !columns.is_empty();
        self.export_enabled = false;
        self.columns = columns;
    }

    /// Get selected columns in dataset order
    pub fn get_selected_cols(&self) -> Vec<String> {
        self.columns
            .iter()
            .zip(self.selected_cols.iter())
            .filter(|(_, &selected)| selected)
            .map(|(col, _)| col.clone())
            .collect()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Chartify EDA")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Categorical Explorer")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.settings.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Column Selection Section =====
        ui.label(RichText::new("🔧 Columns").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(180.0).show(ui, |ui| {
                    for (i, col) in self.columns.iter().enumerate() {
                        if i < self.selected_cols.len() {
                            ui.checkbox(&mut self.selected_cols[i], col);
                        }
                    }
                });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                self.selected_cols.iter_mut().for_each(|v| *v = true);
            }
            if ui.small_button("Clear All").clicked() {
                self.selected_cols.iter_mut().for_each(|v| *v = false);
            }
        });

        ui.add_space(10.0);

        let label_width = 110.0;
        let combo_width = 150.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Target Column:"));
            ComboBox::from_id_salt("target_col")
                .width(combo_width)
                .selected_text(&self.settings.target_col)
                .show_ui(ui, |ui| {
                    for col in &self.columns {
                        ui.selectable_value(&mut self.settings.target_col, col.clone(), col);
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Palette:"));
            ComboBox::from_id_salt("palette")
                .width(combo_width)
                .selected_text(&self.settings.palette)
                .show_ui(ui, |ui| {
                    for name in PALETTE_NAMES {
                        ui.selectable_value(&mut self.settings.palette, name.to_string(), name);
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            let settings_text = self
                .settings
                .settings_path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "Default render settings".to_string());
            ui.label(RichText::new(settings_text).size(11.0).color(Color32::GRAY));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("⚙ Load").clicked() {
                    action = ControlPanelAction::LoadSettings;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.plot_enabled, |ui| {
                let button = egui::Button::new(RichText::new("▶ Value Counts").size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::PlotValueCounts;
                }

                ui.add_space(8.0);

                let button = egui::Button::new(RichText::new("▶ Target Proportions").size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::PlotProportions;
                }
            });

            ui.add_space(8.0);

            ui.add_enabled_ui(self.export_enabled, |ui| {
                let export_button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(export_button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Complete") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    LoadSettings,
    PlotValueCounts,
    PlotProportions,
    ExportPng,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_columns_preselects_categorical() {
        let mut panel = ControlPanel::new();
        let columns = vec!["id".to_string(), "status".to_string(), "churned".to_string()];
        let categorical = vec!["status".to_string(), "churned".to_string()];
        panel.update_columns(columns, &categorical);

        assert_eq!(panel.get_selected_cols(), vec!["status", "churned"]);
        assert_eq!(panel.settings.target_col, "churned");
        assert!(panel.plot_enabled);
        assert!(!panel.export_enabled);
    }

    #[test]
    fn test_defaults() {
        let panel = ControlPanel::default();
        assert_eq!(panel.settings.palette, "husl");
        assert!(panel.get_selected_cols().is_empty());
        assert!(!panel.plot_enabled);
    }
}
