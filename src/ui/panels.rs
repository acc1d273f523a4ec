use anyhow::Context;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – country multi-select
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Cheap Arc clone so the selection can be mutated inside the loop.
    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    let n_selected = state.selection.len();
    let n_total = dataset.countries.len();
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(format!("Select Country  ({n_selected}/{n_total})"));
        if ui
            .add_enabled(n_selected > 0, egui::Button::new("Clear").small())
            .clicked()
        {
            state.clear_selection();
        }
    });
    if n_selected == 0 {
        ui.weak("No country selected: showing all rows.");
    }
    ui.add_space(4.0);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for country in &dataset.countries {
                let label = if country.is_empty() {
                    "<empty>"
                } else {
                    country.as_str()
                };
                let mut checked = state.selection.contains(country);
                if ui.checkbox(&mut checked, label).changed() {
                    state.toggle_country(country);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(source) = &state.source {
            ui.label(source.display().to_string());
        }
        if let Some(view) = &state.view {
            ui.label(format!(
                "{} listings loaded, {} visible",
                view.total_rows, view.visible_rows
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open product listings")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        let result = state
            .open(&path)
            .with_context(|| format!("opening {}", path.display()));
        if let Err(e) = result {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
