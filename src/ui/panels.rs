use eframe::egui::{self, Color32, DragValue, RichText, Slider, Ui};

use crate::config::{TOP_N_DEFAULT, TOP_N_MAX, TOP_N_MIN};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – parameter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Data");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    if dataset.is_empty() {
        ui.label("The file has no records.");
        return;
    }
    let Some((lo, hi)) = dataset.year_bounds else {
        ui.label("No record has a readable year.");
        return;
    };

    // ---- Year range ----
    ui.strong("Select a year range for shipwrecks");
    let mut year_min = state.params.year_min;
    let mut year_max = state.params.year_max;
    let from = ui.add(Slider::new(&mut year_min, lo..=hi).text("from"));
    let to = ui.add(Slider::new(&mut year_max, lo..=hi).text("to"));
    if from.changed() || to.changed() {
        state.set_year_range(year_min, year_max);
    }
    if year_min > year_max {
        ui.label(RichText::new("'from' is after 'to'").color(Color32::YELLOW));
    }
    ui.separator();

    // ---- Top-N ----
    ui.strong("Number of top locations to display");
    let mut top_n = state.params.top_n;
    if ui
        .add(DragValue::new(&mut top_n).range(TOP_N_MIN..=TOP_N_MAX))
        .changed()
    {
        state.set_top_n(top_n);
    }
    ui.separator();

    if ui.button("Reset").clicked() {
        state.set_year_range(lo, hi);
        state.set_top_n(TOP_N_DEFAULT);
    }
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
            let can_export = state.analysis.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export markers…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(analysis)) = (&state.dataset, &state.analysis) {
            ui.label(format!(
                "{}: {} shipwrecks loaded, {} in range",
                ds.source.display(),
                ds.len(),
                analysis.records_in_range
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open shipwreck data")
        .add_filter("Supported files", &["csv", "tsv", "txt", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Tab-separated", &["tsv", "txt"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export map markers")
        .set_file_name("markers.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        state.export_markers(&path);
    }
}
