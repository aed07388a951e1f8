use std::path::Path;

use crate::analysis::{run, Analysis, AnalysisParams};
use crate::color::ColorMap;
use crate::config::{clamp_top_n, ColumnConfig};
use crate::data::loader::load_file;
use crate::data::model::ShipwreckDataset;
use crate::report::write_markers_json;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until user loads a file). Loaded once, re-filtered
    /// on every parameter change.
    pub dataset: Option<ShipwreckDataset>,

    /// Column names used when loading.
    pub columns: ColumnConfig,

    /// Current year range and top-N.
    pub params: AnalysisParams,

    /// Result of the last pass (cached until `params` change).
    pub analysis: Option<Analysis>,

    /// One colour per top-N location (bars and markers).
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(columns: ColumnConfig) -> Self {
        Self {
            dataset: None,
            columns,
            params: AnalysisParams {
                year_min: 0,
                year_max: 0,
                top_n: crate::config::TOP_N_DEFAULT,
            },
            analysis: None,
            color_map: ColorMap::default(),
            status_message: None,
        }
    }

    /// Load `path`, replacing the current dataset on success. Failures are
    /// logged and shown in the status line; the previous dataset stays.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path, &self.columns) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records, years {:?}",
                    dataset.len(),
                    dataset.year_bounds
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset, reset parameters to its full range.
    pub fn set_dataset(&mut self, dataset: ShipwreckDataset) {
        self.params = AnalysisParams::for_dataset(&dataset);
        self.dataset = Some(dataset);
        self.analysis = None;
        self.status_message = None;
        self.refresh();
    }

    pub fn set_year_range(&mut self, year_min: i32, year_max: i32) {
        self.params.year_min = year_min;
        self.params.year_max = year_max;
        self.refresh();
    }

    pub fn set_top_n(&mut self, top_n: usize) {
        self.params.top_n = clamp_top_n(top_n);
        self.refresh();
    }

    /// Recompute the analysis if the parameters changed since the last pass.
    pub fn refresh(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        if matches!(&self.analysis, Some(a) if a.params == self.params) {
            return;
        }
        let analysis = run(&dataset.records, &self.params);
        self.color_map = ColorMap::new(analysis.top_locations.iter().map(|e| &e.key));
        self.analysis = Some(analysis);
    }

    /// Write the current map markers as JSON.
    pub fn export_markers(&mut self, path: &Path) {
        let Some(analysis) = &self.analysis else {
            self.status_message = Some("Nothing to export: no dataset loaded".to_string());
            return;
        };
        match write_markers_json(path, &analysis.map) {
            Ok(()) => {
                log::info!("Exported markers to {}", path.display());
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Marker export failed: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn dataset() -> ShipwreckDataset {
        let rec = |year, place: &str, lat: &str| {
            Record::new(
                Some(year),
                place,
                "Boston",
                Some(lat.to_string()),
                Some("-70".to_string()),
            )
        };
        ShipwreckDataset::from_records(
            "mem",
            vec![
                rec(1850, "Miami", "25"),
                rec(1860, "Miami", "26"),
                rec(1900, "Key West", "24"),
                rec(1950, "Nantucket", "41"),
            ],
        )
    }

    #[test]
    fn dataset_resets_params_and_computes() {
        let mut state = AppState::new(ColumnConfig::default());
        state.set_dataset(dataset());

        assert_eq!(state.params.year_min, 1850);
        assert_eq!(state.params.year_max, 1950);
        let analysis = state.analysis.as_ref().unwrap();
        assert_eq!(analysis.top_locations.pairs()[0], ("Miami", 2));
        assert_ne!(state.color_map.color_for("Miami"), eframe::egui::Color32::GRAY);
    }

    #[test]
    fn parameter_changes_recompute() {
        let mut state = AppState::new(ColumnConfig::default());
        state.set_dataset(dataset());

        state.set_year_range(1890, 1960);
        let analysis = state.analysis.as_ref().unwrap();
        assert_eq!(analysis.records_in_range, 2);
        assert_eq!(analysis.top_locations.pairs(), vec![("Key West", 1), ("Nantucket", 1)]);

        state.set_top_n(99);
        assert_eq!(state.params.top_n, 10);
        assert_eq!(state.analysis.as_ref().unwrap().params.top_n, 10);

        state.set_year_range(1700, 1800);
        assert!(state.analysis.as_ref().unwrap().map.is_no_data());
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = AppState::new(ColumnConfig::default());
        state.set_dataset(dataset());
        state.load_path(Path::new("/no/such/file.csv"));

        assert!(state.dataset.is_some());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
    }

    #[test]
    fn export_writes_json() {
        let mut state = AppState::new(ColumnConfig::default());
        state.set_dataset(dataset());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("markers.json");
        state.export_markers(&path);
        assert!(state.status_message.is_none());

        let text = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["status"], "markers");
        assert_eq!(json["markers"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn colours_follow_location_keys_not_cleaned_labels() {
        let mut state = AppState::new(ColumnConfig::default());
        state.set_dataset(ShipwreckDataset::from_records(
            "mem",
            vec![
                Record::new(Some(1900), "Miami", "Boston", None, None),
                Record::new(Some(1900), "Miami", "Boston", None, None),
                Record::new(Some(1900), "Miami!", "Boston", None, None),
            ],
        ));

        let miami = state.color_map.color_for("Miami");
        let miami_bang = state.color_map.color_for("Miami!");
        assert_ne!(miami, eframe::egui::Color32::GRAY);
        assert_ne!(miami_bang, eframe::egui::Color32::GRAY);
        assert_ne!(miami, miami_bang);
    }
}
