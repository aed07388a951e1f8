//! One recomputation pass: year filter → top-N per column → map markers.
//!
//! Everything here is a pure function of the loaded records and the user's
//! [`AnalysisParams`]; the viewer and the report both call [`run`].

use serde::Serialize;

use crate::config::{clamp_top_n, TOP_N_DEFAULT};
use crate::data::aggregate::{top_n, TopNResult};
use crate::data::filter::{filter_by_membership, filter_by_year};
use crate::data::model::{KeyField, Record, ShipwreckDataset};
use crate::data::sanitize::{
    centroid, drop_invalid_coordinates, sanitize_label, to_markers, Marker,
};

/// User-selected parameters for one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisParams {
    pub year_min: i32,
    pub year_max: i32,
    pub top_n: usize,
}

impl AnalysisParams {
    /// The full observed year range and the default top-N.
    pub fn for_dataset(dataset: &ShipwreckDataset) -> Self {
        let (year_min, year_max) = dataset.year_bounds.unwrap_or((0, 0));
        Self {
            year_min,
            year_max,
            top_n: TOP_N_DEFAULT,
        }
    }
}

/// Labelled bar-chart series: category label → count.
#[derive(Debug, Clone, PartialEq)]
pub struct BarDataset {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub bars: Vec<(String, usize)>,
}

impl BarDataset {
    fn from_top_n(result: &TopNResult, title: &'static str, x_label: &'static str) -> Self {
        Self {
            title,
            x_label,
            y_label: "Occurrences",
            bars: result.iter().map(|e| (e.key.clone(), e.count)).collect(),
        }
    }
}

/// Map output. An empty marker list is reported as [`MapData::NoData`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MapData {
    NoData,
    Markers {
        markers: Vec<Marker>,
        /// `(latitude, longitude)` mean, used to frame the initial view.
        centroid: (f64, f64),
    },
}

impl MapData {
    fn from_markers(markers: Vec<Marker>) -> Self {
        match centroid(&markers) {
            Some(centroid) => MapData::Markers { markers, centroid },
            None => MapData::NoData,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, MapData::NoData)
    }

    pub fn markers(&self) -> &[Marker] {
        match self {
            MapData::NoData => &[],
            MapData::Markers { markers, .. } => markers,
        }
    }
}

/// Markers of one location key, ready to plot as `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSeries {
    pub key: String,
    /// Legend text: the cleaned key, or the key itself when cleaning would
    /// merge it with another top location.
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

impl MapData {
    /// One series per location key in `ranking` order; keys without markers
    /// are skipped.
    pub fn series(&self, ranking: &TopNResult) -> Vec<MapSeries> {
        let labels: Vec<String> = ranking.iter().map(|e| sanitize_label(&e.key)).collect();
        ranking
            .iter()
            .zip(&labels)
            .filter_map(|(entry, label)| {
                let points: Vec<[f64; 2]> = self
                    .markers()
                    .iter()
                    .filter(|m| m.location_key == entry.key)
                    .map(|m| [m.longitude, m.latitude])
                    .collect();
                if points.is_empty() {
                    return None;
                }
                let clash = labels.iter().filter(|l| *l == label).count() > 1;
                Some(MapSeries {
                    key: entry.key.clone(),
                    name: if clash { entry.key.clone() } else { label.clone() },
                    points,
                })
            })
            .collect()
    }
}

/// Everything the presentation layer renders for one parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub params: AnalysisParams,
    /// Records left after the year filter.
    pub records_in_range: usize,
    pub top_locations: TopNResult,
    pub top_ports: TopNResult,
    pub location_chart: BarDataset,
    pub port_chart: BarDataset,
    pub map: MapData,
}

/// Run the whole pipeline over `records`.
pub fn run(records: &[Record], params: &AnalysisParams) -> Analysis {
    let n = clamp_top_n(params.top_n);
    let in_range = filter_by_year(records, params.year_min, params.year_max);

    let top_locations = top_n(in_range.iter().copied(), KeyField::LocationLost, n);
    let top_ports = top_n(in_range.iter().copied(), KeyField::DeparturePort, n);

    let mappable = drop_invalid_coordinates(in_range.iter().copied());
    let in_top = filter_by_membership(mappable, KeyField::LocationLost, &top_locations.key_set());
    let map = MapData::from_markers(to_markers(in_top));

    log::debug!(
        "years {}..={}, top {}: {} in range, {} locations, {} ports, {} markers",
        params.year_min,
        params.year_max,
        n,
        in_range.len(),
        top_locations.len(),
        top_ports.len(),
        map.markers().len()
    );
    if map.is_no_data() {
        log::warn!("No map data for years {}..={}", params.year_min, params.year_max);
    }

    Analysis {
        params: AnalysisParams { top_n: n, ..*params },
        records_in_range: in_range.len(),
        location_chart: BarDataset::from_top_n(
            &top_locations,
            "Top Locations with Highest Occurrences of Shipwrecks",
            "Locations",
        ),
        port_chart: BarDataset::from_top_n(
            &top_ports,
            "Top Departure Ports with Highest Occurrences of Shipwrecks",
            "Departure Ports",
        ),
        top_locations,
        top_ports,
        map,
    }
}
