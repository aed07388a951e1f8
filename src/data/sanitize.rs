use serde::Serialize;

use super::model::Record;

/// A single map point: cleaned label plus coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Display text; two keys may clean up to the same label.
    pub label: String,
    /// Derived location key the marker belongs to (series and colour key).
    pub location_key: String,
    /// Untouched "location lost" text, for tooltips and export.
    pub location_lost: String,
    pub year: Option<i32>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Whether both coordinates are present and finite numbers.
pub fn coordinates_valid(record: &Record) -> bool {
    record.coordinates().is_some()
}

/// Keep map-eligible records, in input order.
pub fn drop_invalid_coordinates<'a, I>(records: I) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter(|r| coordinates_valid(r))
        .collect()
}

/// Remove every character that is not an ASCII letter, digit or space.
pub fn sanitize_label(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

/// One marker per map-eligible record, labelled with the cleaned location key.
pub fn to_markers<'a, I>(records: I) -> Vec<Marker>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter_map(|r| {
            let (latitude, longitude) = r.coordinates()?;
            Some(Marker {
                label: sanitize_label(&r.location_lost_key),
                location_key: r.location_lost_key.clone(),
                location_lost: r.location_lost_raw.clone(),
                year: r.year,
                latitude,
                longitude,
            })
        })
        .collect()
}

/// Mean `(latitude, longitude)` of the markers, `None` when there are none.
pub fn centroid(markers: &[Marker]) -> Option<(f64, f64)> {
    if markers.is_empty() {
        return None;
    }
    let n = markers.len() as f64;
    let (lat, lon) = markers
        .iter()
        .fold((0.0, 0.0), |(lat, lon), m| (lat + m.latitude, lon + m.longitude));
    Some((lat / n, lon / n))
}
