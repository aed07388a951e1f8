//! Column names and viewer defaults.
//!
//! The source table used "backup" coordinate columns, so those are the
//! defaults. Every name can be overridden on the command line.

use serde::{Deserialize, Serialize};

/// Smallest selectable top-N.
pub const TOP_N_MIN: usize = 1;
/// Largest selectable top-N.
pub const TOP_N_MAX: usize = 10;
/// Top-N used until the user picks another.
pub const TOP_N_DEFAULT: usize = 3;

/// Half-width (degrees) of the initial map view around the centroid.
pub const MAP_HALF_SPAN_DEGREES: f64 = 30.0;
/// Marker radius in screen points.
pub const MARKER_RADIUS: f32 = 5.0;

/// Header names of the columns the loader requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub year: String,
    pub location_lost: String,
    pub departure_port: String,
    pub latitude: String,
    pub longitude: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            year: "YEAR".to_string(),
            location_lost: "LOCATION LOST".to_string(),
            departure_port: "DEPARTURE PORT".to_string(),
            latitude: "LATITUDE_BACKUP".to_string(),
            longitude: "LONGITUDE_BACKUP".to_string(),
        }
    }
}

impl ColumnConfig {
    /// Required names in loader order: year, location, port, lat, lon.
    pub fn required(&self) -> [&str; 5] {
        [
            &self.year,
            &self.location_lost,
            &self.departure_port,
            &self.latitude,
            &self.longitude,
        ]
    }
}

/// Clamp a requested top-N into the selectable range.
pub fn clamp_top_n(n: usize) -> usize {
    n.clamp(TOP_N_MIN, TOP_N_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: ColumnConfig =
            serde_json::from_str(r#"{ "latitude": "LAT", "longitude": "LON" }"#).unwrap();
        assert_eq!(cfg.latitude, "LAT");
        assert_eq!(cfg.longitude, "LON");
        assert_eq!(cfg.year, "YEAR");
        assert_eq!(cfg.required()[2], "DEPARTURE PORT");
    }

    #[test]
    fn written_config_reads_back() {
        let cfg = ColumnConfig {
            year: "Yr".to_string(),
            ..ColumnConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains(r#""location_lost":"LOCATION LOST""#));
        let back: ColumnConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn top_n_is_clamped() {
        assert_eq!(clamp_top_n(0), 1);
        assert_eq!(clamp_top_n(3), 3);
        assert_eq!(clamp_top_n(42), 10);
    }
}
