use std::fmt;
use std::path::PathBuf;

/// Trimmed location labels longer than this lose their trailing suffix.
pub const LOCATION_KEY_THRESHOLD: usize = 15;

/// Number of trailing characters dropped from long location labels
/// (a conventional `" - USA"` style suffix).
pub const LOCATION_SUFFIX_LEN: usize = 7;

// ---------------------------------------------------------------------------
// KeyField – which categorical column to group by
// ---------------------------------------------------------------------------

/// A categorical column usable as a grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyField {
    /// The derived short location label ([`Record::location_lost_key`]).
    LocationLost,
    /// The raw departure port text.
    DeparturePort,
}

impl fmt::Display for KeyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyField::LocationLost => write!(f, "location lost"),
            KeyField::DeparturePort => write!(f, "departure port"),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the shipwreck table
// ---------------------------------------------------------------------------

/// A single shipwreck entry. Built once at load time, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub year: Option<i32>,
    pub location_lost_raw: String,
    /// Short grouping label derived from `location_lost_raw`.
    pub location_lost_key: String,
    pub departure_port: String,
    /// Raw coordinate text; coerced on demand by [`Record::coordinates`].
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl Record {
    /// Build a record from raw cell text, deriving the location key.
    pub fn new(
        year: Option<i32>,
        location_lost_raw: impl Into<String>,
        departure_port: impl Into<String>,
        latitude: Option<String>,
        longitude: Option<String>,
    ) -> Self {
        let location_lost_raw = location_lost_raw.into();
        let location_lost_key = location_lost_key(&location_lost_raw);
        Record {
            year,
            location_lost_raw,
            location_lost_key,
            departure_port: departure_port.into(),
            latitude,
            longitude,
        }
    }

    /// The grouping value for `field`, or `None` when the cell was empty.
    pub fn key(&self, field: KeyField) -> Option<&str> {
        let value = match field {
            KeyField::LocationLost => self.location_lost_key.as_str(),
            KeyField::DeparturePort => self.departure_port.as_str(),
        };
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// `(latitude, longitude)` when both coerce to finite numbers.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = parse_coordinate(self.latitude.as_deref()?)?;
        let lon = parse_coordinate(self.longitude.as_deref()?)?;
        Some((lat, lon))
    }
}

/// Derive the short grouping label for a "location lost" value.
///
/// The text is trimmed; if the trimmed text is longer than
/// [`LOCATION_KEY_THRESHOLD`] characters its last [`LOCATION_SUFFIX_LEN`]
/// characters are dropped. Shorter values are returned as given.
pub fn location_lost_key(raw: &str) -> String {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if len > LOCATION_KEY_THRESHOLD {
        trimmed.chars().take(len - LOCATION_SUFFIX_LEN).collect()
    } else {
        raw.to_string()
    }
}

/// Parse a year cell. Integral floats (`"1850.0"`) are accepted.
pub fn parse_year(s: &str) -> Option<i32> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(y) = s.parse::<i32>() {
        return Some(y);
    }
    let f = s.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}

fn parse_coordinate(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// ShipwreckDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded record set plus what the viewer needs to initialise itself.
#[derive(Debug, Clone)]
pub struct ShipwreckDataset {
    pub source: PathBuf,
    pub records: Vec<Record>,
    /// Observed `(min, max)` over parseable years; `None` if there are none.
    pub year_bounds: Option<(i32, i32)>,
}

impl ShipwreckDataset {
    pub fn from_records(source: impl Into<PathBuf>, records: Vec<Record>) -> Self {
        let year_bounds = records
            .iter()
            .filter_map(|r| r.year)
            .fold(None, |acc: Option<(i32, i32)>, y| match acc {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            });
        ShipwreckDataset {
            source: source.into(),
            records,
            year_bounds,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
