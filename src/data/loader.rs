use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::{DataLoadError, Result};
use super::model::{parse_year, Record, ShipwreckDataset};
use crate::config::ColumnConfig;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a shipwreck table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`          – comma-separated with a header row (recommended)
/// * `.tsv` / `.txt` – tab-separated with a header row
/// * `.json`         – `[{ "YEAR": 1850, "LOCATION LOST": "...", ... }, ...]`
/// * `.parquet`      – one column per field, any scalar type
///
/// Only the presence of the required columns is checked here. Bad years and
/// coordinates are kept and dealt with by the filters.
pub fn load_file(path: &Path, columns: &ColumnConfig) -> Result<ShipwreckDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => read_delimited(open(path)?, b',', columns)?,
        "tsv" | "txt" => read_delimited(open(path)?, b'\t', columns)?,
        "json" => load_json(path, columns)?,
        "parquet" | "pq" => load_parquet(path, columns)?,
        other => return Err(DataLoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(ShipwreckDataset::from_records(path, records))
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Turn the five required cells of one row into a [`Record`].
/// Empty cells count as missing.
fn record_from_cells(cells: [Option<String>; 5]) -> Record {
    let [year, location, port, lat, lon] = cells.map(|c| c.filter(|s| !s.trim().is_empty()));
    Record::new(
        year.as_deref().and_then(parse_year),
        location.unwrap_or_default(),
        port.unwrap_or_default(),
        lat,
        lon,
    )
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Read a delimited table with a header row. Short rows are tolerated;
/// their missing cells count as empty.
pub fn read_delimited<R: Read>(
    reader: R,
    delimiter: u8,
    columns: &ColumnConfig,
) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut idx = [0usize; 5];
    for (slot, name) in idx.iter_mut().zip(columns.required()) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataLoadError::MissingColumn(name.to_string()))?;
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        records.push(record_from_cells(
            idx.map(|i| row.get(i).map(str::to_string)),
        ));
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "YEAR": 1850,
///     "LOCATION LOST": "Cape Hatteras, NC - USA",
///     "DEPARTURE PORT": "Boston",
///     "LATITUDE_BACKUP": 35.2,
///     "LONGITUDE_BACKUP": -75.5
///   },
///   ...
/// ]
/// ```
///
/// Required columns are checked against the first object.
fn load_json(path: &Path, columns: &ColumnConfig) -> Result<Vec<Record>> {
    let mut text = String::new();
    open(path)?
        .read_to_string(&mut text)
        .map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    parse_json_records(&text, columns)
}

pub fn parse_json_records(text: &str, columns: &ColumnConfig) -> Result<Vec<Record>> {
    let root: JsonValue = serde_json::from_str(text)?;
    let rows = root
        .as_array()
        .ok_or_else(|| DataLoadError::JsonLayout("expected a top-level array".to_string()))?;

    if let Some(first) = rows.first().and_then(|r| r.as_object()) {
        for name in columns.required() {
            if !first.contains_key(name) {
                return Err(DataLoadError::MissingColumn(name.to_string()));
            }
        }
    }

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or_else(|| DataLoadError::JsonLayout(format!("row {i} is not an object")))?;
        records.push(record_from_cells(
            columns.required().map(|name| obj.get(name).and_then(json_cell_text)),
        ));
    }
    Ok(records)
}

fn json_cell_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). Every cell is read as text, so a
/// `YEAR` column may be integer, float or string.
fn load_parquet(path: &Path, columns: &ColumnConfig) -> Result<Vec<Record>> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;

    let schema = builder.schema().clone();
    let mut idx = [0usize; 5];
    for (slot, name) in idx.iter_mut().zip(columns.required()) {
        *slot = schema
            .index_of(name)
            .map_err(|_| DataLoadError::MissingColumn(name.to_string()))?;
    }

    let reader = builder.build()?;
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            records.push(record_from_cells(
                idx.map(|i| cell_text(batch.column(i), row)),
            ));
        }
    }
    Ok(records)
}

/// Read one Arrow cell as text. Nulls and float NaNs are missing.
fn cell_text(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => Some(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => Some(col.as_primitive::<Int32Type>().value(row).to_string()),
        DataType::Int64 => Some(col.as_primitive::<Int64Type>().value(row).to_string()),
        DataType::Float32 => {
            let v = col.as_primitive::<Float32Type>().value(row);
            (!v.is_nan()).then(|| v.to_string())
        }
        DataType::Float64 => {
            let v = col.as_primitive::<Float64Type>().value(row);
            (!v.is_nan()).then(|| v.to_string())
        }
        // dictionary strings, booleans, decimals, ...
        _ => array_value_to_string(col.as_ref(), row).ok(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    const CSV: &str = "\
YEAR,VESSEL,LOCATION LOST,DEPARTURE PORT,LATITUDE_BACKUP,LONGITUDE_BACKUP
1850,Alpha,Cape Hatteras NC - USA,Boston,35.2,-75.5
1850.0,Beta,Miami,Boston,,
unknown,Gamma,Miami,,north,12
";

    fn write_temp(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn csv_rows_become_records() {
        let records = read_delimited(CSV.as_bytes(), b',', &ColumnConfig::default()).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].year, Some(1850));
        assert_eq!(records[0].location_lost_key, "Cape Hatteras N");
        assert_eq!(records[0].departure_port, "Boston");
        assert_eq!(records[0].coordinates(), Some((35.2, -75.5)));

        assert_eq!(records[1].year, Some(1850));
        assert_eq!(records[1].latitude, None);

        // tolerated at load time, excluded downstream
        assert_eq!(records[2].year, None);
        assert_eq!(records[2].latitude.as_deref(), Some("north"));
        assert_eq!(records[2].departure_port, "");
    }

    #[test]
    fn missing_column_is_fatal() {
        let csv = "YEAR,LOCATION LOST,DEPARTURE PORT,LATITUDE_BACKUP\n1850,a,b,1\n";
        let err = read_delimited(csv.as_bytes(), b',', &ColumnConfig::default()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn(ref c) if c == "LONGITUDE_BACKUP"));
    }

    #[test]
    fn headers_are_trimmed_and_configurable() {
        let csv = " Yr \t Loc \t Port \t Lat \t Lon \n1900\tMiami\tHavana\t25.7\t-80.2\n";
        let columns = ColumnConfig {
            year: "Yr".into(),
            location_lost: "Loc".into(),
            departure_port: "Port".into(),
            latitude: "Lat".into(),
            longitude: "Lon".into(),
        };
        let records = read_delimited(csv.as_bytes(), b'\t', &columns).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].departure_port, "Havana");
    }

    #[test]
    fn short_rows_are_tolerated() {
        let csv = "YEAR,LOCATION LOST,DEPARTURE PORT,LATITUDE_BACKUP,LONGITUDE_BACKUP\n1900,Miami\n";
        let records = read_delimited(csv.as_bytes(), b',', &ColumnConfig::default()).unwrap();
        assert_eq!(records[0].location_lost_key, "Miami");
        assert_eq!(records[0].departure_port, "");
        assert_eq!(records[0].coordinates(), None);
    }

    #[test]
    fn load_file_dispatches_on_extension() {
        let file = write_temp(".csv", CSV.as_bytes());
        let ds = load_file(file.path(), &ColumnConfig::default()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.year_bounds, Some((1850, 1850)));

        let file = write_temp(".xlsx", b"");
        let err = load_file(file.path(), &ColumnConfig::default()).unwrap_err();
        assert!(matches!(err, DataLoadError::UnsupportedFormat(ref e) if e == "xlsx"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_file(Path::new("/no/such/wrecks.csv"), &ColumnConfig::default())
            .unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
    }

    #[test]
    fn json_records_are_loaded() {
        let json = r#"[
            {"YEAR": 1850, "LOCATION LOST": "Miami", "DEPARTURE PORT": "Havana",
             "LATITUDE_BACKUP": 25.7, "LONGITUDE_BACKUP": -80.2},
            {"YEAR": null, "LOCATION LOST": "Miami", "DEPARTURE PORT": null,
             "LATITUDE_BACKUP": null, "LONGITUDE_BACKUP": "-80.2"}
        ]"#;
        let records = parse_json_records(json, &ColumnConfig::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].year, Some(1850));
        assert_eq!(records[0].coordinates(), Some((25.7, -80.2)));
        assert_eq!(records[1].year, None);
        assert_eq!(records[1].departure_port, "");
        assert_eq!(records[1].coordinates(), None);
    }

    #[test]
    fn json_layout_errors() {
        let columns = ColumnConfig::default();
        assert!(matches!(
            parse_json_records(r#"{"YEAR": 1}"#, &columns),
            Err(DataLoadError::JsonLayout(_))
        ));
        assert!(matches!(
            parse_json_records(r#"[{"YEAR": 1}]"#, &columns),
            Err(DataLoadError::MissingColumn(_))
        ));
        assert!(matches!(
            parse_json_records("[1, 2", &columns),
            Err(DataLoadError::Json(_))
        ));
        assert!(parse_json_records("[]", &columns).unwrap().is_empty());
    }

    #[test]
    fn parquet_cells_are_read_as_text() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("YEAR", DataType::Int64, true),
            Field::new("LOCATION LOST", DataType::Utf8, true),
            Field::new("DEPARTURE PORT", DataType::Utf8, true),
            Field::new("LATITUDE_BACKUP", DataType::Float64, true),
            Field::new("LONGITUDE_BACKUP", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![Some(1850), None])),
                Arc::new(StringArray::from(vec![Some("Miami"), Some("Key West")])),
                Arc::new(StringArray::from(vec![Some("Havana"), None])),
                Arc::new(Float64Array::from(vec![Some(25.5), Some(f64::NAN)])),
                Arc::new(Float64Array::from(vec![Some(-80.25), None])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path(), &ColumnConfig::default()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].year, Some(1850));
        assert_eq!(ds.records[0].coordinates(), Some((25.5, -80.25)));
        assert_eq!(ds.records[1].year, None);
        assert_eq!(ds.records[1].latitude, None);
        assert_eq!(ds.records[1].departure_port, "");
    }
}
