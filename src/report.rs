//! Headless output: plain-text tables for `--report` and the JSON marker export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::analysis::{Analysis, MapData};
use crate::data::aggregate::TopNResult;

/// Write the map output (markers and centroid, or the no-data marker) as JSON.
pub fn write_markers_json(path: &Path, map: &MapData) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, map).context("serializing markers")?;
    out.flush().context("writing markers")?;
    Ok(())
}

/// Print both top-N tables and the map summary.
pub fn write_report<W: Write>(out: &mut W, analysis: &Analysis) -> Result<()> {
    let p = &analysis.params;
    writeln!(
        out,
        "Years {}–{}: {} shipwrecks",
        p.year_min, p.year_max, analysis.records_in_range
    )?;
    writeln!(out)?;

    writeln!(
        out,
        "Top {} Locations with Highest Occurrences of Shipwrecks:",
        p.top_n
    )?;
    write_table(out, "Location", &analysis.top_locations)?;
    writeln!(out)?;

    writeln!(
        out,
        "Top {} Departure Ports with Highest Occurrences of Shipwrecks:",
        p.top_n
    )?;
    write_table(out, "Departure port", &analysis.top_ports)?;
    writeln!(out)?;

    match &analysis.map {
        MapData::NoData => writeln!(out, "No data available for the selected top locations.")?,
        MapData::Markers { markers, centroid } => writeln!(
            out,
            "Map: {} wrecks with coordinates, centred on ({:.4}, {:.4})",
            markers.len(),
            centroid.0,
            centroid.1
        )?,
    }
    Ok(())
}

fn write_table<W: Write>(out: &mut W, heading: &str, result: &TopNResult) -> Result<()> {
    if result.is_empty() {
        writeln!(out, "  (no records)")?;
        return Ok(());
    }
    let rows = result.pairs();
    let width = rows
        .iter()
        .map(|(key, _)| key.chars().count())
        .chain(std::iter::once(heading.len()))
        .max()
        .unwrap_or(0);
    writeln!(out, "  {heading:<width$}  count")?;
    for (key, count) in rows {
        writeln!(out, "  {key:<width$}  {count:>5}")?;
    }
    Ok(())
}
