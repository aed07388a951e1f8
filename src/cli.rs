//! Command-line arguments.
//!
//! Without `--report` the viewer window opens, optionally preloaded with
//! `FILE`. With `--report` the analysis is printed instead.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::analysis::AnalysisParams;
use crate::config::{ColumnConfig, TOP_N_MAX, TOP_N_MIN};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "shipwreck-explorer",
    version,
    about = "Explore shipwreck records: top wreck locations, departure ports and a wreck map"
)]
pub struct Args {
    /// Shipwreck table to open (.csv, .tsv, .json, .parquet)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Print the summary to stdout instead of opening a window (needs FILE)
    #[arg(long)]
    pub report: bool,

    /// First year to include (default: earliest year in the data)
    #[arg(long, value_name = "YEAR", allow_negative_numbers = true)]
    pub year_min: Option<i32>,

    /// Last year to include (default: latest year in the data)
    #[arg(long, value_name = "YEAR", allow_negative_numbers = true)]
    pub year_max: Option<i32>,

    /// Number of top locations and ports to show
    #[arg(
        long,
        value_name = "N",
        value_parser = clap::value_parser!(u16).range(TOP_N_MIN as i64..=TOP_N_MAX as i64)
    )]
    pub top_n: Option<u16>,

    /// With --report: also write the map markers as JSON
    #[arg(long, value_name = "PATH", requires = "report")]
    pub export_markers: Option<PathBuf>,

    /// JSON file with column names, e.g. {"latitude": "LAT"}
    #[arg(long, value_name = "FILE")]
    pub columns: Option<PathBuf>,

    #[arg(long, value_name = "NAME")]
    pub year_column: Option<String>,

    #[arg(long, value_name = "NAME")]
    pub location_column: Option<String>,

    #[arg(long, value_name = "NAME")]
    pub port_column: Option<String>,

    #[arg(long, value_name = "NAME")]
    pub lat_column: Option<String>,

    #[arg(long, value_name = "NAME")]
    pub lon_column: Option<String>,
}

impl Args {
    /// Column names: defaults, then the `--columns` file, then single flags.
    pub fn column_config(&self) -> Result<ColumnConfig> {
        let mut columns = match &self.columns {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing column names in {}", path.display()))?
            }
            None => ColumnConfig::default(),
        };

        let overrides = [
            (&self.year_column, &mut columns.year),
            (&self.location_column, &mut columns.location_lost),
            (&self.port_column, &mut columns.departure_port),
            (&self.lat_column, &mut columns.latitude),
            (&self.lon_column, &mut columns.longitude),
        ];
        for (flag, slot) in overrides {
            if let Some(name) = flag {
                *slot = name.clone();
            }
        }
        Ok(columns)
    }

    /// Apply `--year-min`, `--year-max` and `--top-n` on top of `params`.
    pub fn apply_overrides(&self, params: AnalysisParams) -> AnalysisParams {
        AnalysisParams {
            year_min: self.year_min.unwrap_or(params.year_min),
            year_max: self.year_max.unwrap_or(params.year_max),
            top_n: self.top_n.map(usize::from).unwrap_or(params.top_n),
        }
    }
}
