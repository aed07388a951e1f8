//! Writes `sample_shipwrecks.csv` and `sample_shipwrecks.parquet`: synthetic
//! wrecks clustered around a handful of sites, with the same column layout
//! (and the same kinds of gaps) as the real shipwreck table.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;

const WRECKS: usize = 600;

/// (location lost, latitude, longitude, relative weight)
const SITES: &[(&str, f64, f64, u64)] = &[
    ("Cape Hatteras, NC - USA", 35.25, -75.53, 9),
    ("Lake Michigan, MI - USA", 43.50, -87.00, 7),
    ("Lake Superior, MI - USA", 47.40, -87.50, 6),
    ("Nantucket Shoals, MA - USA", 41.00, -69.75, 5),
    ("Florida Keys, FL - USA", 24.66, -81.50, 5),
    ("Columbia River Bar, OR - USA", 46.25, -124.05, 4),
    ("Lake Erie, OH - USA", 41.80, -81.90, 4),
    ("Miami", 25.76, -80.19, 3),
    ("Sable Island", 43.95, -59.91, 3),
    ("Key West", 24.55, -81.78, 2),
    ("Galveston Bay, TX - USA", 29.50, -94.90, 2),
    ("Cape Horn", -55.98, -67.27, 1),
];

const PORTS: &[(&str, u64)] = &[
    ("Boston", 8),
    ("New York", 8),
    ("Chicago", 5),
    ("Liverpool", 4),
    ("Havana", 3),
    ("New Orleans", 3),
    ("Portland", 2),
    ("San Francisco", 2),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Index into `weights`, chosen proportionally.
    fn weighted(&mut self, weights: impl Iterator<Item = u64> + Clone) -> usize {
        let total: u64 = weights.clone().sum();
        let mut pick = self.next_u64() % total;
        for (i, w) in weights.enumerate() {
            if pick < w {
                return i;
            }
            pick -= w;
        }
        0
    }
}

/// One generated row; `None` cells are written empty / null.
struct Wreck {
    year: Option<i64>,
    location: &'static str,
    port: Option<&'static str>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

fn generate(rng: &mut SimpleRng) -> Vec<Wreck> {
    (0..WRECKS)
        .map(|_| {
            let site = SITES[rng.weighted(SITES.iter().map(|s| s.3))];
            let port = PORTS[rng.weighted(PORTS.iter().map(|p| p.1))].0;

            // skewed towards the 19th century
            let year = (rng.gauss(1880.0, 35.0).round() as i64).clamp(1750, 2010);
            let has_coords = rng.next_f64() > 0.12;

            Wreck {
                year: (rng.next_f64() > 0.03).then_some(year),
                location: site.0,
                port: (rng.next_f64() > 0.05).then_some(port),
                latitude: has_coords.then(|| rng.gauss(site.1, 0.4)),
                longitude: has_coords.then(|| rng.gauss(site.2, 0.4)),
            }
        })
        .collect()
}

fn write_csv(path: &str, wrecks: &[Wreck]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        "YEAR",
        "VESSEL",
        "LOCATION LOST",
        "DEPARTURE PORT",
        "LATITUDE_BACKUP",
        "LONGITUDE_BACKUP",
    ])?;
    for (i, w) in wrecks.iter().enumerate() {
        let cell = |v: Option<f64>| v.map(|v| format!("{v:.4}")).unwrap_or_default();
        writer.write_record([
            w.year.map(|y| y.to_string()).unwrap_or_default(),
            format!("Vessel {i:04}"),
            w.location.to_string(),
            w.port.unwrap_or_default().to_string(),
            cell(w.latitude),
            cell(w.longitude),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn to_batch(wrecks: &[Wreck]) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("YEAR", DataType::Int64, true),
        Field::new("LOCATION LOST", DataType::Utf8, false),
        Field::new("DEPARTURE PORT", DataType::Utf8, true),
        Field::new("LATITUDE_BACKUP", DataType::Float64, true),
        Field::new("LONGITUDE_BACKUP", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from_iter(wrecks.iter().map(|w| w.year))),
            Arc::new(StringArray::from_iter_values(wrecks.iter().map(|w| w.location))),
            Arc::new(StringArray::from_iter(wrecks.iter().map(|w| w.port))),
            Arc::new(Float64Array::from_iter(wrecks.iter().map(|w| w.latitude))),
            Arc::new(Float64Array::from_iter(wrecks.iter().map(|w| w.longitude))),
        ],
    )?;
    Ok(batch)
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let wrecks = generate(&mut rng);

    let csv_path = "sample_shipwrecks.csv";
    write_csv(csv_path, &wrecks)?;

    let batch = to_batch(&wrecks)?;
    let parquet_path = "sample_shipwrecks.parquet";
    let file = std::fs::File::create(parquet_path)
        .with_context(|| format!("creating {parquet_path}"))?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;

    println!("{}", pretty_format_batches(&[batch.slice(0, 5)])?);
    println!(
        "Wrote {} wrecks at {} sites to {csv_path} and {parquet_path}",
        wrecks.len(),
        SITES.len()
    );
    Ok(())
}
