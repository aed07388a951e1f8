/// Data layer: records, loading, filtering, counting and cleanup.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ShipwreckDataset (location keys derived)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year range, category membership → Vec<&Record>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  group-by-count → TopNResult
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ sanitize  │  drop bad coordinates, clean labels → markers
///   └──────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sanitize;
