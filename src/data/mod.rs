/// Data layer: core types, loading, caching and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, coerce numeric fields → ProductDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  one ProductDataset per source path, loaded once
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  country selection → FilteredView (borrowed rows)
///   └──────────┘
/// ```

pub mod cache;
pub mod coerce;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
