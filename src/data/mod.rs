/// Data layer: core types, loading, caching, filtering and summaries.
///
/// Architecture:
/// ```text
///   data/open-meteo-subset.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → Dataset (time column → timestamps)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  Arc<Dataset> per path, read once
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │  filter   │   │ summary  │  head / describe
///   └──────────┘   └──────────┘
///   months → rows of one month → time-indexed series
/// ```

pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
