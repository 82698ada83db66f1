/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  first existing file → PaperTable (cached per request)
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ PaperTable  │  Vec<PaperRecord>, column capabilities
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year range + journal → FilteredView (row indices)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  summary, per-year counts, top journals, top title words
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
pub mod tokenize;
