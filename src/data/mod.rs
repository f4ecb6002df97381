/// Data layer: core types, loading, filtering, derived views and export.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable → PopulationDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterCriteria predicates → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  views    │  trend (total bracket by year), snapshot (latest year)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  filtered rows → UTF-8 (BOM) CSV
///   └──────────┘
/// ```

pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod views;

#[cfg(test)]
pub(crate) mod fixtures;
