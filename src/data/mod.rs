/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → JobDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ JobDataset  │  Vec<JobRecord>, distinct titles / categories
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterCriteria → subset of records
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  skill shares, salary by experience
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
