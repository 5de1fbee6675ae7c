/// Data layer: core types, loading, and the selection reducer.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset  │  Vec<LaunchRecord>, site / booster index
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  SelectionState → pie counts + scatter points
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
