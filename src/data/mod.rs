/// Data layer: core types, loading, option lists and series construction.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → ObservationTable
///   └──────────┘
///        │
///        ├────────────────────┐
///        ▼                    ▼
///   ┌──────────┐        ┌──────────┐
///   │ options  │        │  series  │  selection → filter → one series per year
///   └──────────┘        └──────────┘
///   selector lists,
///   default selection
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod options;
pub mod series;
