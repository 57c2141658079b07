/// Data layer: core types, loading, and export.
///
/// Architecture:
/// ```text
///  .csv / .txt
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse two columns → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Sample>, y-range, residuals against a line
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  (x, subtracted y) → tab-separated text
///   └──────────┘
/// ```

pub mod export;
pub mod loader;
pub mod model;
