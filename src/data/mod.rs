/// Data layer: core types, loading, and column type inference.
///
/// Architecture:
/// ```text
///        .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → headers + raw rows
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ inference  │  first 100 rows → numerical / categorical
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  immutable table + classification
///   └──────────┘
/// ```

pub mod inference;
pub mod loader;
pub mod model;
