/// Data layer: core types, ingestion, and classification.
///
/// Architecture:
/// ```text
///   data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  .csv check → parse → drop invalid rows → IngestReport
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ GeneRecord │  gene / condition / expression
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ category  │  expression → low / medium / high (table, chart, badge)
///   └──────────┘
/// ```

pub mod category;
pub mod error;
pub mod loader;
pub mod model;
