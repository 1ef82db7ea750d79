/// Data layer: core types, loading, filtering, aggregation and export.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table (validated years / ranks)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ Arc<Table>    │  immutable, shared by every page
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐     ┌───────────┐     ┌──────────┐
///   │  filter   │ ──▶ │ aggregate  │     │  export   │  Table → CSV bytes
///   └──────────┘     └───────────┘     └──────────┘
/// ```

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
