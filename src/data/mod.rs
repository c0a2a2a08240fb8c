/// Data layer: core types, the bundled dataset, loading and cleaning.
///
/// Architecture:
/// ```text
///   data/iris.csv (embedded)
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  DatasetSource::fetch → RawDataset (codes + names)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  relabel codes, schema report, missing counts
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  drop incomplete records → Table
///   └──────────┘
/// ```
pub mod clean;
pub mod loader;
pub mod model;
pub mod source;

use thiserror::Error;

/// Faults raised while obtaining, relabelling, describing or cleaning a table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset not found: {0}")]
    DatasetNotFound(String),

    #[error("malformed dataset: {0}")]
    Malformed(#[from] csv::Error),

    #[error("unexpected header: {0}")]
    UnexpectedHeader(String),

    #[error("no category name for code {code} (row {row})")]
    UnknownCategoryCode { code: i64, row: usize },

    #[error("row {row} has {found} measurements, expected {expected}")]
    RecordWidth {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("rendering table: {0}")]
    Render(#[from] arrow::error::ArrowError),

    #[error("writing report: {0}")]
    Io(#[from] std::io::Error),
}
