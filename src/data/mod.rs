/// Data layer: core types, loading, schema resolution, filtering,
/// aggregation, and export.
///
/// Architecture:
/// ```text
///  .xlsx / .xls bytes
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse first sheet → CaseTable (headers trimmed)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  schema   │  resolve canonical columns, coerce amounts & dates
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply selection sets → visible row indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  KPI totals, per-division sums, recovery %
///   └───────────┘
/// ```
pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;

use thiserror::Error;

/// Errors that halt the pipeline. Everything below this level (a cell that
/// fails numeric or date coercion) degrades to [`model::CellValue::Missing`]
/// instead of erroring.
#[derive(Debug, Error)]
pub enum DataError {
    /// The uploaded stream is not a readable spreadsheet.
    #[error("not a readable spreadsheet: {0}")]
    Parse(String),

    /// A column the pipeline depends on does not exist in the sheet.
    #[error("required column '{0}' is missing")]
    MissingColumn(&'static str),
}
