use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the uploaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value. The uploaded sheet enforces no schema, so
/// every cell is one of text, number, date, or the missing marker that
/// failed coercions collapse into.
/// Using `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Missing,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Missing => 0,
                Number(_) => 1,
                Date(_) => 2,
                Text(_) => 3,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Missing, Missing) => std::cmp::Ordering::Equal,
            (Number(a), Number(b)) => a.total_cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Number(n) => n.to_bits().hash(state),
            CellValue::Date(d) => d.hash(state),
            CellValue::Missing => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(v) => {
                // Whole numbers without a trailing ".0" so grids and the
                // CSV export read like the source sheet.
                if v.fract() == 0.0 && v.abs() < 1e15 {
                    write!(f, "{}", *v as i64)
                } else {
                    write!(f, "{v}")
                }
            }
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Missing => Ok(()),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for summing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// The text a filter compares against. `Missing` has no key, so it can
    /// never match an active filter.
    pub fn filter_key(&self) -> Option<String> {
        match self {
            CellValue::Missing => None,
            other => Some(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// CaseTable – the complete uploaded sheet
// ---------------------------------------------------------------------------

/// An ordered sequence of rows sharing one column set. Column order is the
/// sheet order and survives unchanged into the grid and the CSV export;
/// filtering never mutates the table, it produces row-index views.
#[derive(Debug, Clone)]
pub struct CaseTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl CaseTable {
    /// Build a table from trimmed column names and equally wide rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        CaseTable { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn value(&self, row: usize, col: usize) -> &CellValue {
        &self.rows[row][col]
    }

    /// Case-insensitive lookup of a column by its (already trimmed) name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
    }

    /// First column whose name satisfies the predicate.
    pub fn find_column(&self, pred: impl Fn(&str) -> bool) -> Option<usize> {
        self.columns.iter().position(|c| pred(c))
    }

    /// Rewrite every cell of one column, used by the coercion pass.
    pub fn map_column(&mut self, col: usize, f: impl Fn(&CellValue) -> CellValue) {
        for row in &mut self.rows {
            row[col] = f(&row[col]);
        }
    }

    /// Sorted distinct display values of a column, missing cells skipped.
    /// This is the option list a filter widget offers.
    pub fn unique_filter_values(&self, col: usize) -> BTreeSet<String> {
        self.rows
            .iter()
            .filter_map(|row| row[col].filter_key())
            .collect()
    }
}
