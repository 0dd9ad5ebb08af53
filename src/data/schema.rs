use chrono::NaiveDate;

use super::model::{CaseTable, CellValue};
use super::DataError;

// ---------------------------------------------------------------------------
// Canonical columns
// ---------------------------------------------------------------------------

/// Grouping key for every aggregation pass.
pub const DIVISION_COLUMN: &str = "division name";
/// Summed into the loss KPI and the per-division loss total.
pub const LOSS_COLUMN: &str = "loss/embezzlement amount";
/// Summed into the recovery KPI and the per-division recovery total.
pub const RECOVERED_COLUMN: &str = "recovered amount";
/// Temporal attribute; coerced to a date, no logic beyond that.
pub const FIR_DATE_COLUMN: &str = "FIR date";
/// Optional filter key.
pub const EFILE_COLUMN: &str = "e-file no";
/// The DDO column has no fixed name; the first column whose name contains
/// this marker (case-insensitively) is used.
pub const DDO_HINT: &str = "DDO";

/// Canonical column indices, resolved once right after ingestion so no later
/// stage scans column names again.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub division: usize,
    pub loss: usize,
    pub recovered: usize,
    pub fir_date: usize,
    /// `None` → the e-file filter is unavailable, not an error.
    pub efile: Option<usize>,
    /// `None` → the DDO filter is unavailable, not an error.
    pub ddo: Option<usize>,
}

/// Resolve the canonical columns. Named columns match case-insensitively on
/// the trimmed header; the DDO column is a substring scan, first match wins.
pub fn resolve(table: &CaseTable) -> Result<TableSchema, DataError> {
    let required = |name: &'static str| {
        table
            .column_index(name)
            .ok_or(DataError::MissingColumn(name))
    };

    Ok(TableSchema {
        division: required(DIVISION_COLUMN)?,
        loss: required(LOSS_COLUMN)?,
        recovered: required(RECOVERED_COLUMN)?,
        fir_date: required(FIR_DATE_COLUMN)?,
        efile: table.column_index(EFILE_COLUMN),
        ddo: table.find_column(|c| c.to_ascii_uppercase().contains(DDO_HINT)),
    })
}

/// Resolve the schema, then coerce the amount and date columns in place.
/// This is the one call sites use after [`super::loader`].
pub fn prepare(table: &mut CaseTable) -> Result<TableSchema, DataError> {
    let schema = resolve(table)?;
    coerce(table, &schema);
    Ok(schema)
}

// ---------------------------------------------------------------------------
// Coercion – best effort, cell failures become Missing, never errors
// ---------------------------------------------------------------------------

/// Coerce the two amount columns to numbers and the FIR date column to
/// dates. A cell that cannot be converted becomes [`CellValue::Missing`] so
/// one malformed cell never poisons the aggregation.
pub fn coerce(table: &mut CaseTable, schema: &TableSchema) {
    table.map_column(schema.loss, coerce_numeric);
    table.map_column(schema.recovered, coerce_numeric);
    table.map_column(schema.fir_date, coerce_date);
}

fn coerce_numeric(cell: &CellValue) -> CellValue {
    match cell {
        CellValue::Number(v) => CellValue::Number(*v),
        CellValue::Text(s) => parse_amount(s)
            .map(CellValue::Number)
            .unwrap_or(CellValue::Missing),
        _ => CellValue::Missing,
    }
}

/// Locale-tolerant amount parsing: surrounding whitespace, thousands
/// separators, and a leading currency marker are ignored.
fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .trim_start_matches('₹')
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%Y/%m/%d", "%d.%m.%Y"];

fn coerce_date(cell: &CellValue) -> CellValue {
    match cell {
        CellValue::Date(d) => CellValue::Date(*d),
        CellValue::Text(s) => parse_date(s)
            .map(CellValue::Date)
            .unwrap_or(CellValue::Missing),
        _ => CellValue::Missing,
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    // Datetime strings: only the day part matters here.
    let day = trimmed
        .split(|c| c == ' ' || c == 'T')
        .next()
        .unwrap_or(trimmed);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(day, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn sample_table() -> CaseTable {
        CaseTable::new(
            vec![
                "division name".into(),
                "Name of DDO".into(),
                "e-file no".into(),
                "loss/embezzlement amount".into(),
                "recovered amount".into(),
                "FIR date".into(),
            ],
            vec![
                vec![
                    text("A"),
                    text("DDO-1"),
                    text("EF/1"),
                    text("1,000"),
                    CellValue::Number(400.0),
                    text("2021-04-01"),
                ],
                vec![
                    text("A"),
                    text("DDO-2"),
                    text("EF/2"),
                    text("₹ 500.50"),
                    text("bad"),
                    text("01/04/2021"),
                ],
            ],
        )
    }

    #[test]
    fn resolves_all_canonical_columns() {
        let schema = resolve(&sample_table()).unwrap();
        assert_eq!(schema.division, 0);
        assert_eq!(schema.ddo, Some(1));
        assert_eq!(schema.efile, Some(2));
        assert_eq!(schema.loss, 3);
        assert_eq!(schema.recovered, 4);
        assert_eq!(schema.fir_date, 5);
    }

    #[test]
    fn missing_required_column_names_the_column() {
        let table = CaseTable::new(vec!["division name".into()], vec![]);
        match resolve(&table) {
            Err(DataError::MissingColumn(name)) => {
                assert_eq!(name, LOSS_COLUMN);
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn ddo_and_efile_are_optional() {
        let table = CaseTable::new(
            vec![
                "division name".into(),
                "loss/embezzlement amount".into(),
                "recovered amount".into(),
                "FIR date".into(),
            ],
            vec![],
        );
        let schema = resolve(&table).unwrap();
        assert_eq!(schema.ddo, None);
        assert_eq!(schema.efile, None);
    }

    #[test]
    fn ddo_substring_match_takes_first_hit() {
        let table = CaseTable::new(
            vec![
                "division name".into(),
                "loss/embezzlement amount".into(),
                "recovered amount".into(),
                "FIR date".into(),
                "ddo office".into(),
                "Old DDO".into(),
            ],
            vec![],
        );
        assert_eq!(resolve(&table).unwrap().ddo, Some(4));
    }

    #[test]
    fn coercion_handles_separators_currency_and_junk() {
        let mut table = sample_table();
        let schema = prepare(&mut table).unwrap();

        assert_eq!(table.value(0, schema.loss), &CellValue::Number(1000.0));
        assert_eq!(table.value(1, schema.loss), &CellValue::Number(500.5));
        assert_eq!(table.value(0, schema.recovered), &CellValue::Number(400.0));
        assert_eq!(table.value(1, schema.recovered), &CellValue::Missing);
    }

    #[test]
    fn coercion_parses_common_date_formats() {
        let mut table = sample_table();
        let schema = prepare(&mut table).unwrap();
        let expected = chrono::NaiveDate::from_ymd_opt(2021, 4, 1).unwrap();

        assert_eq!(table.value(0, schema.fir_date), &CellValue::Date(expected));
        assert_eq!(table.value(1, schema.fir_date), &CellValue::Date(expected));
    }

    #[test]
    fn stray_number_in_date_column_becomes_missing() {
        let mut table = sample_table();
        let schema = resolve(&table).unwrap();
        table.map_column(schema.fir_date, |_| CellValue::Number(44287.0));
        coerce(&mut table, &schema);
        assert_eq!(table.value(0, schema.fir_date), &CellValue::Missing);
    }
}
