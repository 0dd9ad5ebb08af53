use std::path::Path;

use anyhow::{Context, Result};

use super::model::CaseTable;
use crate::report::Report;

// ---------------------------------------------------------------------------
// CSV export of the filtered table
// ---------------------------------------------------------------------------

/// Render the visible rows as UTF-8 CSV: header row with the current column
/// names (extra columns included), one record per visible row, no index
/// column. Missing cells become empty fields.
pub fn csv_bytes(table: &CaseTable, indices: &[usize]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(table.columns())
        .context("writing csv header")?;

    for &row in indices {
        writer
            .write_record(table.rows()[row].iter().map(|cell| cell.to_string()))
            .with_context(|| format!("writing csv row {row}"))?;
    }

    writer.into_inner().context("flushing csv export")
}

pub fn write_csv(path: &Path, table: &CaseTable, indices: &[usize]) -> Result<()> {
    let bytes = csv_bytes(table, indices)?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

// ---------------------------------------------------------------------------
// Report JSON: the render output in machine-readable form
// ---------------------------------------------------------------------------

pub fn report_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("serializing report")
}

pub fn write_report_json(path: &Path, report: &Report) -> Result<()> {
    let json = report_json(report)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn table() -> CaseTable {
        CaseTable::new(
            vec![
                "division name".into(),
                "loss/embezzlement amount".into(),
                "remark".into(),
            ],
            vec![
                vec![text("A"), CellValue::Number(1000.0), text("first, case")],
                vec![text("B"), CellValue::Missing, CellValue::Missing],
                vec![text("A"), CellValue::Number(500.5), text("ok")],
            ],
        )
    }

    #[test]
    fn round_trip_preserves_headers_and_row_count() {
        let table = table();
        let indices = vec![0, 1, 2];
        let bytes = csv_bytes(&table, &indices).unwrap();

        let mut reader = csv::Reader::from_reader(&bytes[..]);
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(headers, table.columns());

        let rows: Vec<csv::StringRecord> =
            reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), indices.len());
        // Quoted comma survives, missing cells are empty fields.
        assert_eq!(rows[0].get(2), Some("first, case"));
        assert_eq!(rows[1].get(1), Some(""));
    }

    #[test]
    fn export_covers_only_visible_rows() {
        let table = table();
        let bytes = csv_bytes(&table, &[2]).unwrap();
        let mut reader = csv::Reader::from_reader(&bytes[..]);
        let rows: Vec<csv::StringRecord> =
            reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(1), Some("500.5"));
    }

    #[test]
    fn no_index_column_is_emitted() {
        let table = table();
        let bytes = csv_bytes(&table, &[0]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("division name,"));
    }
}
