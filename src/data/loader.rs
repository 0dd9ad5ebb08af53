use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};

use super::model::{CaseTable, CellValue};
use super::DataError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Parse an uploaded spreadsheet (`.xlsx` / `.xls`) into a [`CaseTable`].
///
/// Only the first sheet is read; its first row is the header. Header names
/// are trimmed here, before any column lookup runs. Cell types map directly,
/// unreadable cells become [`CellValue::Missing`].
pub fn load_workbook_bytes(bytes: &[u8]) -> Result<CaseTable, DataError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| DataError::Parse(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DataError::Parse("workbook has no sheets".into()))?
        .map_err(|e| DataError::Parse(e.to_string()))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| DataError::Parse("first sheet has no header row".into()))?;

    let columns: Vec<String> = header
        .iter()
        .map(|cell| cell_to_text(cell).trim().to_string())
        .collect();

    let data: Vec<Vec<CellValue>> = rows
        .map(|row| {
            // Ranges are rectangular, but stay width-safe anyway.
            (0..columns.len())
                .map(|i| row.get(i).map(cell_value).unwrap_or(CellValue::Missing))
                .collect()
        })
        .collect();

    Ok(CaseTable::new(columns, data))
}

/// Convenience wrapper: read a workbook from disk.
pub fn load_workbook_path(path: &Path) -> Result<CaseTable> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("reading workbook {}", path.display()))?;
    load_workbook_bytes(&bytes).map_err(Into::into)
}

// ---------------------------------------------------------------------------
// Cell mapping
// ---------------------------------------------------------------------------

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) => CellValue::Text(s.to_string()),
        Data::Float(v) => CellValue::Number(*v),
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|ndt| CellValue::Date(ndt.date()))
            .unwrap_or(CellValue::Missing),
        Data::DateTimeIso(s) => s
            .get(..10)
            .and_then(|day| chrono::NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
            .map(CellValue::Date)
            .unwrap_or(CellValue::Missing),
        Data::DurationIso(s) => CellValue::Text(s.to_string()),
        Data::Error(_) | Data::Empty => CellValue::Missing,
    }
}

/// Header rendering: headers are text even when a sheet stores them as
/// numbers.
fn cell_to_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.to_string(),
        Data::Empty => String::new(),
        other => cell_value(other).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::{ExtendedFileOptions, FileOptions};
    use zip::CompressionMethod;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

    const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

    const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="Cases" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#;

    const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

    /// Two data rows under deliberately untrimmed headers; B3 is numeric,
    /// B2 is junk text that coercion later maps to Missing.
    const SHEET: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData>
<row r="1">
<c r="A1" t="inlineStr"><is><t xml:space="preserve"> division name </t></is></c>
<c r="B1" t="inlineStr"><is><t>loss/embezzlement amount</t></is></c>
</row>
<row r="2">
<c r="A2" t="inlineStr"><is><t>Bhopal</t></is></c>
<c r="B2" t="inlineStr"><is><t>n/a</t></is></c>
</row>
<row r="3">
<c r="A3" t="inlineStr"><is><t>Indore</t></is></c>
<c r="B3"><v>1500</v></c>
</row>
</sheetData>
</worksheet>"#;

    fn workbook_bytes() -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            let options = FileOptions::<ExtendedFileOptions>::default()
                .compression_method(CompressionMethod::Stored);
            for (name, content) in [
                ("[Content_Types].xml", CONTENT_TYPES),
                ("_rels/.rels", ROOT_RELS),
                ("xl/workbook.xml", WORKBOOK),
                ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
                ("xl/worksheets/sheet1.xml", SHEET),
            ] {
                zip.start_file(name, options.clone()).unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            }
            zip.finish().unwrap();
        }
        buf
    }

    #[test]
    fn loads_first_sheet_and_trims_headers() {
        let table = load_workbook_bytes(&workbook_bytes()).unwrap();
        assert_eq!(
            table.columns(),
            ["division name", "loss/embezzlement amount"]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.value(0, 0),
            &CellValue::Text("Bhopal".to_string())
        );
        assert_eq!(table.value(0, 1), &CellValue::Text("n/a".to_string()));
        assert_eq!(table.value(1, 1), &CellValue::Number(1500.0));
    }

    #[test]
    fn garbage_bytes_are_a_parse_error() {
        let err = load_workbook_bytes(b"this is not a workbook").unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
    }

    #[test]
    fn empty_zip_is_a_parse_error() {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            let options = FileOptions::<ExtendedFileOptions>::default()
                .compression_method(CompressionMethod::Stored);
            zip.start_file("unrelated.txt", options).unwrap();
            zip.write_all(b"hello").unwrap();
            zip.finish().unwrap();
        }
        assert!(load_workbook_bytes(&buf).is_err());
    }
}
