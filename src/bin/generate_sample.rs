use std::io::Write;

use zip::write::{ExtendedFileOptions, FileOptions};
use zip::CompressionMethod;

// ---------------------------------------------------------------------------
// Sample case workbook generator
// ---------------------------------------------------------------------------
//
// Writes `sample_cases.xlsx`: a minimal inline-string xlsx container with a
// handful of divisions, deliberately malformed amount cells, a padded header,
// and a manual "Total" rollup row, so every pipeline edge case can be
// demoed against it.

/// Minimal deterministic PRNG (LCG) so repeated runs produce the same file.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Uniform value in `[low, high)`, rounded to whole rupees.
    fn amount(&mut self, low: u64, high: u64) -> f64 {
        (low + self.next_u64() % (high - low)) as f64
    }
}

enum Cell {
    Str(String),
    Num(f64),
}

fn s(text: impl Into<String>) -> Cell {
    Cell::Str(text.into())
}

fn n(value: f64) -> Cell {
    Cell::Num(value)
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn column_letter(idx: usize) -> char {
    (b'A' + idx as u8) as char
}

fn sheet_xml(rows: &[Vec<Cell>]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData>
"#,
    );
    for (r, row) in rows.iter().enumerate() {
        xml.push_str(&format!("<row r=\"{}\">", r + 1));
        for (c, cell) in row.iter().enumerate() {
            let reference = format!("{}{}", column_letter(c), r + 1);
            match cell {
                Cell::Str(text) => xml.push_str(&format!(
                    "<c r=\"{reference}\" t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>",
                    escape_xml(text)
                )),
                Cell::Num(value) => {
                    xml.push_str(&format!("<c r=\"{reference}\"><v>{value}</v></c>"))
                }
            }
        }
        xml.push_str("</row>\n");
    }
    xml.push_str("</sheetData>\n</worksheet>");
    xml
}

fn build_rows() -> Vec<Vec<Cell>> {
    let mut rng = SimpleRng::new(42);

    let divisions = [
        ("Bhopal", "DDO Bhopal HQ"),
        ("Indore", "DDO Indore City"),
        ("Jabalpur", "DDO Jabalpur East"),
        ("Gwalior", "DDO Gwalior Fort"),
    ];
    let fir_days = ["04-01-2021", "17-03-2021", "2021-06-09", "28/10/2021", "05-02-2022"];

    let mut rows = vec![vec![
        s("Sr No"),
        // Padded on purpose: header trimming must absorb it.
        s(" division name "),
        s("Name of DDO"),
        s("e-file no"),
        s("loss/embezzlement amount"),
        s("recovered amount"),
        s("FIR date"),
        s("Remarks"),
    ]];

    let mut sr = 0;
    let mut total_loss = 0.0;
    let mut total_recovered = 0.0;

    for (d, (division, ddo)) in divisions.iter().enumerate() {
        for i in 0..5 {
            sr += 1;
            let loss = if *division == "Gwalior" {
                // Zero-loss division: its recovery percentage is undefined.
                0.0
            } else {
                rng.amount(50_000, 2_000_000)
            };
            let recovered = if loss == 0.0 {
                0.0
            } else {
                rng.amount(0, loss as u64 + 1)
            };
            total_loss += loss;
            total_recovered += recovered;

            let loss_cell = if sr == 7 {
                // One unparseable amount per kind, to demo Missing handling.
                s("not recorded")
            } else {
                n(loss)
            };
            let recovered_cell = if sr == 12 { s("pending") } else { n(recovered) };

            rows.push(vec![
                n(sr as f64),
                s(*division),
                s(*ddo),
                s(format!("EF/2021/{:03}", d * 5 + i + 1)),
                loss_cell,
                recovered_cell,
                s(fir_days[i]),
                s(if i == 0 { "chargesheet filed" } else { "" }),
            ]);
        }
    }

    // Manual rollup row, the kind the summary table must skip.
    rows.push(vec![
        s(""),
        s("Total"),
        s(""),
        s(""),
        n(total_loss),
        n(total_recovered),
        s(""),
        s(""),
    ]);

    rows
}

fn main() {
    let rows = build_rows();
    let sheet = sheet_xml(&rows);

    let parts: [(&str, &str); 5] = [
        (
            "[Content_Types].xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#,
        ),
        (
            "_rels/.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
        ),
        (
            "xl/workbook.xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="Cases" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#,
        ),
        (
            "xl/_rels/workbook.xml.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#,
        ),
        ("xl/worksheets/sheet1.xml", &sheet),
    ];

    let output_path = "sample_cases.xlsx";
    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    let mut zip = zip::ZipWriter::new(file);
    let options =
        FileOptions::<ExtendedFileOptions>::default().compression_method(CompressionMethod::Deflated);

    for (name, content) in parts {
        zip.start_file(name, options.clone())
            .expect("Failed to start zip entry");
        zip.write_all(content.as_bytes())
            .expect("Failed to write zip entry");
    }
    zip.finish().expect("Failed to close workbook");

    println!(
        "Wrote {} case rows (plus a Total rollup) to {output_path}",
        rows.len() - 2
    );
}
