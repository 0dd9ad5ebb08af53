use chrono::{DateTime, Local};
use serde::Serialize;

use crate::data::aggregate::{self, DivisionSummary, DivisionTotals, Kpis};
use crate::data::filter::{filtered_indices, FilterSelections};
use crate::data::model::CaseTable;
use crate::data::schema::TableSchema;

// ---------------------------------------------------------------------------
// Fixed page content
// ---------------------------------------------------------------------------

pub const REPORT_TITLE: &str = "Departmental Enquiry & FIR Report Dashboard";
pub const REPORT_OPERATOR: &str = "By SM Mahendra Yadav";
/// File name offered for the CSV download.
pub const EXPORT_FILE_NAME: &str = "sfic_dashboard_data.csv";
/// Day-month-year, 24-hour clock.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";

// ---------------------------------------------------------------------------
// Render options & output
// ---------------------------------------------------------------------------

/// Caller-tunable rendering knobs. `excluded_groups` lists division-name
/// values treated as pre-existing rollup rows in the source sheet; they are
/// dropped from the summary table so they cannot double count.
#[derive(Debug, Clone, Serialize)]
pub struct ReportOptions {
    pub excluded_groups: Vec<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            excluded_groups: vec!["Total".to_string()],
        }
    }
}

/// Everything the host needs to draw one page: KPI figures, chart data,
/// summary rows, and the visible row indices for the grid and the export.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: &'static str,
    pub operator: &'static str,
    /// Freshly formatted on every render, never cached.
    pub generated_at: String,
    pub kpis: Kpis,
    pub chart: Vec<DivisionTotals>,
    pub summary: Vec<DivisionSummary>,
    pub visible_rows: Vec<usize>,
}

/// The full pipeline as one pure function of table and selections. The host
/// calls this on every interaction; there is no hidden state between calls.
pub fn render(
    table: &CaseTable,
    schema: &TableSchema,
    selections: &FilterSelections,
    options: &ReportOptions,
) -> Report {
    render_at(table, schema, selections, options, Local::now())
}

/// Clock-injected variant so tests can pin the timestamp.
pub fn render_at(
    table: &CaseTable,
    schema: &TableSchema,
    selections: &FilterSelections,
    options: &ReportOptions,
    now: DateTime<Local>,
) -> Report {
    let visible_rows = filtered_indices(table, schema, selections);

    Report {
        title: REPORT_TITLE,
        operator: REPORT_OPERATOR,
        generated_at: now.format(TIMESTAMP_FORMAT).to_string(),
        kpis: aggregate::kpis(table, schema, &visible_rows),
        chart: aggregate::division_totals(table, schema, &visible_rows),
        summary: aggregate::division_summary(
            table,
            schema,
            &visible_rows,
            &options.excluded_groups,
        ),
        visible_rows,
    }
}
