use std::collections::BTreeMap;

use serde::Serialize;

use super::model::CaseTable;
use super::schema::TableSchema;

// ---------------------------------------------------------------------------
// KPI totals: one group = all visible rows
// ---------------------------------------------------------------------------

/// Headline figures over the filtered view. Sums skip missing cells, so a
/// malformed amount contributes zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub case_count: usize,
    pub loss_total: f64,
    pub recovered_total: f64,
}

pub fn kpis(table: &CaseTable, schema: &TableSchema, indices: &[usize]) -> Kpis {
    Kpis {
        case_count: indices.len(),
        loss_total: column_sum(table, schema.loss, indices),
        recovered_total: column_sum(table, schema.recovered, indices),
    }
}

// ---------------------------------------------------------------------------
// Per-division aggregation
// ---------------------------------------------------------------------------

/// Per-division sums, the chart input. Rollup rows are kept here; the chart
/// shows whatever the sheet calls a division.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivisionTotals {
    pub division: String,
    pub loss_total: f64,
    pub recovered_total: f64,
}

/// Summary table rows: totals minus the excluded rollup labels, plus the
/// recovery percentage. `recovery_pct` is `None` when the loss total is
/// zero; the percentage is undefined there and renders blank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivisionSummary {
    pub division: String,
    pub loss_total: f64,
    pub recovered_total: f64,
    pub recovery_pct: Option<f64>,
}

/// Group the visible rows by division and sum both amount columns. Rows
/// whose division cell is missing belong to no group and are skipped.
/// Groups come out in lexical order.
pub fn division_totals(
    table: &CaseTable,
    schema: &TableSchema,
    indices: &[usize],
) -> Vec<DivisionTotals> {
    let mut groups: BTreeMap<String, (f64, f64)> = BTreeMap::new();

    for &row in indices {
        let Some(division) = table.value(row, schema.division).filter_key() else {
            continue;
        };
        let entry = groups.entry(division).or_insert((0.0, 0.0));
        if let Some(loss) = table.value(row, schema.loss).as_f64() {
            entry.0 += loss;
        }
        if let Some(recovered) = table.value(row, schema.recovered).as_f64() {
            entry.1 += recovered;
        }
    }

    groups
        .into_iter()
        .map(|(division, (loss_total, recovered_total))| DivisionTotals {
            division,
            loss_total,
            recovered_total,
        })
        .collect()
}

pub fn division_summary(
    table: &CaseTable,
    schema: &TableSchema,
    indices: &[usize],
    excluded: &[String],
) -> Vec<DivisionSummary> {
    division_totals(table, schema, indices)
        .into_iter()
        .filter(|totals| !excluded.iter().any(|label| label == &totals.division))
        .map(|totals| {
            let recovery_pct = if totals.loss_total == 0.0 {
                None
            } else {
                Some(100.0 * totals.recovered_total / totals.loss_total)
            };
            DivisionSummary {
                division: totals.division,
                loss_total: totals.loss_total,
                recovered_total: totals.recovered_total,
                recovery_pct,
            }
        })
        .collect()
}

fn column_sum(table: &CaseTable, col: usize, indices: &[usize]) -> f64 {
    indices
        .iter()
        .filter_map(|&row| table.value(row, col).as_f64())
        .sum()
}
