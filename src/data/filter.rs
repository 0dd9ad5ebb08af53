use std::collections::BTreeSet;

use super::model::CaseTable;
use super::schema::TableSchema;

// ---------------------------------------------------------------------------
// Filter selections: which values are permitted per filter
// ---------------------------------------------------------------------------

/// The three equality-set filters the host offers. An empty set means the
/// filter is inactive and every row passes; selecting values keeps only the
/// rows whose cell is a member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelections {
    pub divisions: BTreeSet<String>,
    pub ddos: BTreeSet<String>,
    pub efiles: BTreeSet<String>,
}

impl FilterSelections {
    pub fn is_empty(&self) -> bool {
        self.divisions.is_empty() && self.ddos.is_empty() && self.efiles.is_empty()
    }

    pub fn clear(&mut self) {
        self.divisions.clear();
        self.ddos.clear();
        self.efiles.clear();
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of rows that pass all active filters.
///
/// The filters are commutative set intersections, so application order does
/// not matter. A filter whose column is unavailable (`None` in the schema)
/// is skipped entirely, even when a selection for it exists. A missing cell
/// never matches an active filter.
pub fn filtered_indices(
    table: &CaseTable,
    schema: &TableSchema,
    selections: &FilterSelections,
) -> Vec<usize> {
    let active: Vec<(usize, &BTreeSet<String>)> = [
        (Some(schema.division), &selections.divisions),
        (schema.ddo, &selections.ddos),
        (schema.efile, &selections.efiles),
    ]
    .into_iter()
    .filter_map(|(col, selected)| match col {
        Some(col) if !selected.is_empty() => Some((col, selected)),
        _ => None,
    })
    .collect();

    (0..table.len())
        .filter(|&row| {
            active.iter().all(|(col, selected)| {
                table
                    .value(row, *col)
                    .filter_key()
                    .is_some_and(|key| selected.contains(&key))
            })
        })
        .collect()
}
