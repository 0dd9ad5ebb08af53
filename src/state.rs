use std::collections::BTreeSet;

use crate::data::filter::{filtered_indices, FilterSelections};
use crate::data::model::CaseTable;
use crate::data::schema::TableSchema;
use crate::report::{self, Report, ReportOptions};

// ---------------------------------------------------------------------------
// Filter identity
// ---------------------------------------------------------------------------

/// The three multiselect filters the side panel offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Division,
    Ddo,
    Efile,
}

impl FilterKind {
    pub const ALL: [FilterKind; 3] = [FilterKind::Division, FilterKind::Ddo, FilterKind::Efile];

    pub fn label(self) -> &'static str {
        match self {
            FilterKind::Division => "Division",
            FilterKind::Ddo => "DDO",
            FilterKind::Efile => "E-File No",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until the user opens a workbook).
    pub table: Option<CaseTable>,

    /// Canonical columns of the loaded table.
    pub schema: Option<TableSchema>,

    /// File name of the current upload, shown in the top bar.
    pub source_name: Option<String>,

    /// Current filter selections.
    pub selections: FilterSelections,

    /// Indices of rows passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Render options (excluded rollup labels).
    pub options: ReportOptions,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            table: None,
            schema: None,
            source_name: None,
            selections: FilterSelections::default(),
            visible_indices: Vec::new(),
            options: ReportOptions::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a freshly loaded table: selections reset, everything visible.
    pub fn set_table(&mut self, table: CaseTable, schema: TableSchema, source_name: String) {
        self.selections.clear();
        self.visible_indices = (0..table.len()).collect();
        self.table = Some(table);
        self.schema = Some(schema);
        self.source_name = Some(source_name);
        self.status_message = None;
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let (Some(table), Some(schema)) = (&self.table, &self.schema) {
            self.visible_indices = filtered_indices(table, schema, &self.selections);
        }
    }

    fn filter_column(&self, kind: FilterKind) -> Option<usize> {
        let schema = self.schema.as_ref()?;
        match kind {
            FilterKind::Division => Some(schema.division),
            FilterKind::Ddo => schema.ddo,
            FilterKind::Efile => schema.efile,
        }
    }

    /// The option list for one filter widget, or `None` when the backing
    /// column does not exist (the filter is unavailable, not empty).
    pub fn filter_options(&self, kind: FilterKind) -> Option<BTreeSet<String>> {
        let table = self.table.as_ref()?;
        let col = self.filter_column(kind)?;
        Some(table.unique_filter_values(col))
    }

    pub fn selection(&self, kind: FilterKind) -> &BTreeSet<String> {
        match kind {
            FilterKind::Division => &self.selections.divisions,
            FilterKind::Ddo => &self.selections.ddos,
            FilterKind::Efile => &self.selections.efiles,
        }
    }

    fn selection_mut(&mut self, kind: FilterKind) -> &mut BTreeSet<String> {
        match kind {
            FilterKind::Division => &mut self.selections.divisions,
            FilterKind::Ddo => &mut self.selections.ddos,
            FilterKind::Efile => &mut self.selections.efiles,
        }
    }

    /// Toggle a single value in one filter's selection.
    pub fn toggle_value(&mut self, kind: FilterKind, value: &str) {
        let selected = self.selection_mut(kind);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    /// Deactivate one filter (empty selection = no filter applied).
    pub fn clear_filter(&mut self, kind: FilterKind) {
        self.selection_mut(kind).clear();
        self.refilter();
    }

    /// Run the render pipeline against the current table and selections.
    pub fn render_report(&self) -> Option<Report> {
        let table = self.table.as_ref()?;
        let schema = self.schema.as_ref()?;
        Some(report::render(table, schema, &self.selections, &self.options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;
    use crate::data::schema;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn loaded_state() -> AppState {
        let table = CaseTable::new(
            vec![
                "division name".into(),
                "loss/embezzlement amount".into(),
                "recovered amount".into(),
                "FIR date".into(),
            ],
            vec![
                vec![
                    text("A"),
                    CellValue::Number(1.0),
                    CellValue::Missing,
                    CellValue::Missing,
                ],
                vec![
                    text("B"),
                    CellValue::Number(2.0),
                    CellValue::Missing,
                    CellValue::Missing,
                ],
            ],
        );
        let schema = schema::resolve(&table).unwrap();
        let mut state = AppState::default();
        state.set_table(table, schema, "cases.xlsx".into());
        state
    }

    #[test]
    fn fresh_table_is_fully_visible() {
        let state = loaded_state();
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert!(state.selections.is_empty());
    }

    #[test]
    fn toggling_a_value_refilters_and_toggling_again_restores() {
        let mut state = loaded_state();
        state.toggle_value(FilterKind::Division, "A");
        assert_eq!(state.visible_indices, vec![0]);

        state.toggle_value(FilterKind::Division, "A");
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn clearing_a_filter_deactivates_it() {
        let mut state = loaded_state();
        state.toggle_value(FilterKind::Division, "B");
        state.clear_filter(FilterKind::Division);
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn unavailable_filters_offer_no_options() {
        let state = loaded_state();
        // The sample sheet has no DDO or e-file column.
        assert!(state.filter_options(FilterKind::Ddo).is_none());
        assert!(state.filter_options(FilterKind::Efile).is_none());
        let divisions = state.filter_options(FilterKind::Division).unwrap();
        assert_eq!(divisions.len(), 2);
    }
}
