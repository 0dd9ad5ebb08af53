use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::DivisionSummary;
use crate::data::model::CaseTable;
use crate::format;

// ---------------------------------------------------------------------------
// Recovery-percentage summary table
// ---------------------------------------------------------------------------

pub fn summary_table(ui: &mut Ui, summary: &[DivisionSummary]) {
    if summary.is_empty() {
        ui.label("No divisions to summarize.");
        return;
    }

    ui.push_id("summary_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(160.0))
            .column(Column::auto().at_least(140.0))
            .column(Column::auto().at_least(140.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for title in ["Division", "Loss / Embezzlement", "Recovered", "Recovery %"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, summary.len(), |mut row| {
                    let entry = &summary[row.index()];
                    row.col(|ui| {
                        ui.label(&entry.division);
                    });
                    row.col(|ui| {
                        ui.label(format::thousands(entry.loss_total, 2));
                    });
                    row.col(|ui| {
                        ui.label(format::thousands(entry.recovered_total, 2));
                    });
                    row.col(|ui| {
                        // Blank for the undefined (zero-loss) case.
                        ui.label(format::percent(entry.recovery_pct));
                    });
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Full filtered table
// ---------------------------------------------------------------------------

/// The filtered table as a scrollable grid, every column of the sheet
/// included.
pub fn data_grid(ui: &mut Ui, table: &CaseTable, indices: &[usize]) {
    if table.columns().is_empty() {
        return;
    }

    ui.push_id("data_grid", |ui| {
        egui::ScrollArea::horizontal().show(ui, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .max_scroll_height(360.0)
                .columns(Column::auto().at_least(80.0), table.columns().len())
                .header(20.0, |mut header| {
                    for name in table.columns() {
                        header.col(|ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, indices.len(), |mut row| {
                        let r = indices[row.index()];
                        for col in 0..table.columns().len() {
                            row.col(|ui| {
                                ui.label(table.value(r, col).to_string());
                            });
                        }
                    });
                });
        });
    });
}
