use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::CaseTable;
use crate::data::schema::{self, TableSchema};
use crate::data::{export, loader};
use crate::report;
use crate::state::{AppState, FilterKind};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui
                .add_enabled(state.table.is_some(), egui::Button::new("Export CSV…"))
                .clicked()
            {
                save_csv_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(
                    state.table.is_some(),
                    egui::Button::new("Export report JSON…"),
                )
                .clicked()
            {
                save_report_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            let name = state.source_name.as_deref().unwrap_or("workbook");
            ui.label(format!(
                "{name}: {} cases loaded, {} visible",
                table.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: one collapsible multiselect per available
/// filter. An empty selection means the filter is off, so a single "Clear"
/// button replaces select-all.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.table.is_none() {
        ui.label("No workbook loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for kind in FilterKind::ALL {
                // A filter with no backing column is simply not offered.
                let Some(values) = state.filter_options(kind) else {
                    continue;
                };

                let n_selected = state.selection(kind).len();
                let n_total = values.len();
                let header_text = format!("{}  ({n_selected}/{n_total})", kind.label());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(kind.label())
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        if ui.small_button("Clear").clicked() {
                            state.clear_filter(kind);
                        }

                        for value in &values {
                            let mut checked = state.selection(kind).contains(value);
                            if ui.checkbox(&mut checked, value).changed() {
                                state.toggle_value(kind, value);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open case workbook")
        .add_filter("Excel workbook", &["xlsx", "xls"])
        .pick_file();

    if let Some(path) = file {
        match load_workbook(&path) {
            Ok((table, schema)) => {
                log::info!(
                    "Loaded {} cases with columns {:?}",
                    table.len(),
                    table.columns()
                );
                let name = path
                    .file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or("workbook")
                    .to_string();
                state.set_table(table, schema, name);
            }
            Err(e) => {
                log::error!("Failed to load workbook: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn load_workbook(path: &Path) -> anyhow::Result<(CaseTable, TableSchema)> {
    let mut table = loader::load_workbook_path(path)?;
    let schema = schema::prepare(&mut table)?;
    Ok((table, schema))
}

fn save_csv_dialog(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export filtered data")
        .set_file_name(report::EXPORT_FILE_NAME)
        .save_file()
    else {
        return;
    };

    let result = match &state.table {
        Some(table) => export::write_csv(&path, table, &state.visible_indices),
        None => return,
    };

    match result {
        Ok(()) => {
            log::info!("Exported {} rows to {}", state.visible_indices.len(), path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("CSV export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn save_report_dialog(state: &mut AppState) {
    let Some(report) = state.render_report() else {
        return;
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export report")
        .set_file_name("sfic_dashboard_report.json")
        .save_file()
    else {
        return;
    };

    match export::write_report_json(&path, &report) {
        Ok(()) => {
            log::info!("Exported report to {}", path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Report export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
