use eframe::egui;

use crate::format;
use crate::report::Report;
use crate::state::AppState;
use crate::ui::{chart, panels, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct DashboardApp {
    pub state: AppState,
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the report, rebuilt from scratch each frame ----
        egui::CentralPanel::default().show(ctx, |ui| {
            match self.state.render_report() {
                Some(report) => report_page(ui, &self.state, &report),
                None => {
                    ui.centered_and_justified(|ui| {
                        ui.heading("Open a case workbook to build the report  (File → Open…)");
                    });
                }
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Report page (central panel)
// ---------------------------------------------------------------------------

fn report_page(ui: &mut egui::Ui, state: &AppState, report: &Report) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.heading(report.title);
            ui.label(report.operator);
            ui.label(format!("🕒 {}", report.generated_at));
            ui.separator();

            ui.strong("Key Figures");
            ui.columns(3, |cols| {
                kpi_cell(&mut cols[0], "Total Cases", &report.kpis.case_count.to_string());
                kpi_cell(&mut cols[1], "Total Loss", &format::currency(report.kpis.loss_total));
                kpi_cell(
                    &mut cols[2],
                    "Total Recovered",
                    &format::currency(report.kpis.recovered_total),
                );
            });
            ui.separator();

            ui.strong("Division Wise Loss vs Recovery");
            chart::division_chart(ui, &report.chart);
            ui.separator();

            ui.strong("Recovery Percentage by Division");
            tables::summary_table(ui, &report.summary);
            ui.separator();

            ui.strong("Full Data");
            if let Some(table) = &state.table {
                tables::data_grid(ui, table, &report.visible_rows);
            }
        });
}

fn kpi_cell(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.label(label);
    ui.heading(value);
}
