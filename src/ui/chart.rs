use std::ops::RangeInclusive;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot, PlotPoint, Text};

use crate::data::aggregate::DivisionTotals;
use crate::format;

// ---------------------------------------------------------------------------
// Division chart (grouped bars: loss vs recovery)
// ---------------------------------------------------------------------------

const LOSS_COLOR: Color32 = Color32::from_rgb(99, 110, 250);
const RECOVERY_COLOR: Color32 = Color32::from_rgb(239, 85, 59);
const BAR_WIDTH: f64 = 0.35;

/// Render the grouped bar chart: one bar group per division, loss and
/// recovery side by side, every bar labeled with its value.
pub fn division_chart(ui: &mut Ui, chart: &[DivisionTotals]) {
    if chart.is_empty() {
        ui.label("No rows match the current filters.");
        return;
    }

    let mut loss_bars = Vec::with_capacity(chart.len());
    let mut recovery_bars = Vec::with_capacity(chart.len());
    for (i, totals) in chart.iter().enumerate() {
        let x = i as f64;
        loss_bars.push(
            Bar::new(x - BAR_WIDTH / 2.0, totals.loss_total)
                .width(BAR_WIDTH)
                .name(&totals.division),
        );
        recovery_bars.push(
            Bar::new(x + BAR_WIDTH / 2.0, totals.recovered_total)
                .width(BAR_WIDTH)
                .name(&totals.division),
        );
    }

    // Value labels float slightly above the taller bar of each pair.
    let tallest = chart
        .iter()
        .map(|t| t.loss_total.max(t.recovered_total))
        .fold(0.0_f64, f64::max);
    let label_pad = tallest * 0.03;

    let divisions: Vec<String> = chart.iter().map(|t| t.division.clone()).collect();
    let x_formatter = move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() < 0.01 && idx >= 0.0 && (idx as usize) < divisions.len() {
            divisions[idx as usize].clone()
        } else {
            String::new()
        }
    };

    Plot::new("division_chart")
        .legend(Legend::default())
        .height(320.0)
        .x_axis_formatter(x_formatter)
        .y_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            format::axis_amount(mark.value)
        })
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(loss_bars)
                    .color(LOSS_COLOR)
                    .name("Loss / Embezzlement"),
            );
            plot_ui.bar_chart(
                BarChart::new(recovery_bars)
                    .color(RECOVERY_COLOR)
                    .name("Recovered"),
            );

            for (i, totals) in chart.iter().enumerate() {
                let x = i as f64;
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(x - BAR_WIDTH / 2.0, totals.loss_total + label_pad),
                        format::axis_amount(totals.loss_total),
                    )
                    .color(LOSS_COLOR),
                );
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(x + BAR_WIDTH / 2.0, totals.recovered_total + label_pad),
                        format::axis_amount(totals.recovered_total),
                    )
                    .color(RECOVERY_COLOR),
                );
            }
        });
}
