use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::outcome_color;
use crate::state::AppState;

/// Launches currently shown in the scatter chart, in dataset order.
pub fn launch_table(ui: &mut Ui, state: &AppState) {
    let points = &state.charts.scatter;
    ui.strong(format!("Matching launches ({})", points.len()));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Payload Mass (kg)");
            });
            header.col(|ui| {
                ui.strong("Outcome");
            });
            header.col(|ui| {
                ui.strong("Booster Version Category");
            });
        })
        .body(|body| {
            body.rows(18.0, points.len(), |mut row| {
                let p = &points[row.index()];
                row.col(|ui| {
                    ui.label(format!("{:.0}", p.payload_mass_kg));
                });
                row.col(|ui| {
                    ui.label(RichText::new(p.outcome.to_string()).color(outcome_color(p.outcome)));
                });
                row.col(|ui| {
                    ui.colored_label(
                        state.booster_colors.color_for(&p.booster_version_category),
                        &p.booster_version_category,
                    );
                });
            });
        });
}
