use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::outcome_color;
use crate::data::filter::{Breakdown, ScatterPoint, breakdown_title, scatter_title};
use crate::state::AppState;

/// Segments used to approximate a full circle.
const PIE_SEGMENTS: usize = 96;

// ---------------------------------------------------------------------------
// Pie geometry
// ---------------------------------------------------------------------------

/// One slice of the pie, angles in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    /// Index of the slice this wedge was built from.
    pub index: usize,
    pub label: String,
    pub share: f64,
    pub start: f64,
    pub end: f64,
}

impl Wedge {
    /// Closed outline on the unit circle: centre, then the arc.
    pub fn outline(&self) -> Vec<[f64; 2]> {
        let sweep = self.end - self.start;
        let steps = ((sweep.abs() / TAU) * PIE_SEGMENTS as f64).ceil().max(1.0) as usize;
        let mut points = Vec::with_capacity(steps + 2);
        points.push([0.0, 0.0]);
        for i in 0..=steps {
            let a = self.start + sweep * i as f64 / steps as f64;
            points.push([a.cos(), a.sin()]);
        }
        points
    }

    /// Where the percentage label goes.
    pub fn label_anchor(&self) -> [f64; 2] {
        let mid = (self.start + self.end) / 2.0;
        [0.65 * mid.cos(), 0.65 * mid.sin()]
    }
}

/// Lay out slices clockwise from twelve o'clock. Zero-count slices are skipped.
pub fn pie_wedges(slices: &[(String, u64)]) -> Vec<Wedge> {
    let total: u64 = slices.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut angle = FRAC_PI_2;
    slices
        .iter()
        .enumerate()
        .filter(|(_, (_, n))| *n > 0)
        .map(|(index, (label, n))| {
            let share = *n as f64 / total as f64;
            let start = angle;
            angle -= share * TAU;
            Wedge {
                index,
                label: label.clone(),
                share,
                start,
                end: angle,
            }
        })
        .collect()
}

/// Colour for each slice of a breakdown, in `slices()` order.
fn slice_colors(breakdown: &Breakdown, state: &AppState) -> Vec<Color32> {
    match breakdown {
        Breakdown::BySite(map) => map.keys().map(|s| state.site_colors.color_for(s)).collect(),
        Breakdown::ByOutcome(map) => map.keys().map(|o| outcome_color(*o)).collect(),
    }
}

// ---------------------------------------------------------------------------
// Scatter grouping
// ---------------------------------------------------------------------------

/// Group points into one series per booster category; x = payload, y = class.
pub fn scatter_series(points: &[ScatterPoint]) -> BTreeMap<String, Vec<[f64; 2]>> {
    let mut series: BTreeMap<String, Vec<[f64; 2]>> = BTreeMap::new();
    for p in points {
        series
            .entry(p.booster_version_category.clone())
            .or_default()
            .push([p.payload_mass_kg, p.outcome.class() as f64]);
    }
    series
}

// ---------------------------------------------------------------------------
// Charts (central panel)
// ---------------------------------------------------------------------------

/// Render both charts stacked in the central panel.
pub fn charts(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a launch dataset to begin  (File → Open…)");
        });
        return;
    }

    let chart_height = (ui.available_height() / 2.0 - 32.0).max(120.0);
    outcome_pie(ui, state, chart_height);
    ui.separator();
    payload_scatter(ui, state, chart_height);
}

/// Proportion chart for the current site selection.
pub fn outcome_pie(ui: &mut Ui, state: &AppState, height: f32) {
    let site = &state.selection.site;
    ui.strong(breakdown_title(site));

    let breakdown = &state.charts.breakdown;
    if breakdown.is_empty() {
        ui.allocate_ui([ui.available_width(), height].into(), |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(breakdown.empty_message(site));
            });
        });
        return;
    }

    let colors = slice_colors(breakdown, state);
    let wedges = pie_wedges(&breakdown.slices());

    Plot::new("success_pie_chart")
        .height(height)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes([false, false])
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.2)
        .include_y(1.2)
        .show(ui, |plot_ui| {
            for wedge in &wedges {
                let color = colors.get(wedge.index).copied().unwrap_or(Color32::GRAY);
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(wedge.outline()))
                        .name(&wedge.label)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );
            }
            for wedge in &wedges {
                let [x, y] = wedge.label_anchor();
                plot_ui.text(
                    Text::new(PlotPoint::new(x, y), format!("{:.1}%", wedge.share * 100.0))
                        .color(Color32::WHITE),
                );
            }
        });
}

/// Payload vs. outcome scatter, one colour per booster category.
pub fn payload_scatter(ui: &mut Ui, state: &AppState, height: f32) {
    ui.strong(scatter_title(&state.selection.site));

    let series = scatter_series(&state.charts.scatter);
    let range = state.selection.payload_range;

    Plot::new("success_payload_scatter_chart")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(range.low())
        .include_x(range.high())
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, points) in series {
                let color = state.booster_colors.color_for(&category);
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(category)
                        .color(color)
                        .radius(4.0)
                        .filled(true),
                );
            }
        });
}
