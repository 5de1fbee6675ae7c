use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::{PayloadRange, SiteSelection};
use crate::state::AppState;

/// Payload slider bounds and step, in kg.
pub const PAYLOAD_SLIDER_MIN: f64 = 0.0;
pub const PAYLOAD_SLIDER_MAX: f64 = 10_000.0;
pub const PAYLOAD_SLIDER_STEP: f64 = 1_000.0;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Selection");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    // ---- Site selector ----
    ui.strong("Launch site");
    let current = state.selection.site.clone();
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in SiteSelection::options() {
                if ui
                    .selectable_label(current == option, option.label())
                    .clicked()
                {
                    state.set_site(option);
                }
            }
        });
    ui.add_space(8.0);
    ui.separator();

    // ---- Payload range selector ----
    ui.strong("Payload range (Kg):");
    let slider_max = PAYLOAD_SLIDER_MAX.max(dataset.payload_bounds.high());
    let range = state.selection.payload_range;
    let (mut low, mut high) = (range.low(), range.high());

    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, PAYLOAD_SLIDER_MIN..=slider_max)
                .step_by(PAYLOAD_SLIDER_STEP)
                .text("min"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, PAYLOAD_SLIDER_MIN..=slider_max)
                .step_by(PAYLOAD_SLIDER_STEP)
                .text("max"),
        )
        .changed();

    if low_changed || high_changed {
        // The handle being dragged pushes the other one along.
        if low_changed && low > high {
            high = low;
        } else if high_changed && high < low {
            low = high;
        }
        state.set_payload_range(PayloadRange::new(low, high));
    }

    if ui.small_button("Reset range").clicked() {
        state.reset_payload_range();
    }
    ui.add_space(8.0);
    ui.separator();

    // ---- Booster colour key ----
    ui.strong("Booster Version Category");
    for (label, color) in state.booster_colors.legend_entries() {
        ui.colored_label(color, label);
    }
}

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
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            if ds.is_empty() {
                ui.label("Dataset contains no launches");
            } else {
                ui.label(format!(
                    "{} launches loaded, {} in range",
                    ds.len(),
                    state.charts.scatter.len()
                ));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        load_into(state, &path);
    }
}

/// Load `path` and install it, or report the failure in the status line.
pub fn load_into(state: &mut AppState, path: &std::path::Path) {
    match crate::data::loader::load_file(path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} launches from {} with sites {:?}",
                dataset.len(),
                path.display(),
                dataset.sites
            );
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
