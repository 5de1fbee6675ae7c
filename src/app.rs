use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct LaunchDashboardApp {
    pub state: AppState,
}

impl LaunchDashboardApp {
    /// Start with the given dataset already loaded, if any.
    pub fn with_dataset(path: Option<&std::path::Path>) -> Self {
        let mut app = Self::default();
        if let Some(path) = path {
            panels::load_into(&mut app.state, path);
        }
        app
    }
}

impl eframe::App for LaunchDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: site and payload controls ----
        egui::SidePanel::left("selection_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: matching launches ----
        if self.state.dataset.is_some() {
            egui::TopBottomPanel::bottom("launch_table")
                .default_height(180.0)
                .resizable(true)
                .show(ctx, |ui| {
                    table::launch_table(ui, &self.state);
                });
        }

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("SpaceX Launch Records Dashboard");
            });
            plot::charts(ui, &self.state);
        });
    }
}
