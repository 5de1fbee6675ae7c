use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::filter::{ChartData, reduce};
use crate::data::model::{LaunchDataset, PayloadRange, SelectionState, SiteSelection};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file is loaded). Never mutated once set.
    pub dataset: Option<Arc<LaunchDataset>>,

    /// Current site / payload selection.
    pub selection: SelectionState,

    /// Reducer output for `selection` (cached).
    pub charts: ChartData,

    /// Colours for scatter series, keyed by booster category.
    pub booster_colors: ColorMap,

    /// Colours for pie slices in the all-sites view, keyed by site.
    pub site_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded dataset, reset the selection and colours.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        for site in dataset.unlisted_sites() {
            log::warn!("Launch site '{site}' is not offered by the site selector");
        }

        self.selection = SelectionState::for_dataset(&dataset);
        self.booster_colors = ColorMap::new(&dataset.booster_categories);
        self.site_colors = ColorMap::new(&dataset.sites);

        self.dataset = Some(Arc::new(dataset));
        self.status_message = None;
        self.refresh();
    }

    /// Recompute chart data for the current selection.
    pub fn refresh(&mut self) {
        self.charts = match &self.dataset {
            Some(ds) => reduce(ds, &self.selection),
            None => ChartData::default(),
        };
        log::debug!(
            "site={} payload=[{}, {}] → {} pie slices, {} scatter points",
            self.selection.site.value(),
            self.selection.payload_range.low(),
            self.selection.payload_range.high(),
            self.charts.breakdown.slices().len(),
            self.charts.scatter.len()
        );
    }

    /// Change the site selection; recompute only on an actual change.
    pub fn set_site(&mut self, site: SiteSelection) {
        if self.selection.site != site {
            self.selection.site = site;
            self.refresh();
        }
    }

    /// Change the payload range; recompute only on an actual change.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if self.selection.payload_range != range {
            self.selection.payload_range = range;
            self.refresh();
        }
    }

    /// Restore the payload range to the dataset's bounds.
    pub fn reset_payload_range(&mut self) {
        if let Some(ds) = &self.dataset {
            let bounds = ds.payload_bounds;
            self.set_payload_range(bounds);
        }
    }
}
