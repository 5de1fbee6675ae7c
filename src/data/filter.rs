use std::collections::BTreeMap;

use super::model::{LaunchDataset, Outcome, PayloadRange, SelectionState, SiteSelection};

// ---------------------------------------------------------------------------
// Reducer output types
// ---------------------------------------------------------------------------

/// Counts behind the proportion chart.
#[derive(Debug, Clone, PartialEq)]
pub enum Breakdown {
    /// Successes per site (all sites selected).
    BySite(BTreeMap<String, u64>),
    /// Successes and failures at one site.
    ByOutcome(BTreeMap<Outcome, u64>),
}

impl Default for Breakdown {
    fn default() -> Self {
        Breakdown::BySite(BTreeMap::new())
    }
}

impl Breakdown {
    /// `(label, count)` pairs in key order.
    pub fn slices(&self) -> Vec<(String, u64)> {
        match self {
            Breakdown::BySite(map) => map.iter().map(|(s, n)| (s.clone(), *n)).collect(),
            Breakdown::ByOutcome(map) => map.iter().map(|(o, n)| (o.to_string(), *n)).collect(),
        }
    }

    pub fn total(&self) -> u64 {
        match self {
            Breakdown::BySite(map) => map.values().sum(),
            Breakdown::ByOutcome(map) => map.values().sum(),
        }
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Placeholder text for a chart with nothing to draw.
    pub fn empty_message(&self, site: &SiteSelection) -> String {
        match self {
            Breakdown::BySite(map) if !map.is_empty() => "No successful launches".to_string(),
            _ => format!("No launches recorded for {}", site.label()),
        }
    }
}

/// One dot of the scatter chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version_category: String,
}

/// Everything the two charts need for one selection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartData {
    pub breakdown: Breakdown,
    pub scatter: Vec<ScatterPoint>,
}

// ---------------------------------------------------------------------------
// Selection reducer
// ---------------------------------------------------------------------------

/// Success counts for the proportion chart.
///
/// * `All` → successes summed per site; every site in the dataset is a key.
/// * `Site(s)` → records at `s` counted per outcome.
/// * An unknown site yields an empty mapping.
pub fn site_outcome_breakdown(dataset: &LaunchDataset, site: &SiteSelection) -> Breakdown {
    match site {
        SiteSelection::All => {
            let mut per_site: BTreeMap<String, u64> = BTreeMap::new();
            for rec in &dataset.records {
                *per_site.entry(rec.launch_site.clone()).or_default() += rec.outcome.class();
            }
            Breakdown::BySite(per_site)
        }
        SiteSelection::Site(_) => {
            let mut per_outcome: BTreeMap<Outcome, u64> = BTreeMap::new();
            for rec in dataset.records.iter().filter(|r| site.matches(&r.launch_site)) {
                *per_outcome.entry(rec.outcome).or_default() += 1;
            }
            Breakdown::ByOutcome(per_outcome)
        }
    }
}

/// Records inside `payload_range` at the selected site, in dataset order.
pub fn payload_success_scatter(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    payload_range: PayloadRange,
) -> Vec<ScatterPoint> {
    dataset
        .records
        .iter()
        .filter(|r| payload_range.contains(r.payload_mass_kg) && site.matches(&r.launch_site))
        .map(|r| ScatterPoint {
            payload_mass_kg: r.payload_mass_kg,
            outcome: r.outcome,
            booster_version_category: r.booster_version_category.clone(),
        })
        .collect()
}

/// Run both chart computations for one selection.
pub fn reduce(dataset: &LaunchDataset, selection: &SelectionState) -> ChartData {
    ChartData {
        breakdown: site_outcome_breakdown(dataset, &selection.site),
        scatter: payload_success_scatter(dataset, &selection.site, selection.payload_range),
    }
}

// ---------------------------------------------------------------------------
// Chart titles
// ---------------------------------------------------------------------------

pub fn breakdown_title(site: &SiteSelection) -> String {
    match site {
        SiteSelection::All => "Total Success Launches By Sites".to_string(),
        SiteSelection::Site(s) => format!("Total Success Launches By Site {s}"),
    }
}

pub fn scatter_title(site: &SiteSelection) -> String {
    match site {
        SiteSelection::All => "Correlation between Payload and Success for all Sites".to_string(),
        SiteSelection::Site(s) => format!("Correlation between Payload and Success for {s} Site"),
    }
}
