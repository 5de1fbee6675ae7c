use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Site enumeration
// ---------------------------------------------------------------------------

/// Sentinel value of the site selector meaning "every site".
pub const ALL_SITES: &str = "ALL";

/// Launch sites offered by the site selector.
/// Kept in sync with the dataset by hand; not derived from the data.
pub const LAUNCH_SITES: [&str; 4] = ["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"];

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// The 0/1 value stored in the `class` column.
    pub fn class(self) -> u64 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }
}

impl TryFrom<i64> for Outcome {
    type Error = RecordError;

    fn try_from(class: i64) -> Result<Self, Self::Error> {
        match class {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(RecordError::InvalidOutcome(other)),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Failure => write!(f, "Failure"),
            Outcome::Success => write!(f, "Success"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// Reasons a parsed row cannot become a [`LaunchRecord`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("class must be 0 or 1, got {0}")]
    InvalidOutcome(i64),
    #[error("payload mass must be a non-negative number, got {0}")]
    InvalidPayload(f64),
    #[error("missing value for '{0}'")]
    MissingField(&'static str),
}

/// A single launch attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    /// Only used to colour the scatter chart.
    pub booster_version_category: String,
}

impl LaunchRecord {
    /// Validate raw column values and build a record.
    pub fn new(
        launch_site: impl Into<String>,
        payload_mass_kg: f64,
        class: i64,
        booster_version_category: impl Into<String>,
    ) -> Result<Self, RecordError> {
        let launch_site = launch_site.into();
        if launch_site.is_empty() {
            return Err(RecordError::MissingField("Launch Site"));
        }
        if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
            return Err(RecordError::InvalidPayload(payload_mass_kg));
        }
        Ok(LaunchRecord {
            launch_site,
            payload_mass_kg,
            outcome: Outcome::try_from(class)?,
            booster_version_category: booster_version_category.into(),
        })
    }
}

// ---------------------------------------------------------------------------
// Selection state
// ---------------------------------------------------------------------------

/// Current value of the site selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Interpret a selector value; [`ALL_SITES`] maps to `All`.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// The raw selector value.
    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(s) => s,
        }
    }

    /// Label shown in the site selector.
    pub fn label(&self) -> &str {
        match self {
            SiteSelection::All => "All Sites",
            SiteSelection::Site(s) => s,
        }
    }

    /// Whether a record at `launch_site` belongs to this selection.
    pub fn matches(&self, launch_site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => s == launch_site,
        }
    }

    /// Every choice the site selector offers, "All Sites" first.
    pub fn options() -> Vec<SiteSelection> {
        std::iter::once(SiteSelection::All)
            .chain(LAUNCH_SITES.iter().map(|s| SiteSelection::Site(s.to_string())))
            .collect()
    }
}

/// Closed payload interval in kilograms. Always `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    /// Build a range, swapping the bounds if given out of order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            PayloadRange { low: a, high: b }
        } else {
            PayloadRange { low: b, high: a }
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Inclusive on both ends.
    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }
}

impl Default for PayloadRange {
    fn default() -> Self {
        PayloadRange { low: 0.0, high: 0.0 }
    }
}

/// Both UI inputs together; the only input to the reducer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionState {
    pub site: SiteSelection,
    pub payload_range: PayloadRange,
}

impl SelectionState {
    /// All sites, full payload range of the dataset.
    pub fn for_dataset(dataset: &LaunchDataset) -> Self {
        SelectionState {
            site: SiteSelection::All,
            payload_range: dataset.payload_bounds,
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All launch records in source order, with indices computed once at load.
#[derive(Debug, Clone, Default)]
pub struct LaunchDataset {
    pub records: Vec<LaunchRecord>,
    /// Distinct `launch_site` values.
    pub sites: BTreeSet<String>,
    /// Distinct `booster_version_category` values.
    pub booster_categories: BTreeSet<String>,
    /// Min and max payload observed at load time.
    pub payload_bounds: PayloadRange,
}

impl LaunchDataset {
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let sites = records.iter().map(|r| r.launch_site.clone()).collect();
        let booster_categories = records
            .iter()
            .map(|r| r.booster_version_category.clone())
            .collect();

        let payload_bounds = records
            .iter()
            .map(|r| r.payload_mass_kg)
            .fold(None, |acc: Option<(f64, f64)>, p| match acc {
                None => Some((p, p)),
                Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
            })
            .map(|(lo, hi)| PayloadRange::new(lo, hi))
            .unwrap_or_default();

        LaunchDataset {
            records,
            sites,
            booster_categories,
            payload_bounds,
        }
    }

    /// Dataset sites that the site selector does not offer.
    pub fn unlisted_sites(&self) -> Vec<&str> {
        self.sites
            .iter()
            .map(String::as_str)
            .filter(|s| !LAUNCH_SITES.contains(s))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(site: &str, payload: f64, class: i64) -> LaunchRecord {
        LaunchRecord::new(site, payload, class, "FT").unwrap()
    }

    #[test]
    fn test_outcome_from_class() {
        assert_eq!(Outcome::try_from(0i64), Ok(Outcome::Failure));
        assert_eq!(Outcome::try_from(1i64), Ok(Outcome::Success));
        assert_eq!(Outcome::try_from(2i64), Err(RecordError::InvalidOutcome(2)));
        assert_eq!(Outcome::Success.class(), 1);
    }

    #[test]
    fn test_record_rejects_bad_payload() {
        let err = LaunchRecord::new("KSC LC-39A", -1.0, 1, "B5").unwrap_err();
        assert_eq!(err, RecordError::InvalidPayload(-1.0));
        assert!(LaunchRecord::new("KSC LC-39A", f64::NAN, 1, "B5").is_err());
        assert_eq!(
            LaunchRecord::new("", 10.0, 1, "B5").unwrap_err(),
            RecordError::MissingField("Launch Site")
        );
    }

    #[test]
    fn test_site_selection_from_value() {
        assert_eq!(SiteSelection::from_value("ALL"), SiteSelection::All);
        let ksc = SiteSelection::from_value("KSC LC-39A");
        assert_eq!(ksc, SiteSelection::Site("KSC LC-39A".into()));
        assert_eq!(ksc.value(), "KSC LC-39A");
        assert!(ksc.matches("KSC LC-39A"));
        assert!(!ksc.matches("VAFB SLC-4E"));
        assert!(SiteSelection::All.matches("anything"));
    }

    #[test]
    fn test_site_options_cover_enumeration() {
        let options = SiteSelection::options();
        assert_eq!(options.len(), LAUNCH_SITES.len() + 1);
        assert_eq!(options[0], SiteSelection::All);
        assert_eq!(options[0].label(), "All Sites");
        assert_eq!(options[4].value(), "VAFB SLC-4E");
    }

    #[test]
    fn test_payload_range_orders_bounds() {
        let range = PayloadRange::new(5000.0, 1000.0);
        assert_eq!(range.low(), 1000.0);
        assert_eq!(range.high(), 5000.0);
        assert!(range.contains(1000.0));
        assert!(range.contains(5000.0));
        assert!(!range.contains(5000.1));
    }

    #[test]
    fn test_dataset_indices() {
        let ds = LaunchDataset::from_records(vec![
            record("A", 500.0, 1),
            record("B", 5000.0, 0),
            record("A", 0.0, 1),
        ]);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites.len(), 2);
        assert_eq!(ds.payload_bounds, PayloadRange::new(0.0, 5000.0));
        assert_eq!(ds.unlisted_sites(), vec!["A", "B"]);

        let selection = SelectionState::for_dataset(&ds);
        assert_eq!(selection.site, SiteSelection::All);
        assert_eq!(selection.payload_range, ds.payload_bounds);
    }

    #[test]
    fn test_empty_dataset_bounds() {
        let ds = LaunchDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.payload_bounds, PayloadRange::new(0.0, 0.0));
    }
}
