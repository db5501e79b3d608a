use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{DashError, DashResult};

/// Wire token selecting every launch site.
pub const ALL_SITES: &str = "ALL";

/// Binary launch outcome. Serializes as the integer `0` / `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum OutcomeClass {
    Failure,
    Success,
}

impl OutcomeClass {
    pub const ALL: [OutcomeClass; 2] = [OutcomeClass::Failure, OutcomeClass::Success];

    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Failure => 0,
            Self::Success => 1,
        }
    }
}

impl From<OutcomeClass> for u8 {
    fn from(value: OutcomeClass) -> Self {
        value.as_u8()
    }
}

impl TryFrom<u8> for OutcomeClass {
    type Error = DashError;

    fn try_from(value: u8) -> DashResult<Self> {
        match value {
            0 => Ok(Self::Failure),
            1 => Ok(Self::Success),
            other => Err(DashError::InvalidData(format!(
                "outcome class must be 0 or 1, got {other}"
            ))),
        }
    }
}

impl fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// One row of launch data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    pub launch_site: String,
    pub payload_mass_kg: Option<f64>,
    pub outcome: OutcomeClass,
    #[serde(default)]
    pub flight_number: Option<u32>,
    #[serde(default)]
    pub booster_version_category: Option<String>,
}

impl LaunchRecord {
    #[must_use]
    pub fn new(
        launch_site: impl Into<String>,
        payload_mass_kg: Option<f64>,
        outcome: OutcomeClass,
    ) -> Self {
        Self {
            launch_site: launch_site.into(),
            payload_mass_kg,
            outcome,
            flight_number: None,
            booster_version_category: None,
        }
    }

    #[must_use]
    pub fn with_flight_number(mut self, flight_number: u32) -> Self {
        self.flight_number = Some(flight_number);
        self
    }

    #[must_use]
    pub fn with_booster_version_category(mut self, category: impl Into<String>) -> Self {
        self.booster_version_category = Some(category.into());
        self
    }
}

/// Site control value: every site, or one site identifier.
///
/// Equality, hashing and filtering go through the wire token, so a
/// `Site` holding `ALL` is the same selection as `All`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Parses a control value; the `ALL` token selects every site.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == ALL_SITES {
            Self::All
        } else {
            Self::Site(value.to_owned())
        }
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        self.as_str() == ALL_SITES
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_SITES,
            Self::Site(site) => site,
        }
    }

    #[must_use]
    pub fn matches(&self, launch_site: &str) -> bool {
        self.is_all() || self.as_str() == launch_site
    }
}

impl PartialEq for SiteSelection {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for SiteSelection {}

impl Hash for SiteSelection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl From<String> for SiteSelection {
    fn from(value: String) -> Self {
        if value == ALL_SITES {
            Self::All
        } else {
            Self::Site(value)
        }
    }
}

impl From<SiteSelection> for String {
    fn from(value: SiteSelection) -> Self {
        match value {
            SiteSelection::All => ALL_SITES.to_owned(),
            SiteSelection::Site(site) => site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload extent over every non-null payload in a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayloadBounds {
    pub min: f64,
    pub max: f64,
}

impl PayloadBounds {
    #[must_use]
    pub fn full_range(self) -> PayloadRange {
        PayloadRange {
            lo: self.min,
            hi: self.max,
        }
    }
}

/// Inclusive payload filter window in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayloadRange {
    pub lo: f64,
    pub hi: f64,
}

impl PayloadRange {
    /// Builds a range from raw slider values.
    ///
    /// Reversed bounds are swapped; non-finite bounds are rejected.
    pub fn new(lo: f64, hi: f64) -> DashResult<Self> {
        if !lo.is_finite() || !hi.is_finite() {
            return Err(DashError::InvalidSelection(format!(
                "payload range bounds must be finite, got [{lo}, {hi}]"
            )));
        }
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        Ok(Self { lo, hi })
    }

    #[must_use]
    pub fn contains(self, payload_mass_kg: f64) -> bool {
        payload_mass_kg >= self.lo && payload_mass_kg <= self.hi
    }

    #[must_use]
    pub fn is_normalized(self) -> bool {
        self.lo.is_finite() && self.hi.is_finite() && self.lo <= self.hi
    }
}

/// Current values of the site and payload-range controls for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected_site: SiteSelection,
    pub payload_range: PayloadRange,
}

impl SelectionState {
    #[must_use]
    pub fn new(selected_site: SiteSelection, payload_range: PayloadRange) -> Self {
        Self {
            selected_site,
            payload_range,
        }
    }

    /// First-render state: every site over the full payload domain.
    #[must_use]
    pub fn initial(bounds: PayloadBounds) -> Self {
        Self::new(SiteSelection::All, bounds.full_range())
    }
}
