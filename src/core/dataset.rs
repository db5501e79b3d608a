use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use indexmap::IndexSet;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{LaunchRecord, OutcomeClass, PayloadBounds};
use crate::error::{DashResult, DataLoadError};

/// Location of the launch records CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` and `https://` values are URLs; anything else is a local path.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_owned())
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }
}

impl From<String> for DataSource {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<DataSource> for String {
    fn from(value: DataSource) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Header names for each column read from the source.
///
/// Defaults match the published launch records dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub launch_site: String,
    pub payload_mass_kg: String,
    pub outcome: String,
    pub flight_number: String,
    pub booster_version_category: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            launch_site: "Launch Site".to_owned(),
            payload_mass_kg: "Payload Mass (kg)".to_owned(),
            outcome: "class".to_owned(),
            flight_number: "Flight Number".to_owned(),
            booster_version_category: "Booster Version Category".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    pub columns: ColumnMapping,
    pub fetch_timeout: Duration,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            columns: ColumnMapping::default(),
            fetch_timeout: Duration::from_secs(30),
        }
    }
}

/// Immutable in-memory table of launch records.
///
/// Built once, then only read. Share it across sessions behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<LaunchRecord>,
    bounds: PayloadBounds,
    sites: IndexSet<String>,
}

impl Dataset {
    pub fn load(source: &DataSource) -> DashResult<Self> {
        Self::load_with(source, &LoadOptions::default())
    }

    pub fn load_with(source: &DataSource, options: &LoadOptions) -> DashResult<Self> {
        let dataset = match source {
            DataSource::Path(path) => {
                let file = File::open(path).map_err(|err| DataLoadError::Unreachable {
                    source_name: path.display().to_string(),
                    reason: err.to_string(),
                })?;
                Self::from_csv_reader(file, &options.columns)?
            }
            DataSource::Url(url) => {
                let body = fetch_remote(url, options.fetch_timeout)?;
                Self::from_csv_reader(body.as_bytes(), &options.columns)?
            }
        };
        info!(
            source = %source,
            records = dataset.len(),
            sites = dataset.sites.len(),
            min_payload = dataset.bounds.min,
            max_payload = dataset.bounds.max,
            "loaded launch dataset"
        );
        Ok(dataset)
    }

    /// Parses CSV text with a header row.
    pub fn from_csv_reader<R: Read>(reader: R, columns: &ColumnMapping) -> DashResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = reader.headers().map_err(DataLoadError::from)?.clone();
        let find = |name: &str| headers.iter().position(|header| header == name.trim());
        let required = |name: &str| {
            find(name).ok_or_else(|| DataLoadError::MissingColumn(name.to_owned()))
        };

        let site_idx = required(&columns.launch_site)?;
        let payload_idx = required(&columns.payload_mass_kg)?;
        let outcome_idx = required(&columns.outcome)?;
        let flight_idx = find(&columns.flight_number);
        let booster_idx = find(&columns.booster_version_category);
        debug!(
            has_flight_number = flight_idx.is_some(),
            has_booster_category = booster_idx.is_some(),
            "resolved dataset columns"
        );

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row_number = index + 1;
            let row = row.map_err(DataLoadError::from)?;
            let cell = |idx: usize| row.get(idx).unwrap_or("");

            let launch_site = cell(site_idx);
            if launch_site.is_empty() {
                return Err(malformed(row_number, "launch site is empty").into());
            }
            let payload_mass_kg = parse_payload(cell(payload_idx), row_number)?;
            let outcome = parse_outcome(cell(outcome_idx), row_number)?;

            let mut record = LaunchRecord::new(launch_site, payload_mass_kg, outcome);
            record.flight_number = flight_idx.and_then(|idx| cell(idx).parse::<u32>().ok());
            record.booster_version_category = booster_idx
                .map(cell)
                .filter(|value| !value.is_empty())
                .map(str::to_owned);
            records.push(record);
        }

        Self::from_records(records)
    }

    /// Builds a dataset from already-parsed records.
    pub fn from_records(records: Vec<LaunchRecord>) -> DashResult<Self> {
        for (index, record) in records.iter().enumerate() {
            if let Some(mass) = record.payload_mass_kg {
                if !mass.is_finite() || mass < 0.0 {
                    return Err(malformed(
                        index + 1,
                        &format!("payload mass must be finite and >= 0, got {mass}"),
                    )
                    .into());
                }
            }
        }

        let payloads = records
            .iter()
            .filter_map(|record| record.payload_mass_kg)
            .map(OrderedFloat);
        let (Some(min), Some(max)) = (payloads.clone().min(), payloads.max()) else {
            return Err(DataLoadError::EmptyPayloadDomain.into());
        };

        let sites = records
            .iter()
            .map(|record| record.launch_site.clone())
            .collect::<IndexSet<_>>();

        Ok(Self {
            records,
            bounds: PayloadBounds {
                min: min.into_inner(),
                max: max.into_inner(),
            },
            sites,
        })
    }

    #[must_use]
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    #[must_use]
    pub fn payload_bounds(&self) -> PayloadBounds {
        self.bounds
    }

    /// Distinct launch sites in first-appearance order.
    pub fn sites(&self) -> impl Iterator<Item = &str> {
        self.sites.iter().map(String::as_str)
    }

    #[must_use]
    pub fn has_site(&self, site: &str) -> bool {
        self.sites.contains(site)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn malformed(row: usize, reason: &str) -> DataLoadError {
    DataLoadError::MalformedRow {
        row,
        reason: reason.to_owned(),
    }
}

fn parse_payload(raw: &str, row: usize) -> Result<Option<f64>, DataLoadError> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    let mass = raw
        .parse::<f64>()
        .map_err(|e| malformed(row, &format!("invalid payload mass `{raw}`: {e}")))?;
    if !mass.is_finite() || mass < 0.0 {
        return Err(malformed(
            row,
            &format!("payload mass must be finite and >= 0, got `{raw}`"),
        ));
    }
    Ok(Some(mass))
}

fn parse_outcome(raw: &str, row: usize) -> Result<OutcomeClass, DataLoadError> {
    let value = raw
        .parse::<f64>()
        .map_err(|_| malformed(row, &format!("invalid outcome class `{raw}`")))?;
    if value == 0.0 {
        Ok(OutcomeClass::Failure)
    } else if value == 1.0 {
        Ok(OutcomeClass::Success)
    } else {
        Err(malformed(
            row,
            &format!("outcome class must be 0 or 1, got `{raw}`"),
        ))
    }
}

#[cfg(feature = "remote")]
fn fetch_remote(url: &str, timeout: Duration) -> Result<String, DataLoadError> {
    let unreachable = |reason: String| DataLoadError::Unreachable {
        source_name: url.to_owned(),
        reason,
    };
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| unreachable(format!("http client error: {e}")))?;
    debug!(url, "fetching launch dataset");
    client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(|e| unreachable(format!("request error: {e}")))?
        .text()
        .map_err(|e| unreachable(format!("body decode error: {e}")))
}

#[cfg(not(feature = "remote"))]
fn fetch_remote(url: &str, _timeout: Duration) -> Result<String, DataLoadError> {
    Err(DataLoadError::RemoteDisabled(url.to_owned()))
}
