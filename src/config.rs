use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::chart::ChartStyle;
use crate::core::{ColumnMapping, DataSource, LoadOptions};
use crate::error::{DashError, DashResult};
use crate::layout::LayoutConfig;

/// Published launch records dataset.
pub const DEFAULT_SOURCE_URL: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBM-DS0321EN-SkillsNetwork/datasets/spacex_launch_dash.csv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindConfig {
    pub host: String,
    pub port: u16,
}

impl Default for BindConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8050,
        }
    }
}

impl BindConfig {
    /// `host:port` for display; IPv6 literals are bracketed.
    #[must_use]
    pub fn address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Resolves `host` (IP literal or hostname) together with `port`.
    pub fn socket_addrs(&self) -> DashResult<Vec<SocketAddr>> {
        let addrs = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| {
                DashError::InvalidConfig(format!(
                    "cannot resolve bind address `{}`: {e}",
                    self.address()
                ))
            })?
            .collect::<Vec<_>>();
        if addrs.is_empty() {
            return Err(DashError::InvalidConfig(format!(
                "bind address `{}` resolved to nothing",
                self.address()
            )));
        }
        Ok(addrs)
    }
}

/// Process configuration, usually read from a TOML file.
///
/// Every field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub source: DataSource,
    pub fetch_timeout_secs: u64,
    pub bind: BindConfig,
    pub columns: ColumnMapping,
    pub style: ChartStyle,
    pub layout: LayoutConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DataSource::parse(DEFAULT_SOURCE_URL),
            fetch_timeout_secs: 30,
            bind: BindConfig::default(),
            columns: ColumnMapping::default(),
            style: ChartStyle::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(input: &str) -> DashResult<Self> {
        let config: Self = toml::from_str(input)
            .map_err(|e| DashError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()
    }

    pub fn from_path(path: impl AsRef<Path>) -> DashResult<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|e| {
            DashError::InvalidConfig(format!("failed to read `{}`: {e}", path.display()))
        })?;
        Self::from_toml_str(&input)
    }

    pub fn validate(self) -> DashResult<Self> {
        if self.fetch_timeout_secs == 0 {
            return Err(DashError::InvalidConfig(
                "`fetch_timeout_secs` must be > 0".to_owned(),
            ));
        }
        if !self.layout.payload_step_kg.is_finite() || self.layout.payload_step_kg <= 0.0 {
            return Err(DashError::InvalidConfig(
                "`layout.payload_step_kg` must be finite and > 0".to_owned(),
            ));
        }
        for (value, name) in [
            (&self.columns.launch_site, "columns.launch_site"),
            (&self.columns.payload_mass_kg, "columns.payload_mass_kg"),
            (&self.columns.outcome, "columns.outcome"),
        ] {
            if value.trim().is_empty() {
                return Err(DashError::InvalidConfig(format!(
                    "`{name}` must not be empty"
                )));
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            columns: self.columns.clone(),
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
        }
    }
}
