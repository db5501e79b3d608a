//! launch-dash: launch records dashboard core.
//!
//! A dataset of launch records is loaded once and shared read-only. Two
//! pure handlers turn the current site / payload selection into declarative
//! chart specs (outcome pie, payload scatter). The HTTP shell in [`server`]
//! is a thin collaborator around that pipeline.

pub mod chart;
pub mod config;
pub mod controller;
pub mod core;
pub mod error;
pub mod layout;
pub mod telemetry;

#[cfg(feature = "server")]
pub mod server;

pub use chart::{ChartSpec, ChartStyle, PieSpec, ScatterSpec};
pub use controller::{DashboardController, InputEvent};
pub use core::{Dataset, LaunchRecord, SelectionState};
pub use error::{DashError, DashResult, DataLoadError};
