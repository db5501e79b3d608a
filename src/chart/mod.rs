//! Declarative chart descriptions built from filtered launch records.
//!
//! Output values carry data and labels only; drawing is left to whichever
//! plotting library the UI shell uses.

mod json_contract;
mod pie;
mod scatter;
mod style;

use serde::{Deserialize, Serialize};

pub use json_contract::{CHART_SPEC_JSON_SCHEMA_V1, ChartSpecJsonContractV1};
pub use pie::{PieSlice, PieSpec, build_pie_spec};
pub use scatter::{
    CategoryAxis, ClassColor, ColorChannel, ScatterPoint, ScatterSpec, ValueAxis,
    build_scatter_spec,
};
pub use style::{ChartStyle, OutcomeStrings};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Pie(PieSpec),
    Scatter(ScatterSpec),
}

impl ChartSpec {
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Pie(pie) => &pie.title,
            Self::Scatter(scatter) => &scatter.title,
        }
    }

    #[must_use]
    pub fn as_pie(&self) -> Option<&PieSpec> {
        match self {
            Self::Pie(pie) => Some(pie),
            Self::Scatter(_) => None,
        }
    }

    #[must_use]
    pub fn as_scatter(&self) -> Option<&ScatterSpec> {
        match self {
            Self::Scatter(scatter) => Some(scatter),
            Self::Pie(_) => None,
        }
    }
}

impl From<PieSpec> for ChartSpec {
    fn from(value: PieSpec) -> Self {
        Self::Pie(value)
    }
}

impl From<ScatterSpec> for ChartSpec {
    fn from(value: ScatterSpec) -> Self {
        Self::Scatter(value)
    }
}
