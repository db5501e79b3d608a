use serde::{Deserialize, Serialize};

use crate::chart::ChartStyle;
use crate::core::{LaunchRecord, OutcomeClass};

/// One launch projected onto the payload/outcome plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: Option<f64>,
    pub outcome: OutcomeClass,
    pub launch_site: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booster_version_category: Option<String>,
}

impl From<&LaunchRecord> for ScatterPoint {
    fn from(record: &LaunchRecord) -> Self {
        Self {
            payload_mass_kg: record.payload_mass_kg,
            outcome: record.outcome,
            launch_site: record.launch_site.clone(),
            booster_version_category: record.booster_version_category.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueAxis {
    pub label: String,
}

/// Axis with fixed ticks, each tick value paired with its display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAxis {
    pub label: String,
    pub tick_values: Vec<OutcomeClass>,
    pub tick_text: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassColor {
    pub class: OutcomeClass,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorChannel {
    pub field: String,
    pub label: String,
    pub colors: Vec<ClassColor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSpec {
    pub title: String,
    pub points: Vec<ScatterPoint>,
    pub x_axis: ValueAxis,
    pub y_axis: CategoryAxis,
    pub color: ColorChannel,
}

impl ScatterSpec {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Projects every record to a point, in input order. No grouping.
#[must_use]
pub fn build_scatter_spec<'a, I>(records: I, style: &ChartStyle) -> ScatterSpec
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    let points = records.into_iter().map(ScatterPoint::from).collect();

    ScatterSpec {
        title: style.scatter_title.clone(),
        points,
        x_axis: ValueAxis {
            label: style.payload_axis_label.clone(),
        },
        y_axis: CategoryAxis {
            label: style.outcome_axis_label.clone(),
            tick_values: OutcomeClass::ALL.to_vec(),
            tick_text: OutcomeClass::ALL
                .iter()
                .map(|class| style.outcome_tick_text.get(*class).to_owned())
                .collect(),
        },
        color: ColorChannel {
            field: style.color_field.clone(),
            label: style.outcome_axis_label.clone(),
            colors: OutcomeClass::ALL
                .iter()
                .map(|class| ClassColor {
                    class: *class,
                    color: style.outcome_colors.get(*class).to_owned(),
                })
                .collect(),
        },
    }
}
