use serde::{Deserialize, Serialize};

use crate::controller::{ChartSlot, ControlInput};
use crate::core::{ALL_SITES, Dataset, PayloadRange};

/// Static page settings that are not derived from the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub heading: String,
    pub heading_color: String,
    pub all_sites_label: String,
    pub site_placeholder: String,
    pub payload_label: String,
    pub payload_step_kg: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            heading: "SpaceX Launch Records Dashboard".to_owned(),
            heading_color: "#503D36".to_owned(),
            all_sites_label: "All Sites".to_owned(),
            site_placeholder: "Select a Launch Site here".to_owned(),
            payload_label: "Payload range (Kg):".to_owned(),
            payload_step_kg: 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteDropdown {
    pub id: String,
    pub options: Vec<DropdownOption>,
    pub value: String,
    pub placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderMark {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadSlider {
    pub id: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<SliderMark>,
    pub value: PayloadRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPlaceholder {
    pub id: String,
    pub slot: ChartSlot,
}

/// Serializable description of the whole page, top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardLayout {
    pub heading: String,
    pub heading_color: String,
    pub site_dropdown: SiteDropdown,
    pub pie_chart: ChartPlaceholder,
    pub payload_slider: PayloadSlider,
    pub scatter_chart: ChartPlaceholder,
}

impl DashboardLayout {
    #[must_use]
    pub fn from_dataset(dataset: &Dataset, config: &LayoutConfig) -> Self {
        let bounds = dataset.payload_bounds();
        let options = std::iter::once(DropdownOption {
            label: config.all_sites_label.clone(),
            value: ALL_SITES.to_owned(),
        })
        .chain(dataset.sites().map(|site| DropdownOption {
            label: site.to_owned(),
            value: site.to_owned(),
        }))
        .collect();

        let mut marks = vec![SliderMark {
            value: bounds.min,
            label: format_mark(bounds.min),
        }];
        if bounds.max != bounds.min {
            marks.push(SliderMark {
                value: bounds.max,
                label: format_mark(bounds.max),
            });
        }

        Self {
            heading: config.heading.clone(),
            heading_color: config.heading_color.clone(),
            site_dropdown: SiteDropdown {
                id: ControlInput::SiteDropdown.component_id().to_owned(),
                options,
                value: ALL_SITES.to_owned(),
                placeholder: config.site_placeholder.clone(),
            },
            pie_chart: placeholder(ChartSlot::PieChart),
            payload_slider: PayloadSlider {
                id: ControlInput::PayloadSlider.component_id().to_owned(),
                label: config.payload_label.clone(),
                min: bounds.min,
                max: bounds.max,
                step: config.payload_step_kg,
                marks,
                value: bounds.full_range(),
            },
            scatter_chart: placeholder(ChartSlot::ScatterChart),
        }
    }
}

fn placeholder(slot: ChartSlot) -> ChartPlaceholder {
    ChartPlaceholder {
        id: slot.component_id().to_owned(),
        slot,
    }
}

/// Whole kilograms print without a fractional part.
fn format_mark(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
