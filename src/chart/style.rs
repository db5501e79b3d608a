use serde::{Deserialize, Serialize};

use crate::core::{OutcomeClass, SiteSelection};

/// Per-outcome string pair (labels, colours).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeStrings {
    pub failure: String,
    pub success: String,
}

impl OutcomeStrings {
    #[must_use]
    pub fn new(failure: impl Into<String>, success: impl Into<String>) -> Self {
        Self {
            failure: failure.into(),
            success: success.into(),
        }
    }

    #[must_use]
    pub fn get(&self, class: OutcomeClass) -> &str {
        match class {
            OutcomeClass::Failure => &self.failure,
            OutcomeClass::Success => &self.success,
        }
    }
}

/// Explicit presentation settings for the chart builders.
///
/// Everything a plotting library would otherwise pick implicitly (titles,
/// axis labels, tick text, colours) lives here so output is reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub pie_title: String,
    pub pie_slice_labels: OutcomeStrings,
    pub scatter_title: String,
    pub payload_axis_label: String,
    pub outcome_axis_label: String,
    pub outcome_tick_text: OutcomeStrings,
    pub outcome_colors: OutcomeStrings,
    /// Record field the scatter colour channel encodes.
    pub color_field: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            pie_title: "Success Launches by Class".to_owned(),
            pie_slice_labels: OutcomeStrings::new("0", "1"),
            scatter_title: "Correlation between Payload and Launch Success".to_owned(),
            payload_axis_label: "Payload Mass (kg)".to_owned(),
            outcome_axis_label: "Launch Success".to_owned(),
            outcome_tick_text: OutcomeStrings::new("Failed", "Successful"),
            outcome_colors: OutcomeStrings::new("#EF553B", "#636EFA"),
            color_field: "class".to_owned(),
        }
    }
}

impl ChartStyle {
    /// Pie title, suffixed with the literal site id unless every site is selected.
    #[must_use]
    pub fn pie_title_for(&self, site: &SiteSelection) -> String {
        if site.is_all() {
            self.pie_title.clone()
        } else {
            format!("{} - {site}", self.pie_title)
        }
    }
}
