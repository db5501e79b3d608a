use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::chart::ChartStyle;
use crate::core::{LaunchRecord, OutcomeClass, SiteSelection};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieSlice {
    pub class: OutcomeClass,
    pub label: String,
    pub count: usize,
    pub color: String,
}

/// Outcome counts for one site selection.
///
/// Only classes with at least one record get a slice; slices are ordered by
/// ascending class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieSpec {
    pub title: String,
    pub slices: SmallVec<[PieSlice; 2]>,
}

impl PieSpec {
    #[must_use]
    pub fn count_for(&self, class: OutcomeClass) -> Option<usize> {
        self.slices
            .iter()
            .find(|slice| slice.class == class)
            .map(|slice| slice.count)
    }

    #[must_use]
    pub fn counts(&self) -> BTreeMap<OutcomeClass, usize> {
        self.slices
            .iter()
            .map(|slice| (slice.class, slice.count))
            .collect()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.slices.iter().map(|slice| slice.count).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Groups `records` by outcome class.
#[must_use]
pub fn build_pie_spec<'a, I>(records: I, site: &SiteSelection, style: &ChartStyle) -> PieSpec
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    let mut counts = [0usize; 2];
    for record in records {
        counts[usize::from(record.outcome.as_u8())] += 1;
    }

    let slices = OutcomeClass::ALL
        .into_iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(class, count)| PieSlice {
            class,
            label: style.pie_slice_labels.get(class).to_owned(),
            count,
            color: style.outcome_colors.get(class).to_owned(),
        })
        .collect();

    PieSpec {
        title: style.pie_title_for(site),
        slices,
    }
}
