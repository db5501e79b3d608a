use crate::core::{LaunchRecord, PayloadRange, SiteSelection};

/// Returns records launched from `site`, preserving input order.
///
/// `SiteSelection::All` keeps every record.
#[must_use]
pub fn filter_by_site<'a, I>(records: I, site: &SiteSelection) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    records
        .into_iter()
        .filter(|record| site.matches(&record.launch_site))
        .collect()
}

/// Returns records whose payload lies inside the inclusive `range`,
/// preserving input order. Records without a payload are dropped.
#[must_use]
pub fn filter_by_payload_range<'a, I>(records: I, range: PayloadRange) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    records
        .into_iter()
        .filter(|record| {
            record
                .payload_mass_kg
                .is_some_and(|mass| range.contains(mass))
        })
        .collect()
}

/// Payload range first, then site: the composition feeding the scatter chart.
#[must_use]
pub fn filter_for_scatter<'a, I>(
    records: I,
    site: &SiteSelection,
    range: PayloadRange,
) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    let in_range = filter_by_payload_range(records, range);
    if site.is_all() {
        return in_range;
    }
    filter_by_site(in_range, site)
}
