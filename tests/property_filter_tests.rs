use launch_dash::chart::{ChartStyle, build_pie_spec, build_scatter_spec};
use launch_dash::core::{
    LaunchRecord, OutcomeClass, PayloadRange, SiteSelection, filter_by_payload_range,
    filter_by_site, filter_for_scatter,
};
use proptest::prelude::*;

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

fn record_strategy() -> impl Strategy<Value = LaunchRecord> {
    (
        0usize..SITES.len(),
        prop_oneof![4 => (0.0f64..16_000.0).prop_map(Some), 1 => Just(None::<f64>)],
        any::<bool>(),
    )
        .prop_map(|(site, payload, success)| {
            let outcome = if success {
                OutcomeClass::Success
            } else {
                OutcomeClass::Failure
            };
            LaunchRecord::new(SITES[site], payload, outcome)
        })
}

fn site_strategy() -> impl Strategy<Value = SiteSelection> {
    prop_oneof![
        Just(SiteSelection::All),
        (0usize..SITES.len()).prop_map(|i| SiteSelection::parse(SITES[i])),
        Just(SiteSelection::parse("unknown")),
    ]
}

fn is_subsequence(sub: &[&LaunchRecord], full: &[LaunchRecord]) -> bool {
    let mut cursor = full.iter();
    sub.iter()
        .all(|wanted| cursor.any(|candidate| std::ptr::eq(*wanted, candidate)))
}

proptest! {
    #[test]
    fn site_filter_is_order_preserving_subsequence(
        records in proptest::collection::vec(record_strategy(), 0..64),
        site in site_strategy(),
    ) {
        let kept = filter_by_site(&records, &site);
        prop_assert!(is_subsequence(&kept, &records));
        prop_assert!(kept.iter().all(|r| site.matches(&r.launch_site)));
        let expected = records.iter().filter(|r| site.matches(&r.launch_site)).count();
        prop_assert_eq!(kept.len(), expected);
        if site.is_all() {
            prop_assert_eq!(kept.len(), records.len());
        }
    }

    #[test]
    fn payload_filter_selects_exactly_the_inclusive_window(
        records in proptest::collection::vec(record_strategy(), 0..64),
        a in 0.0f64..16_000.0,
        b in 0.0f64..16_000.0,
    ) {
        let range = PayloadRange::new(a, b).expect("finite");
        let kept = filter_by_payload_range(&records, range);
        prop_assert!(is_subsequence(&kept, &records));
        let expected = records
            .iter()
            .filter(|r| r.payload_mass_kg.is_some_and(|m| range.lo <= m && m <= range.hi))
            .count();
        prop_assert_eq!(kept.len(), expected);
    }

    #[test]
    fn widening_the_window_never_drops_records(
        records in proptest::collection::vec(record_strategy(), 0..64),
        lo in 0.0f64..8_000.0,
        width in 0.0f64..8_000.0,
        grow_lo in 0.0f64..2_000.0,
        grow_hi in 0.0f64..2_000.0,
    ) {
        let narrow = PayloadRange::new(lo, lo + width).expect("narrow");
        let wide = PayloadRange::new(lo - grow_lo, lo + width + grow_hi).expect("wide");
        let narrow_kept = filter_by_payload_range(&records, narrow);
        let wide_kept = filter_by_payload_range(&records, wide);
        for record in narrow_kept {
            prop_assert!(wide_kept.iter().any(|r| std::ptr::eq(*r, record)));
        }
    }

    #[test]
    fn filter_order_does_not_change_the_result_set(
        records in proptest::collection::vec(record_strategy(), 0..64),
        site in site_strategy(),
        a in 0.0f64..16_000.0,
        b in 0.0f64..16_000.0,
    ) {
        let range = PayloadRange::new(a, b).expect("finite");
        let range_first = filter_for_scatter(&records, &site, range);
        let site_first = filter_by_payload_range(filter_by_site(&records, &site), range);
        prop_assert_eq!(range_first, site_first);
    }

    #[test]
    fn pie_counts_sum_to_selection_size(
        records in proptest::collection::vec(record_strategy(), 0..64),
        site in site_strategy(),
    ) {
        let style = ChartStyle::default();
        let selected = filter_by_site(&records, &site);
        let pie = build_pie_spec(selected.iter().copied(), &site, &style);
        prop_assert_eq!(pie.total(), selected.len());
        prop_assert!(pie.slices.len() <= 2);
        prop_assert!(pie.slices.iter().all(|slice| slice.count > 0));
    }

    #[test]
    fn scatter_emits_one_traceable_point_per_record(
        records in proptest::collection::vec(record_strategy(), 0..64),
        site in site_strategy(),
        a in 0.0f64..16_000.0,
        b in 0.0f64..16_000.0,
    ) {
        let style = ChartStyle::default();
        let range = PayloadRange::new(a, b).expect("finite");
        let selected = filter_for_scatter(&records, &site, range);
        let scatter = build_scatter_spec(selected.iter().copied(), &style);
        prop_assert_eq!(scatter.points.len(), selected.len());
        for (point, record) in scatter.points.iter().zip(&selected) {
            prop_assert_eq!(point.payload_mass_kg, record.payload_mass_kg);
            prop_assert_eq!(point.outcome, record.outcome);
            prop_assert_eq!(&point.launch_site, &record.launch_site);
        }
    }
}
