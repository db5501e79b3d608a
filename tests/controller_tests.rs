use std::sync::Arc;

use launch_dash::chart::{ChartSpec, ChartStyle};
use launch_dash::controller::{
    ChartSlot, ControlInput, DashboardController, HandlerTable, InputEvent, pie_handler,
    scatter_handler,
};
use launch_dash::core::{
    Dataset, LaunchRecord, OutcomeClass, PayloadRange, SelectionState, SiteSelection,
};
use launch_dash::error::DashError;

fn controller() -> DashboardController {
    let dataset = Dataset::from_records(vec![
        LaunchRecord::new("A", Some(500.0), OutcomeClass::Success),
        LaunchRecord::new("A", Some(1500.0), OutcomeClass::Failure),
        LaunchRecord::new("B", Some(2500.0), OutcomeClass::Success),
        LaunchRecord::new("B", Some(3500.0), OutcomeClass::Success),
    ])
    .expect("dataset");
    DashboardController::new(Arc::new(dataset), ChartStyle::default())
}

fn site_event(site: &str) -> InputEvent {
    InputEvent::SiteSelected {
        site: SiteSelection::parse(site),
    }
}

#[test]
fn initial_state_selects_all_sites_over_full_payload_domain() {
    let controller = controller();
    let state = controller.initial_state();
    assert_eq!(state.selected_site, SiteSelection::All);
    assert_eq!(state.payload_range, PayloadRange { lo: 500.0, hi: 3500.0 });
}

#[test]
fn initial_render_fills_both_slots() {
    let controller = controller();
    let (_, updates) = controller.initial_render();
    let slots: Vec<_> = updates.iter().map(|u| u.slot).collect();
    assert_eq!(slots, vec![ChartSlot::PieChart, ChartSlot::ScatterChart]);

    let pie = updates[0].chart.as_pie().expect("pie");
    assert_eq!(pie.title, "Success Launches by Class");
    assert_eq!(pie.total(), 4);
    let scatter = updates[1].chart.as_scatter().expect("scatter");
    assert_eq!(scatter.points.len(), 4);
}

#[test]
fn site_change_updates_pie_and_scatter() {
    let controller = controller();
    let (state, updates) = controller
        .dispatch(controller.initial_state(), &site_event("A"))
        .expect("dispatch");

    assert_eq!(state.selected_site, SiteSelection::parse("A"));
    assert_eq!(updates.len(), 2);
    let pie = updates[0].chart.as_pie().expect("pie");
    assert_eq!(pie.title, "Success Launches by Class - A");
    assert_eq!(pie.count_for(OutcomeClass::Success), Some(1));
    assert_eq!(pie.count_for(OutcomeClass::Failure), Some(1));
    let scatter = updates[1].chart.as_scatter().expect("scatter");
    assert!(scatter.points.iter().all(|p| p.launch_site == "A"));
}

#[test]
fn payload_change_updates_only_scatter() {
    let controller = controller();
    let event = InputEvent::PayloadRangeChanged { lo: 0.0, hi: 3000.0 };
    let (state, updates) = controller
        .dispatch(controller.initial_state(), &event)
        .expect("dispatch");

    assert_eq!(state.payload_range, PayloadRange { lo: 0.0, hi: 3000.0 });
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].slot, ChartSlot::ScatterChart);
    let scatter = updates[0].chart.as_scatter().expect("scatter");
    assert_eq!(scatter.points.len(), 3);
    assert_eq!(scatter.y_axis.tick_text, vec!["Failed", "Successful"]);
}

#[test]
fn out_of_domain_range_renders_empty_scatter() {
    let controller = controller();
    let event = InputEvent::PayloadRangeChanged {
        lo: 10_000.0,
        hi: 20_000.0,
    };
    let (state, updates) = controller
        .dispatch(controller.initial_state(), &event)
        .expect("empty selection is not an error");
    assert_eq!(state.payload_range.lo, 10_000.0);
    assert!(updates[0].chart.as_scatter().expect("scatter").is_empty());
}

#[test]
fn reversed_range_is_swapped() {
    let controller = controller();
    let event = InputEvent::PayloadRangeChanged { lo: 3000.0, hi: 0.0 };
    let (state, _) = controller
        .dispatch(controller.initial_state(), &event)
        .expect("dispatch");
    assert_eq!(state.payload_range, PayloadRange { lo: 0.0, hi: 3000.0 });
}

#[test]
fn non_finite_range_is_rejected() {
    let controller = controller();
    let event = InputEvent::PayloadRangeChanged {
        lo: f64::NAN,
        hi: 10.0,
    };
    let err = controller
        .dispatch(controller.initial_state(), &event)
        .expect_err("NaN bound");
    assert!(matches!(err, DashError::InvalidSelection(_)));
}

#[test]
fn handlers_are_idempotent() {
    let controller = controller();
    let state = SelectionState::new(
        SiteSelection::parse("B"),
        PayloadRange::new(1000.0, 4000.0).expect("range"),
    );
    assert_eq!(controller.render_all(&state), controller.render_all(&state));
    assert_eq!(
        controller.render_slot(ChartSlot::ScatterChart, &state),
        controller.render_slot(ChartSlot::ScatterChart, &state)
    );
}

#[test]
fn sessions_keep_independent_state() {
    let controller = controller();
    let mut first = controller.session();
    let mut second = controller.session();

    first.handle(&site_event("A")).expect("first");
    second
        .handle(&InputEvent::PayloadRangeChanged { lo: 0.0, hi: 1000.0 })
        .expect("second");

    assert_eq!(first.state().selected_site, SiteSelection::parse("A"));
    assert_eq!(first.state().payload_range, PayloadRange { lo: 500.0, hi: 3500.0 });
    assert_eq!(second.state().selected_site, SiteSelection::All);
    assert_eq!(second.state().payload_range, PayloadRange { lo: 0.0, hi: 1000.0 });
}

#[test]
fn failed_event_keeps_previous_session_state() {
    let controller = controller();
    let mut session = controller.session();
    session.handle(&site_event("B")).expect("site");
    let before = session.state().clone();

    let result = session.handle(&InputEvent::PayloadRangeChanged {
        lo: f64::INFINITY,
        hi: 0.0,
    });
    assert!(result.is_err());
    assert_eq!(session.state(), &before);
}

#[test]
fn unknown_site_renders_empty_charts() {
    let controller = controller();
    let mut session = controller.session();
    let updates = session.handle(&site_event("Z")).expect("unknown site");
    for update in updates {
        match update.chart {
            ChartSpec::Pie(pie) => assert!(pie.is_empty()),
            ChartSpec::Scatter(scatter) => assert!(scatter.is_empty()),
        }
    }
}

#[test]
fn handler_table_rejects_duplicate_slots_and_empty_triggers() {
    let mut table = HandlerTable::new();
    table
        .register(ChartSlot::PieChart, &[ControlInput::SiteDropdown], pie_handler)
        .expect("first registration");

    let duplicate = table.register(ChartSlot::PieChart, &[ControlInput::SiteDropdown], pie_handler);
    assert!(matches!(duplicate, Err(DashError::InvalidConfig(_))));

    let empty = table.register(ChartSlot::ScatterChart, &[], scatter_handler);
    assert!(matches!(empty, Err(DashError::InvalidConfig(_))));
}

#[test]
fn custom_table_limits_updates_to_registered_triggers() {
    let mut table = HandlerTable::new();
    table
        .register(
            ChartSlot::ScatterChart,
            &[ControlInput::PayloadSlider, ControlInput::PayloadSlider],
            scatter_handler,
        )
        .expect("register");
    assert_eq!(table.entries()[0].triggers.len(), 1);

    let controller = DashboardController::with_handlers(
        controller().dataset().clone().into(),
        ChartStyle::default(),
        table,
    );
    let (_, updates) = controller
        .dispatch(controller.initial_state(), &site_event("A"))
        .expect("dispatch");
    assert!(updates.is_empty());
    assert!(controller.render_slot(ChartSlot::PieChart, &controller.initial_state()).is_none());
}
