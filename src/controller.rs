//! Reactive wiring between the two controls and the two chart slots.
//!
//! Registration is an explicit [`HandlerTable`]: each entry names the slot it
//! renders, the inputs that trigger it, and a pure handler. The UI shell
//! forwards one [`InputEvent`] at a time; the controller updates that
//! session's [`SelectionState`] and re-evaluates only the triggered slots.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::chart::{ChartSpec, ChartStyle, build_pie_spec, build_scatter_spec};
use crate::core::{
    Dataset, PayloadRange, SelectionState, SiteSelection, filter_by_site, filter_for_scatter,
};
use crate::error::{DashError, DashResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlInput {
    SiteDropdown,
    PayloadSlider,
}

impl ControlInput {
    #[must_use]
    pub fn component_id(self) -> &'static str {
        match self {
            Self::SiteDropdown => "site-dropdown",
            Self::PayloadSlider => "payload-slider",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSlot {
    PieChart,
    ScatterChart,
}

impl ChartSlot {
    #[must_use]
    pub fn component_id(self) -> &'static str {
        match self {
            Self::PieChart => "success-pie-chart",
            Self::ScatterChart => "success-payload-scatter-chart",
        }
    }
}

/// Control-value change delivered by the UI shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    SiteSelected { site: SiteSelection },
    PayloadRangeChanged { lo: f64, hi: f64 },
}

impl InputEvent {
    #[must_use]
    pub fn input(&self) -> ControlInput {
        match self {
            Self::SiteSelected { .. } => ControlInput::SiteDropdown,
            Self::PayloadRangeChanged { .. } => ControlInput::PayloadSlider,
        }
    }
}

/// Pure mapping from dataset and selection to a chart.
pub type ChartHandler = fn(&Dataset, &SelectionState, &ChartStyle) -> ChartSpec;

#[derive(Debug, Clone)]
pub struct HandlerRegistration {
    pub slot: ChartSlot,
    pub triggers: SmallVec<[ControlInput; 2]>,
    pub handler: ChartHandler,
}

impl HandlerRegistration {
    #[must_use]
    pub fn is_triggered_by(&self, input: ControlInput) -> bool {
        self.triggers.contains(&input)
    }
}

#[derive(Debug, Clone, Default)]
pub struct HandlerTable {
    entries: Vec<HandlerRegistration>,
}

impl HandlerTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pie on site changes; scatter on site or payload changes.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            entries: vec![
                HandlerRegistration {
                    slot: ChartSlot::PieChart,
                    triggers: SmallVec::from_slice(&[ControlInput::SiteDropdown]),
                    handler: pie_handler,
                },
                HandlerRegistration {
                    slot: ChartSlot::ScatterChart,
                    triggers: SmallVec::from_slice(&[
                        ControlInput::PayloadSlider,
                        ControlInput::SiteDropdown,
                    ]),
                    handler: scatter_handler,
                },
            ],
        }
    }

    /// Registers a handler for `slot`. Each slot has at most one handler.
    pub fn register(
        &mut self,
        slot: ChartSlot,
        triggers: &[ControlInput],
        handler: ChartHandler,
    ) -> DashResult<()> {
        if triggers.is_empty() {
            return Err(DashError::InvalidConfig(format!(
                "handler for `{}` must have at least one trigger",
                slot.component_id()
            )));
        }
        if self.entries.iter().any(|entry| entry.slot == slot) {
            return Err(DashError::InvalidConfig(format!(
                "slot `{}` already has a handler",
                slot.component_id()
            )));
        }
        let mut deduped = SmallVec::<[ControlInput; 2]>::new();
        for trigger in triggers {
            if !deduped.contains(trigger) {
                deduped.push(*trigger);
            }
        }
        self.entries.push(HandlerRegistration {
            slot,
            triggers: deduped,
            handler,
        });
        Ok(())
    }

    #[must_use]
    pub fn entries(&self) -> &[HandlerRegistration] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, slot: ChartSlot) -> Option<&HandlerRegistration> {
        self.entries.iter().find(|entry| entry.slot == slot)
    }

    pub fn triggered_by(&self, input: ControlInput) -> impl Iterator<Item = &HandlerRegistration> {
        self.entries
            .iter()
            .filter(move |entry| entry.is_triggered_by(input))
    }
}

/// Site filter, then outcome counts.
#[must_use]
pub fn pie_handler(dataset: &Dataset, state: &SelectionState, style: &ChartStyle) -> ChartSpec {
    let records = filter_by_site(dataset.records(), &state.selected_site);
    debug!(
        site = %state.selected_site,
        records = records.len(),
        "pie handler"
    );
    build_pie_spec(records, &state.selected_site, style).into()
}

/// Payload window, then site filter, then point projection.
#[must_use]
pub fn scatter_handler(
    dataset: &Dataset,
    state: &SelectionState,
    style: &ChartStyle,
) -> ChartSpec {
    let records = filter_for_scatter(
        dataset.records(),
        &state.selected_site,
        state.payload_range,
    );
    debug!(
        site = %state.selected_site,
        lo = state.payload_range.lo,
        hi = state.payload_range.hi,
        records = records.len(),
        "scatter handler"
    );
    build_scatter_spec(records, style).into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotUpdate {
    pub slot: ChartSlot,
    pub chart: ChartSpec,
}

/// Shared, read-only controller. One instance serves every session.
#[derive(Debug, Clone)]
pub struct DashboardController {
    dataset: Arc<Dataset>,
    style: ChartStyle,
    handlers: HandlerTable,
}

impl DashboardController {
    #[must_use]
    pub fn new(dataset: Arc<Dataset>, style: ChartStyle) -> Self {
        Self::with_handlers(dataset, style, HandlerTable::standard())
    }

    #[must_use]
    pub fn with_handlers(dataset: Arc<Dataset>, style: ChartStyle, handlers: HandlerTable) -> Self {
        Self {
            dataset,
            style,
            handlers,
        }
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    #[must_use]
    pub fn handlers(&self) -> &HandlerTable {
        &self.handlers
    }

    #[must_use]
    pub fn initial_state(&self) -> SelectionState {
        SelectionState::initial(self.dataset.payload_bounds())
    }

    /// Swaps a reversed payload range; rejects non-finite bounds.
    pub fn normalize(&self, state: SelectionState) -> DashResult<SelectionState> {
        let range = state.payload_range;
        if range.is_normalized() {
            return Ok(state);
        }
        let payload_range = PayloadRange::new(range.lo, range.hi)?;
        warn!(
            lo = range.lo,
            hi = range.hi,
            "swapped reversed payload range"
        );
        Ok(SelectionState {
            payload_range,
            ..state
        })
    }

    /// Evaluates one slot, or `None` when no handler is registered for it.
    #[must_use]
    pub fn render_slot(&self, slot: ChartSlot, state: &SelectionState) -> Option<ChartSpec> {
        self.handlers
            .get(slot)
            .map(|entry| (entry.handler)(self.dataset(), state, &self.style))
    }

    /// Evaluates every registered slot in registration order.
    #[must_use]
    pub fn render_all(&self, state: &SelectionState) -> Vec<SlotUpdate> {
        self.handlers
            .entries()
            .iter()
            .map(|entry| SlotUpdate {
                slot: entry.slot,
                chart: (entry.handler)(self.dataset(), state, &self.style),
            })
            .collect()
    }

    #[must_use]
    pub fn initial_render(&self) -> (SelectionState, Vec<SlotUpdate>) {
        let state = self.initial_state();
        let updates = self.render_all(&state);
        (state, updates)
    }

    /// Applies `event` to `state` and re-renders the slots it triggers.
    pub fn dispatch(
        &self,
        state: SelectionState,
        event: &InputEvent,
    ) -> DashResult<(SelectionState, Vec<SlotUpdate>)> {
        let state = match event {
            InputEvent::SiteSelected { site } => SelectionState {
                selected_site: site.clone(),
                ..state
            },
            InputEvent::PayloadRangeChanged { lo, hi } => SelectionState {
                payload_range: PayloadRange { lo: *lo, hi: *hi },
                ..state
            },
        };
        let state = self.normalize(state)?;

        let input = event.input();
        let updates = self
            .handlers
            .triggered_by(input)
            .map(|entry| SlotUpdate {
                slot: entry.slot,
                chart: (entry.handler)(self.dataset(), &state, &self.style),
            })
            .collect::<Vec<_>>();
        debug!(
            input = input.component_id(),
            updated_slots = updates.len(),
            "dispatched input event"
        );
        Ok((state, updates))
    }

    #[must_use]
    pub fn session(&self) -> Session<'_> {
        Session {
            controller: self,
            state: self.initial_state(),
        }
    }
}

/// One client's independent selection, bound to a shared controller.
#[derive(Debug, Clone)]
pub struct Session<'a> {
    controller: &'a DashboardController,
    state: SelectionState,
}

impl Session<'_> {
    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    #[must_use]
    pub fn render(&self) -> Vec<SlotUpdate> {
        self.controller.render_all(&self.state)
    }

    /// Handles one event. On error the previous state is kept.
    pub fn handle(&mut self, event: &InputEvent) -> DashResult<Vec<SlotUpdate>> {
        let (state, updates) = self.controller.dispatch(self.state.clone(), event)?;
        self.state = state;
        Ok(updates)
    }
}
