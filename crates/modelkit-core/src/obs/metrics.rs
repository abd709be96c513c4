use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters for mapper and validation activity.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub models: BTreeMap<String, ModelCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // Mapper entrypoints
    pub decode_calls: u64,
    pub encode_calls: u64,

    // Key resolution
    pub properties_assigned: u64,
    pub keys_encoded: u64,
    pub excluded_keys: u64,
    pub unmapped_keys: u64,

    // State machine
    pub validate_calls: u64,
    pub invalid_results: u64,
    pub undo_calls: u64,
    pub properties_restored: u64,
}

///
/// ModelCounters
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ModelCounters {
    pub decode_calls: u64,
    pub encode_calls: u64,
    pub excluded_keys: u64,
    pub unmapped_keys: u64,
    pub validate_calls: u64,
    pub invalid_results: u64,
    pub undo_calls: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow counters immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow counters mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters (useful in tests).
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    /// Counters accumulated on this thread since the last reset.
    pub counters: EventState,
    /// Per-model counters, sorted by decode volume then path.
    pub model_counters: Vec<ModelSummary>,
}

///
/// ModelSummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ModelSummary {
    pub path: String,
    pub decode_calls: u64,
    pub encode_calls: u64,
    pub unmapped_keys: u64,
    pub validate_calls: u64,
    pub invalid_results: u64,
    pub undo_calls: u64,
}

pub(crate) fn report() -> EventReport {
    with_state(|state| {
        let mut model_counters: Vec<ModelSummary> = state
            .models
            .iter()
            .map(|(path, c)| ModelSummary {
                path: path.clone(),
                decode_calls: c.decode_calls,
                encode_calls: c.encode_calls,
                unmapped_keys: c.unmapped_keys,
                validate_calls: c.validate_calls,
                invalid_results: c.invalid_results,
                undo_calls: c.undo_calls,
            })
            .collect();

        model_counters.sort_by(|a, b| {
            b.decode_calls
                .cmp(&a.decode_calls)
                .then_with(|| a.path.cmp(&b.path))
        });

        EventReport {
            counters: state.clone(),
            model_counters,
        }
    })
}
