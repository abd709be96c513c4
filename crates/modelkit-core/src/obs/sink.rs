//! Event sink boundary.
//!
//! This module is the only bridge between mapping/validation logic and the
//! thread-local counter state in `obs::metrics`.

use crate::obs::metrics;
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn EventSink>>> = const { RefCell::new(None) };
}

///
/// MapperEvent
///

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapperEvent {
    Decode {
        model_path: &'static str,
        assigned: u64,
    },
    ExcludedKey {
        model_path: &'static str,
        key: String,
    },
    UnmappedKey {
        model_path: &'static str,
        key: String,
    },
    Encode {
        model_path: &'static str,
        keys: u64,
    },
    Validate {
        model_path: &'static str,
        failures: u64,
    },
    Undo {
        model_path: &'static str,
        restored: u64,
    },
}

impl MapperEvent {
    #[must_use]
    pub const fn model_path(&self) -> &'static str {
        match self {
            Self::Decode { model_path, .. }
            | Self::ExcludedKey { model_path, .. }
            | Self::UnmappedKey { model_path, .. }
            | Self::Encode { model_path, .. }
            | Self::Validate { model_path, .. }
            | Self::Undo { model_path, .. } => model_path,
        }
    }
}

///
/// EventSink
///

pub trait EventSink {
    fn record(&self, event: MapperEvent);
}

/// GlobalEventSink
/// Default sink that writes into the thread-local counter state.
/// Used whenever no scoped override is installed.

pub(crate) struct GlobalEventSink;

impl EventSink for GlobalEventSink {
    fn record(&self, event: MapperEvent) {
        let path = event.model_path();

        metrics::with_state_mut(|m| {
            let entry = m.models.entry(path.to_string()).or_default();

            match event {
                MapperEvent::Decode { assigned, .. } => {
                    m.ops.decode_calls = m.ops.decode_calls.saturating_add(1);
                    m.ops.properties_assigned = m.ops.properties_assigned.saturating_add(assigned);
                    entry.decode_calls = entry.decode_calls.saturating_add(1);
                }
                MapperEvent::ExcludedKey { .. } => {
                    m.ops.excluded_keys = m.ops.excluded_keys.saturating_add(1);
                    entry.excluded_keys = entry.excluded_keys.saturating_add(1);
                }
                MapperEvent::UnmappedKey { .. } => {
                    m.ops.unmapped_keys = m.ops.unmapped_keys.saturating_add(1);
                    entry.unmapped_keys = entry.unmapped_keys.saturating_add(1);
                }
                MapperEvent::Encode { keys, .. } => {
                    m.ops.encode_calls = m.ops.encode_calls.saturating_add(1);
                    m.ops.keys_encoded = m.ops.keys_encoded.saturating_add(keys);
                    entry.encode_calls = entry.encode_calls.saturating_add(1);
                }
                MapperEvent::Validate { failures, .. } => {
                    m.ops.validate_calls = m.ops.validate_calls.saturating_add(1);
                    entry.validate_calls = entry.validate_calls.saturating_add(1);
                    if failures > 0 {
                        m.ops.invalid_results = m.ops.invalid_results.saturating_add(1);
                        entry.invalid_results = entry.invalid_results.saturating_add(1);
                    }
                }
                MapperEvent::Undo { restored, .. } => {
                    m.ops.undo_calls = m.ops.undo_calls.saturating_add(1);
                    m.ops.properties_restored = m.ops.properties_restored.saturating_add(restored);
                    entry.undo_calls = entry.undo_calls.saturating_add(1);
                }
            }
        });
    }
}

pub(crate) const GLOBAL_EVENT_SINK: GlobalEventSink = GlobalEventSink;

pub(crate) fn record(event: MapperEvent) {
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match override_sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_EVENT_SINK.record(event),
    }
}

/// Snapshot the current thread's counters.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all counters on the current thread.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary sink override on the current thread.
/// The previous sink is restored on every exit, including unwind.
pub fn with_event_sink<T>(sink: Rc<dyn EventSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn EventSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///
