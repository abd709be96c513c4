//! Observability: mapper/validation counters and the sink boundary.
//!
//! Mapper and entity code never touch `obs::metrics` directly; every
//! instrumentation point emits a `MapperEvent` through `sink::record`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, EventState, ModelCounters, ModelSummary};
pub use sink::{EventSink, MapperEvent, metrics_report, metrics_reset_all, with_event_sink};
