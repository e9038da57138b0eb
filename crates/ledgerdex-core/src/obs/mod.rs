//! Observability: runtime counters and the sink they flow through.
//!
//! This module does not access the ledger. Executors report what they did
//! through [`MetricsEvent`]s; logging stays at the call sites via `tracing`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventState, RecordCounters};
pub use sink::{ExecKind, MetricsEvent, MetricsSink, metrics_report, metrics_reset_all};
