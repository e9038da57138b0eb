//! Metrics sink boundary.
//!
//! Core db logic MUST NOT touch `obs::metrics` directly.
//! All instrumentation flows through `MetricsEvent` and `record`.

use crate::obs::metrics::{self, EventState};

///
/// ExecKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExecKind {
    Write,
    PointRead,
    RangeScan,
    OwnerScan,
    MirrorScan,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent {
    ExecStart {
        kind: ExecKind,
    },
    ExecFinish {
        kind: ExecKind,
        rows_scanned: u64,
        rows_returned: u64,
    },
    RecordWritten {
        path: &'static str,
    },
    IndexInserted {
        path: &'static str,
    },
    MirrorAppended {
        path: &'static str,
        len: u64,
    },
    MirrorReset {
        path: &'static str,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local event state.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::ExecStart { kind } => {
                metrics::with_state_mut(|m| {
                    let counter = match kind {
                        ExecKind::Write => &mut m.ops.write_calls,
                        ExecKind::PointRead => &mut m.ops.point_reads,
                        ExecKind::RangeScan => &mut m.ops.range_scans,
                        ExecKind::OwnerScan => &mut m.ops.owner_scans,
                        ExecKind::MirrorScan => &mut m.ops.mirror_scans,
                    };
                    *counter = counter.saturating_add(1);
                });
            }

            MetricsEvent::ExecFinish {
                kind: _,
                rows_scanned,
                rows_returned,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_scanned = m.ops.rows_scanned.saturating_add(rows_scanned);
                    m.ops.rows_returned = m.ops.rows_returned.saturating_add(rows_returned);
                });
            }

            MetricsEvent::RecordWritten { path } => {
                metrics::with_state_mut(|m| {
                    m.ops.records_written = m.ops.records_written.saturating_add(1);
                    let entry = m.records.entry(path.to_string()).or_default();
                    entry.records_written = entry.records_written.saturating_add(1);
                });
            }

            MetricsEvent::IndexInserted { path } => {
                metrics::with_state_mut(|m| {
                    m.ops.index_inserts = m.ops.index_inserts.saturating_add(1);
                    let entry = m.records.entry(path.to_string()).or_default();
                    entry.index_inserts = entry.index_inserts.saturating_add(1);
                });
            }

            MetricsEvent::MirrorAppended { path, len } => {
                metrics::with_state_mut(|m| {
                    m.ops.mirror_appends = m.ops.mirror_appends.saturating_add(1);
                    let entry = m.records.entry(path.to_string()).or_default();
                    entry.mirror_appends = entry.mirror_appends.saturating_add(1);
                    entry.mirror_len = len;
                });
            }

            MetricsEvent::MirrorReset { path } => {
                metrics::with_state_mut(|m| {
                    m.ops.mirror_resets = m.ops.mirror_resets.saturating_add(1);
                    m.records.entry(path.to_string()).or_default().mirror_len = 0;
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    GLOBAL_METRICS_SINK.record(event);
}

/// Snapshot the current metrics state.
#[must_use]
pub fn metrics_report() -> EventState {
    metrics::with_state(Clone::clone)
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

///
/// Span
/// RAII guard that emits start/finish events for one executor call.
/// Finish accounting happens even when the executor returns early.
///

pub(crate) struct Span {
    kind: ExecKind,
    rows_scanned: u64,
    rows_returned: u64,
}

impl Span {
    #[must_use]
    pub(crate) fn new(kind: ExecKind) -> Self {
        record(MetricsEvent::ExecStart { kind });

        Self {
            kind,
            rows_scanned: 0,
            rows_returned: 0,
        }
    }

    pub(crate) const fn add_scanned(&mut self, rows: u64) {
        self.rows_scanned = self.rows_scanned.saturating_add(rows);
    }

    pub(crate) const fn set_returned(&mut self, rows: u64) {
        self.rows_returned = rows;
    }
}

impl Drop for Span {
    fn drop(&mut self) {
        record(MetricsEvent::ExecFinish {
            kind: self.kind,
            rows_scanned: self.rows_scanned,
            rows_returned: self.rows_returned,
        });
    }
}

///
/// TESTS
///
