use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters for writes, index maintenance and scans.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub records: BTreeMap<String, RecordCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // Executor entrypoints
    pub write_calls: u64,
    pub point_reads: u64,
    pub range_scans: u64,
    pub owner_scans: u64,
    pub mirror_scans: u64,

    // Rows touched
    pub rows_scanned: u64,
    pub rows_returned: u64,

    // Maintenance
    pub records_written: u64,
    pub index_inserts: u64,
    pub mirror_appends: u64,
    pub mirror_resets: u64,
}

///
/// RecordCounters
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RecordCounters {
    pub records_written: u64,
    pub index_inserts: u64,
    pub mirror_appends: u64,
    pub mirror_len: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters (useful in tests).
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}
