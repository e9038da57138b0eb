use crate::{
    error::InternalError,
    ledger::{Ledger, LedgerEntry, StateCursor},
};
use derive_more::Deref;
use std::{
    cell::Cell,
    collections::{BTreeMap, BTreeSet},
    ops::Bound,
};

///
/// MemoryLedger
///
/// In-process ledger backed by a `BTreeMap`, ordered lexicographically by
/// key bytes. Cursors snapshot their result set when the scan starts.
///
/// Faults can be injected to exercise failure paths: a failing put or get on
/// one key, scans that fail after N entries, and cursors whose close fails.
///

#[derive(Debug, Default, Deref)]
pub struct MemoryLedger {
    #[deref]
    state: BTreeMap<String, Vec<u8>>,
    open_cursors: Cell<usize>,
    faults: Faults,
}

#[derive(Debug, Default)]
struct Faults {
    put_keys: BTreeSet<String>,
    get_keys: BTreeSet<String>,
    scan_fail_after: Option<usize>,
    close_fails: bool,
}

impl MemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cursors opened and not yet closed.
    #[must_use]
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.get()
    }

    /// Make every subsequent put on `key` fail.
    pub fn fail_put_on(&mut self, key: impl Into<String>) {
        self.faults.put_keys.insert(key.into());
    }

    /// Make every subsequent get on `key` fail.
    pub fn fail_get_on(&mut self, key: impl Into<String>) {
        self.faults.get_keys.insert(key.into());
    }

    /// Make every subsequent scan fail after yielding `entries` entries.
    pub const fn fail_scans_after(&mut self, entries: usize) {
        self.faults.scan_fail_after = Some(entries);
    }

    /// Make every subsequent cursor close report a failure.
    pub const fn fail_cursor_close(&mut self) {
        self.faults.close_fails = true;
    }

    pub fn clear_faults(&mut self) {
        self.faults = Faults::default();
    }

    fn open_cursor(&self, entries: Vec<LedgerEntry>) -> MemoryCursor<'_> {
        self.open_cursors.set(self.open_cursors.get() + 1);

        MemoryCursor {
            entries: entries.into_iter(),
            yielded: 0,
            fail_after: self.faults.scan_fail_after,
            failed: false,
            close_fails: self.faults.close_fails,
            closed: false,
            open_cursors: &self.open_cursors,
        }
    }
}

impl Ledger for MemoryLedger {
    type Cursor<'a> = MemoryCursor<'a>;

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, InternalError> {
        if self.faults.get_keys.contains(key) {
            return Err(InternalError::ledger_unavailable(format!(
                "failed to get state for {key}"
            )));
        }

        Ok(self.state.get(key).cloned())
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), InternalError> {
        if self.faults.put_keys.contains(key) {
            return Err(InternalError::ledger_unavailable(format!(
                "failed to put state for {key}"
            )));
        }

        self.state.insert(key.to_string(), value.to_vec());

        Ok(())
    }

    fn del_state(&mut self, key: &str) -> Result<(), InternalError> {
        self.state.remove(key);

        Ok(())
    }

    fn state_by_range(&self, start: &str, end: &str) -> Result<Self::Cursor<'_>, InternalError> {
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end)
        };

        // BTreeMap::range panics on inverted bounds; an inverted range is empty.
        let entries = if !end.is_empty() && start >= end {
            Vec::new()
        } else {
            self.state
                .range::<str, _>((Bound::Included(start), upper))
                .map(|(key, value)| LedgerEntry::new(key.clone(), value.clone()))
                .collect()
        };

        Ok(self.open_cursor(entries))
    }

    fn state_by_prefix(&self, prefix: &str) -> Result<Self::Cursor<'_>, InternalError> {
        let entries = self
            .state
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| LedgerEntry::new(key.clone(), value.clone()))
            .collect();

        Ok(self.open_cursor(entries))
    }
}

///
/// MemoryCursor
///

#[derive(Debug)]
pub struct MemoryCursor<'a> {
    entries: std::vec::IntoIter<LedgerEntry>,
    yielded: usize,
    fail_after: Option<usize>,
    failed: bool,
    close_fails: bool,
    closed: bool,
    open_cursors: &'a Cell<usize>,
}

impl Iterator for MemoryCursor<'_> {
    type Item = Result<LedgerEntry, InternalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed || self.failed {
            return None;
        }

        if let Some(limit) = self.fail_after
            && self.yielded >= limit
        {
            self.failed = true;
            return Some(Err(InternalError::ledger_unavailable(format!(
                "scan failed after {limit} entries"
            ))));
        }

        let entry = self.entries.next()?;
        self.yielded += 1;

        Some(Ok(entry))
    }
}

impl StateCursor for MemoryCursor<'_> {
    fn close(&mut self) -> Result<(), InternalError> {
        if !self.closed {
            self.closed = true;
            self.open_cursors
                .set(self.open_cursors.get().saturating_sub(1));
        }

        if self.close_fails {
            return Err(InternalError::ledger_unavailable("failed to close cursor"));
        }

        Ok(())
    }
}
