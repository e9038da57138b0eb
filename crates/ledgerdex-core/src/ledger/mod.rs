//! Module: ledger
//! Responsibility: the ordered key-value contract consumed by this layer.
//! Does not own: durability, ordering between transactions, conflict detection.
//! Boundary: every read, write and scan in `db` goes through [`Ledger`].

mod memory;

pub use memory::{MemoryCursor, MemoryLedger};

use crate::error::InternalError;

///
/// LedgerEntry
///
/// One key/value pair produced by a range or prefix scan.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerEntry {
    pub key: String,
    pub value: Vec<u8>,
}

impl LedgerEntry {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

///
/// StateCursor
///
/// Host-side iteration resource. Yields entries in ascending key order and
/// must be closed on every exit path; wrap it in a [`ScanGuard`].
///

pub trait StateCursor: Iterator<Item = Result<LedgerEntry, InternalError>> {
    fn close(&mut self) -> Result<(), InternalError>;
}

///
/// Ledger
///
/// The externally supplied ordered store. Absent keys are `Ok(None)`, never
/// errors. Range scans are start-inclusive and end-exclusive; an empty end
/// key leaves the range unbounded above.
///

pub trait Ledger {
    type Cursor<'a>: StateCursor
    where
        Self: 'a;

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, InternalError>;

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), InternalError>;

    /// Removes a key; a no-op if it is absent.
    fn del_state(&mut self, key: &str) -> Result<(), InternalError>;

    fn state_by_range(&self, start: &str, end: &str) -> Result<Self::Cursor<'_>, InternalError>;

    /// Scan every key sharing `prefix`, in ascending order.
    fn state_by_prefix(&self, prefix: &str) -> Result<Self::Cursor<'_>, InternalError>;
}

///
/// ScanGuard
///
/// Scoped owner of an open cursor. The cursor is closed when the scan is
/// exhausted, when [`ScanGuard::finish`] is called, or on drop, whichever
/// comes first. A close failure surfaces as a final `Err` item when the scan
/// is exhausted or from `finish`; on drop it can only be logged.
///

pub struct ScanGuard<C: StateCursor> {
    cursor: C,
    closed: bool,
}

impl<C: StateCursor> ScanGuard<C> {
    #[must_use]
    pub const fn new(cursor: C) -> Self {
        Self {
            cursor,
            closed: false,
        }
    }

    /// Close the cursor now, reporting any close failure.
    pub fn finish(mut self) -> Result<(), InternalError> {
        self.close_once()
    }

    fn close_once(&mut self) -> Result<(), InternalError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        self.cursor.close()
    }
}

impl<C: StateCursor> Iterator for ScanGuard<C> {
    type Item = Result<LedgerEntry, InternalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed {
            return None;
        }

        match self.cursor.next() {
            Some(item) => Some(item),
            None => self.close_once().err().map(Err),
        }
    }
}

impl<C: StateCursor> Drop for ScanGuard<C> {
    fn drop(&mut self) {
        if let Err(err) = self.close_once() {
            tracing::warn!(error = %err, "failed to close ledger cursor");
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests;
