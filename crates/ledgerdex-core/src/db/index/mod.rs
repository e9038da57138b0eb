//! Module: db::index
//! Responsibility: the owner index, one `(owner id, record id)` entry per record.
//! Does not own: key framing (see `db::key`) or record materialization.
//! Boundary: records are never de-indexed; there is no remove path.

use crate::{
    INDEX_SENTINEL, OWNER_INDEX,
    db::key::KeyCodec,
    error::InternalError,
    ledger::{Ledger, ScanGuard, StateCursor},
    obs::sink::{self, MetricsEvent},
};

///
/// OwnerIndex
///
/// Bills and payments share one index, so an owner's entries mix both record
/// types; the index entry does not say which type a record id belongs to.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct OwnerIndex {
    codec: KeyCodec,
}

impl OwnerIndex {
    #[must_use]
    pub const fn new(codec: KeyCodec) -> Self {
        Self { codec }
    }

    /// Encode the entry key for `(owner_id, record_id)` without touching the
    /// ledger. Reserved characters in either id fail here.
    pub fn entry_key(&self, owner_id: &str, record_id: &str) -> Result<IndexEntry, InternalError> {
        let key = self.codec.encode(OWNER_INDEX, &[owner_id, record_id])?;

        Ok(IndexEntry {
            key,
            owner_id: owner_id.to_string(),
            record_id: record_id.to_string(),
        })
    }

    /// Write the sentinel entry for `(owner_id, record_id)`.
    pub fn index_record<L: Ledger>(
        &self,
        ledger: &mut L,
        path: &'static str,
        owner_id: &str,
        record_id: &str,
    ) -> Result<(), InternalError> {
        let entry = self.entry_key(owner_id, record_id)?;

        Self::insert(ledger, path, &entry)
    }

    /// Write a pre-encoded entry.
    pub fn insert<L: Ledger>(
        ledger: &mut L,
        path: &'static str,
        entry: &IndexEntry,
    ) -> Result<(), InternalError> {
        ledger.put_state(&entry.key, INDEX_SENTINEL)?;

        tracing::debug!(
            record = path,
            owner_id = entry.owner_id.as_str(),
            record_id = entry.record_id.as_str(),
            "owner index entry written"
        );
        sink::record(MetricsEvent::IndexInserted { path });

        Ok(())
    }

    /// Lazily scan the record ids indexed under `owner_id`, in ascending key
    /// order. The scan reflects ledger state when it starts.
    pub fn lookup_by_owner<'a, L: Ledger>(
        &self,
        ledger: &'a L,
        owner_id: &str,
    ) -> Result<OwnerScan<L::Cursor<'a>>, InternalError> {
        let prefix = self.codec.encode_partial(OWNER_INDEX, &[owner_id])?;
        let cursor = ledger.state_by_prefix(&prefix)?;

        Ok(OwnerScan {
            guard: ScanGuard::new(cursor),
            codec: self.codec,
            owner_id: owner_id.to_string(),
            scanned: 0,
        })
    }
}

///
/// IndexEntry
///
/// An encoded owner index key, ready to write.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexEntry {
    pub key: String,
    pub owner_id: String,
    pub record_id: String,
}

///
/// OwnerScan
///
/// Iterator of record ids for one owner. Any scan or decode failure is
/// yielded as an `Err`; callers abort on the first one. The cursor is closed
/// when the scan is exhausted, finished, or dropped.
///

pub struct OwnerScan<C: StateCursor> {
    guard: ScanGuard<C>,
    codec: KeyCodec,
    owner_id: String,
    scanned: u64,
}

impl<C: StateCursor> OwnerScan<C> {
    /// Number of index entries read so far.
    #[must_use]
    pub const fn scanned(&self) -> u64 {
        self.scanned
    }

    /// Close the underlying cursor now.
    pub fn finish(self) -> Result<(), InternalError> {
        self.guard.finish()
    }

    fn decode(&self, key: &str) -> Result<String, InternalError> {
        let decoded = self.codec.decode(key)?;
        let [owner, record_id]: [String; 2] = decoded.components.try_into().map_err(|_| {
            InternalError::query_invariant(format!("owner index key has wrong arity: {key:?}"))
        })?;

        if owner != self.owner_id {
            return Err(InternalError::query_invariant(format!(
                "owner scan for '{}' produced an entry for '{owner}'",
                self.owner_id
            )));
        }

        Ok(record_id)
    }
}

impl<C: StateCursor> Iterator for OwnerScan<C> {
    type Item = Result<String, InternalError>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.guard.next()? {
            Ok(entry) => entry,
            Err(err) => return Some(Err(err)),
        };
        self.scanned += 1;

        Some(self.decode(&entry.key))
    }
}

///
/// TESTS
///
