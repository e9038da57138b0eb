pub mod index;
pub mod key;
pub mod mirror;
pub mod query;
pub mod store;

use crate::{
    db::{
        index::{IndexEntry, OwnerIndex},
        key::KeyCodec,
        mirror::{CollectionMirror, MirrorPolicy},
        query::RangeRow,
        store::RecordStore,
    },
    error::InternalError,
    ledger::Ledger,
    model::{DueDated, Record},
    obs::sink::{ExecKind, Span},
    types::Date,
};

///
/// Db
///
/// Owns a ledger and keeps three projections of every saved record: the
/// primary record, one owner index entry, and (optionally) one mirror entry.
///
/// The three writes are independent ledger puts with no shared transaction
/// boundary at this layer. If a later write fails the earlier ones stay in
/// place; nothing is rolled back.
///

#[derive(Debug)]
pub struct Db<L: Ledger> {
    ledger: L,
    index: OwnerIndex,
    mirror_policy: MirrorPolicy,
}

impl<L: Ledger> Db<L> {
    #[must_use]
    pub fn new(ledger: L) -> Self {
        Self {
            ledger,
            index: OwnerIndex::new(KeyCodec::STANDARD),
            mirror_policy: MirrorPolicy::default(),
        }
    }

    #[must_use]
    pub const fn with_mirror_policy(mut self, policy: MirrorPolicy) -> Self {
        self.mirror_policy = policy;
        self
    }

    #[must_use]
    pub const fn mirror_policy(&self) -> MirrorPolicy {
        self.mirror_policy
    }

    #[must_use]
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    pub const fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    #[must_use]
    pub fn into_inner(self) -> L {
        self.ledger
    }

    /// Mirror handle for `R` under this database's policy.
    #[must_use]
    pub const fn mirror<R: Record>(&self) -> CollectionMirror<R> {
        CollectionMirror::new(self.mirror_policy)
    }

    //
    // Writes
    //

    /// Write the record, its owner index entry, and its mirror entry, in
    /// that order. Returns the mirror length after the append.
    ///
    /// Failures that need no write (a reserved character in an id, a missing
    /// mirror under `RequireInit`) are reported before anything is written.
    pub fn save<R: Record>(&mut self, record: &R) -> Result<usize, InternalError> {
        let _span = Span::new(ExecKind::Write);

        let entry = self.index.entry_key(record.owner_id(), record.id())?;
        let mirror = self.mirror::<R>();
        mirror.ensure_ready(&self.ledger)?;

        self.write_projections(record, &entry)?;
        mirror.append(&mut self.ledger, record)
    }

    /// Write the record and its owner index entry only.
    pub fn save_without_mirror<R: Record>(&mut self, record: &R) -> Result<(), InternalError> {
        let _span = Span::new(ExecKind::Write);

        let entry = self.index.entry_key(record.owner_id(), record.id())?;
        self.write_projections(record, &entry)
    }

    /// Overwrite the mirror for `R` with an empty sequence.
    pub fn reset_mirror<R: Record>(&mut self) -> Result<(), InternalError> {
        self.mirror::<R>().reset(&mut self.ledger)
    }

    fn write_projections<R: Record>(
        &mut self,
        record: &R,
        entry: &IndexEntry,
    ) -> Result<(), InternalError> {
        RecordStore::put(&mut self.ledger, record)?;
        OwnerIndex::insert(&mut self.ledger, R::PATH, entry)
    }

    //
    // Reads
    //

    /// Decoded record with `id`, or `None`.
    pub fn load<R: Record>(&self, id: &str) -> Result<Option<R>, InternalError> {
        let mut span = Span::new(ExecKind::PointRead);
        span.add_scanned(1);

        let record = RecordStore::get::<L, R>(&self.ledger, id)?;
        span.set_returned(u64::from(record.is_some()));

        Ok(record)
    }

    /// Stored bytes of the record with `id`, or `None`.
    pub fn load_raw<R: Record>(&self, id: &str) -> Result<Option<Vec<u8>>, InternalError> {
        let mut span = Span::new(ExecKind::PointRead);
        span.add_scanned(1);

        let bytes = RecordStore::get_raw(&self.ledger, R::TYPE_PREFIX, id)?;
        span.set_returned(u64::from(bytes.is_some()));

        Ok(bytes)
    }

    /// Every entry with `start <= key < end`.
    pub fn range(&self, start: &str, end: &str) -> Result<Vec<RangeRow>, InternalError> {
        query::range_rows(&self.ledger, start, end)
    }

    /// Record ids of every type indexed under `owner_id`.
    pub fn owner_record_ids(&self, owner_id: &str) -> Result<Vec<String>, InternalError> {
        query::owner_record_ids(&self.ledger, &self.index, owner_id)
    }

    /// Materialized `R` records owned by `owner_id`.
    pub fn owner_records<R: Record>(&self, owner_id: &str) -> Result<Vec<R>, InternalError> {
        query::owner_records(&self.ledger, &self.index, owner_id)
    }

    /// Mirrored `R` records due strictly between `from` and `to`.
    pub fn due_between<R: DueDated>(&self, from: Date, to: Date) -> Result<Vec<R>, InternalError> {
        query::due_between(&self.ledger, &self.mirror::<R>(), from, to)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests;
