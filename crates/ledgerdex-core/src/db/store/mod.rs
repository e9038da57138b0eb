//! Module: db::store
//! Responsibility: typed point reads and writes of primary records.
//! Does not own: index maintenance or the collection mirror.
//! Boundary: primary records live under `TYPE_PREFIX + id`.

use crate::{
    error::InternalError,
    ledger::Ledger,
    model::Record,
    obs::sink::{self, MetricsEvent},
    serialize::{deserialize, serialize},
};

///
/// RecordStore
///
/// One ledger write per `put`, with no read-modify-write: a second put of the
/// same id silently replaces the first (last write wins).
///

#[derive(Clone, Copy, Debug, Default)]
pub struct RecordStore;

impl RecordStore {
    /// Serialize `record` and write it under its primary key.
    pub fn put<L, R>(ledger: &mut L, record: &R) -> Result<(), InternalError>
    where
        L: Ledger,
        R: Record,
    {
        let key = R::primary_key(record.id());
        let bytes = serialize(record)?;
        ledger.put_state(&key, &bytes)?;

        tracing::debug!(record = R::PATH, %key, "record written");
        sink::record(MetricsEvent::RecordWritten { path: R::PATH });

        Ok(())
    }

    /// Read the raw payload stored under `type_prefix + id`.
    pub fn get_raw<L: Ledger>(
        ledger: &L,
        type_prefix: &str,
        id: &str,
    ) -> Result<Option<Vec<u8>>, InternalError> {
        ledger.get_state(&format!("{type_prefix}{id}"))
    }

    /// Read and decode the record with `id`; absent is `Ok(None)`.
    pub fn get<L, R>(ledger: &L, id: &str) -> Result<Option<R>, InternalError>
    where
        L: Ledger,
        R: Record,
    {
        let Some(bytes) = Self::get_raw(ledger, R::TYPE_PREFIX, id)? else {
            return Ok(None);
        };

        deserialize(&bytes).map(Some).map_err(|err| {
            InternalError::store_corruption(format!(
                "{} record '{id}' failed to decode: {err}",
                R::PATH
            ))
        })
    }
}

///
/// TESTS
///
