//! Module: db::query
//! Responsibility: the three read strategies (key range, owner prefix, due-date filter).
//! Does not own: argument parsing or response encoding.
//! Boundary: every executor runs to completion or fails as a whole; no partial results.

use crate::{
    db::{index::OwnerIndex, mirror::CollectionMirror, store::RecordStore},
    error::InternalError,
    ledger::{Ledger, ScanGuard},
    model::{DueDated, Record},
    obs::sink::{ExecKind, Span},
    types::Date,
};
use serde::{Deserialize, Serialize};
use serde_json::value::{RawValue, to_raw_value};

/// Lower bound substituted for an empty range start. Keeps composite index
/// keys, which begin with U+0000, out of plain range scans.
pub const MIN_UNICODE_RUNE: &str = "\u{1}";

///
/// RangeRow
///
/// One `{"Key", "Record"}` element of a range result. A JSON value is
/// carried verbatim; anything else becomes a (lossy) UTF-8 string.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RangeRow {
    #[serde(rename = "Key")]
    pub key: String,

    #[serde(rename = "Record")]
    pub record: Box<RawValue>,
}

impl RangeRow {
    fn from_entry(key: String, value: &[u8]) -> Result<Self, InternalError> {
        let record = match serde_json::from_slice::<Box<RawValue>>(value) {
            Ok(raw) => raw,
            Err(_) => to_raw_value(&String::from_utf8_lossy(value)).map_err(|err| {
                InternalError::query_invariant(format!("range value for '{key}': {err}"))
            })?,
        };

        Ok(Self { key, record })
    }

    /// Record text exactly as emitted.
    #[must_use]
    pub fn record_json(&self) -> &str {
        self.record.get()
    }
}

///
/// RANGE
///

/// Every entry with `start <= key < end`, ascending. An empty `end` is
/// unbounded above.
pub fn range_rows<L: Ledger>(
    ledger: &L,
    start: &str,
    end: &str,
) -> Result<Vec<RangeRow>, InternalError> {
    let mut span = Span::new(ExecKind::RangeScan);
    let start = if start.is_empty() {
        MIN_UNICODE_RUNE
    } else {
        start
    };

    let mut rows = Vec::new();
    for entry in ScanGuard::new(ledger.state_by_range(start, end)?) {
        let entry = entry?;
        span.add_scanned(1);
        rows.push(RangeRow::from_entry(entry.key, &entry.value)?);
    }

    span.set_returned(rows.len() as u64);
    tracing::debug!(start, end, rows = rows.len(), "range scan complete");

    Ok(rows)
}

///
/// OWNER
///

/// Record ids indexed under `owner_id`, in ascending key order.
pub fn owner_record_ids<L: Ledger>(
    ledger: &L,
    index: &OwnerIndex,
    owner_id: &str,
) -> Result<Vec<String>, InternalError> {
    let mut span = Span::new(ExecKind::OwnerScan);
    let mut scan = index.lookup_by_owner(ledger, owner_id)?;

    let mut ids = Vec::new();
    for id in scan.by_ref() {
        ids.push(id?);
    }
    span.add_scanned(scan.scanned());
    scan.finish()?;

    span.set_returned(ids.len() as u64);

    Ok(ids)
}

/// Records of type `R` owned by `owner_id`, fetched by a point read per index
/// entry. Entries whose id has no `R` record (another type sharing the index)
/// are skipped.
pub fn owner_records<L, R>(
    ledger: &L,
    index: &OwnerIndex,
    owner_id: &str,
) -> Result<Vec<R>, InternalError>
where
    L: Ledger,
    R: Record,
{
    let ids = owner_record_ids(ledger, index, owner_id)?;

    let mut span = Span::new(ExecKind::PointRead);
    let mut records = Vec::with_capacity(ids.len());
    for id in &ids {
        span.add_scanned(1);
        if let Some(record) = RecordStore::get::<L, R>(ledger, id)? {
            records.push(record);
        }
    }
    span.set_returned(records.len() as u64);

    Ok(records)
}

///
/// DUE DATE
///

/// Mirrored records whose due date lies strictly between `from` and `to`,
/// in mirror order.
pub fn due_between<L, R>(
    ledger: &L,
    mirror: &CollectionMirror<R>,
    from: Date,
    to: Date,
) -> Result<Vec<R>, InternalError>
where
    L: Ledger,
    R: DueDated,
{
    let mut span = Span::new(ExecKind::MirrorScan);
    let records = mirror.all(ledger)?;
    span.add_scanned(records.len() as u64);

    let matched = retain_strictly_between(records, from, to);
    span.set_returned(matched.len() as u64);

    Ok(matched)
}

/// Keep records whose due date parses and lies strictly inside `(from, to)`.
/// Unparseable due dates never match.
#[must_use]
pub fn retain_strictly_between<R: DueDated>(records: Vec<R>, from: Date, to: Date) -> Vec<R> {
    records
        .into_iter()
        .filter(|record| {
            Date::try_parse(record.due_date()).is_some_and(|due| due.is_strictly_between(from, to))
        })
        .collect()
}

///
/// TESTS
///

#[cfg(test)]
mod tests;
