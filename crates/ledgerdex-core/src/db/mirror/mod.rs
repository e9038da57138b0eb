//! Module: db::mirror
//! Responsibility: the per-type collection mirror, one JSON array under a fixed key.
//! Does not own: predicate evaluation (see `db::query`).
//! Boundary: the mirror is append-only; nothing in this layer removes entries.
//!
//! `append` is a read-modify-write of the whole blob with no compare-and-swap.
//! Two appenders that read the same base sequence each write back a sequence
//! missing the other's element; the host's transaction validation is the
//! only guard against that lost update.

use crate::{
    error::{ErrorOrigin, InternalError},
    ledger::Ledger,
    model::Record,
    obs::sink::{self, MetricsEvent},
    serialize::{deserialize, serialize},
};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

///
/// MirrorPolicy
///
/// How a mirror treats a missing blob.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MirrorPolicy {
    /// A missing blob reads as an empty sequence.
    #[default]
    Lenient,

    /// A missing blob is a not-found error; `reset` must run first.
    RequireInit,
}

///
/// CollectionMirror
///

#[derive(Clone, Copy, Debug)]
pub struct CollectionMirror<R: Record> {
    policy: MirrorPolicy,
    _marker: PhantomData<R>,
}

impl<R: Record> Default for CollectionMirror<R> {
    fn default() -> Self {
        Self::new(MirrorPolicy::default())
    }
}

impl<R: Record> CollectionMirror<R> {
    #[must_use]
    pub const fn new(policy: MirrorPolicy) -> Self {
        Self {
            policy,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn policy(&self) -> MirrorPolicy {
        self.policy
    }

    /// Overwrite the blob with an empty sequence.
    pub fn reset<L: Ledger>(&self, ledger: &mut L) -> Result<(), InternalError> {
        let bytes = serialize::<[R]>(&[])?;
        ledger.put_state(R::MIRROR_KEY, &bytes)?;

        tracing::debug!(record = R::PATH, key = R::MIRROR_KEY, "mirror reset");
        sink::record(MetricsEvent::MirrorReset { path: R::PATH });

        Ok(())
    }

    /// Append `record` and rewrite the blob. Returns the new length.
    pub fn append<L: Ledger>(&self, ledger: &mut L, record: &R) -> Result<usize, InternalError> {
        let mut records = self.read(ledger)?;
        records.push(record.clone());

        let bytes = serialize(&records)?;
        ledger.put_state(R::MIRROR_KEY, &bytes)?;

        let len = records.len();
        tracing::debug!(record = R::PATH, id = record.id(), len, "mirror appended");
        sink::record(MetricsEvent::MirrorAppended {
            path: R::PATH,
            len: len as u64,
        });

        Ok(len)
    }

    /// Under `RequireInit`, fail with not-found unless the blob exists.
    /// Always succeeds under `Lenient`.
    pub fn ensure_ready<L: Ledger>(&self, ledger: &L) -> Result<(), InternalError> {
        match self.policy {
            MirrorPolicy::Lenient => Ok(()),
            MirrorPolicy::RequireInit => match ledger.get_state(R::MIRROR_KEY)? {
                Some(_) => Ok(()),
                None => Err(InternalError::not_found(ErrorOrigin::Mirror, R::MIRROR_KEY)),
            },
        }
    }

    /// Every mirrored record, in insertion order.
    pub fn all<L: Ledger>(&self, ledger: &L) -> Result<Vec<R>, InternalError> {
        self.read(ledger)
    }

    pub fn len<L: Ledger>(&self, ledger: &L) -> Result<usize, InternalError> {
        self.read(ledger).map(|records| records.len())
    }

    fn read<L: Ledger>(&self, ledger: &L) -> Result<Vec<R>, InternalError> {
        let Some(bytes) = ledger.get_state(R::MIRROR_KEY)? else {
            return match self.policy {
                MirrorPolicy::Lenient => Ok(Vec::new()),
                MirrorPolicy::RequireInit => {
                    Err(InternalError::not_found(ErrorOrigin::Mirror, R::MIRROR_KEY))
                }
            };
        };

        // A JSON `null` blob is accepted as empty.
        deserialize::<Option<Vec<R>>>(&bytes)
            .map(Option::unwrap_or_default)
            .map_err(|err| {
                InternalError::mirror_corruption(format!(
                    "mirror '{}' failed to decode: {err}",
                    R::MIRROR_KEY
                ))
            })
    }
}

///
/// TESTS
///
