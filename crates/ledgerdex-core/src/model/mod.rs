//! Record model: the typed financial records persisted by this layer and the
//! per-type metadata (key prefix, mirror key, argument layout).

mod bill;
mod payment;

pub use bill::Bill;
pub use payment::Payment;

use crate::{
    error::{ErrorOrigin, InternalError},
    types::Timestamp,
};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error as ThisError;

///
/// RecordArgsError
///

#[derive(Debug, ThisError)]
pub enum RecordArgsError {
    #[error("Incorrect number of arguments. Expecting {expected}")]
    Arity { expected: usize, found: usize },
}

impl From<RecordArgsError> for InternalError {
    fn from(err: RecordArgsError) -> Self {
        Self::malformed(ErrorOrigin::Contract, err.to_string())
    }
}

///
/// Record
///
/// A record type stored under `TYPE_PREFIX + id`, indexed by owner and
/// mirrored under `MIRROR_KEY`. All fields are strings; nothing is parsed at
/// write time.
///

pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Primary-key prefix, e.g. `BILL`.
    const TYPE_PREFIX: &'static str;

    /// Fixed key holding the collection mirror for this type.
    const MIRROR_KEY: &'static str;

    /// Short name used in logs and metrics.
    const PATH: &'static str;

    /// Number of caller-supplied arguments in a create call.
    const ARITY: usize;

    fn id(&self) -> &str;

    fn owner_id(&self) -> &str;

    fn timestamp(&self) -> &str;

    /// Build a record from ordered create arguments.
    fn from_args<S: AsRef<str>>(args: &[S], created: Timestamp) -> Result<Self, RecordArgsError>;

    /// Full primary key of a record id.
    fn primary_key(id: &str) -> String {
        format!("{}{id}", Self::TYPE_PREFIX)
    }
}

///
/// DueDated
///
/// Records that carry a due date, filterable through the collection mirror.
///

pub trait DueDated: Record {
    /// Raw due-date field, expected as `YYYY-MM-DD` but never validated on write.
    fn due_date(&self) -> &str;
}

// Check arity and borrow the arguments as `&str`.
fn expect_args<S: AsRef<str>>(args: &[S], expected: usize) -> Result<Vec<&str>, RecordArgsError> {
    if args.len() != expected {
        return Err(RecordArgsError::Arity {
            expected,
            found: args.len(),
        });
    }

    Ok(args.iter().map(AsRef::as_ref).collect())
}

///
/// TESTS
///
