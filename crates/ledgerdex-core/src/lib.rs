//! Core indexing and query layer for ledgerdex: the ledger contract, the
//! composite-key codec, typed record storage, the owner index, the
//! collection mirrors, and the query executors built on top of them.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod db;
pub mod error;
pub mod ledger;
pub mod model;
pub mod obs;
pub mod serialize;
pub mod types;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Index name of the owner index, keyed by `(owner id, record id)`.
pub const OWNER_INDEX: &str = "userid~id";

/// Value stored under every composite index key.
/// Only the key's existence carries information.
pub const INDEX_SENTINEL: &[u8] = &[0x00];

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
///

pub mod prelude {
    pub use crate::{
        db::Db,
        ledger::{Ledger, MemoryLedger},
        model::{Bill, DueDated, Payment, Record},
        types::{Clock, Date},
    };
}
