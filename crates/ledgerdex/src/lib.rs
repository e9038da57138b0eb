//! ## Crate layout
//! - `core`: the indexing and query layer (ledger contract, key codec, record
//!   store, owner index, collection mirrors, query executors).
//! - `contract`: the named-operation surface returning [`Response`]s.
//! - `config`: TOML configuration.
//! - `logging`: `tracing` subscriber setup.
//!
//! The `prelude` module covers what a host needs to drive a contract.

pub use ledgerdex_core as core;

pub mod config;
pub mod contract;
pub mod error;
pub mod logging;
pub mod response;

pub use contract::{Contract, Function};
pub use error::Error;
pub use response::Response;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        config::ContractConfig,
        contract::{Contract, Function},
        core::{
            ledger::{Ledger, MemoryLedger},
            model::{Bill, Payment},
            types::{Clock, FixedClock, SystemClock},
        },
        response::Response,
    };
}
