//! Strict field parsers for the string-typed record fields, plus the
//! server-side clock that stamps new records.

mod amount;
mod date;
mod timestamp;

pub use amount::{Amount, AmountError};
pub use date::{Date, DateParseError};
pub use timestamp::{Clock, FixedClock, SystemClock, Timestamp};
