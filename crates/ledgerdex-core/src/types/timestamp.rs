use std::fmt;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

///
/// Timestamp
///
/// Server-assigned creation instant, rendered as RFC 3339 UTC.
///

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    #[must_use]
    pub const fn from_datetime(at: OffsetDateTime) -> Self {
        Self(at)
    }

    /// Construct from whole seconds since the Unix epoch.
    #[must_use]
    pub fn from_unix(secs: i64) -> Option<Self> {
        OffsetDateTime::from_unix_timestamp(secs).ok().map(Self)
    }

    #[must_use]
    pub const fn unix_secs(self) -> i64 {
        self.0.unix_timestamp()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // RFC 3339 cannot express years outside 0000..=9999.
        match self.0.format(&Rfc3339) {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{}", self.0.unix_timestamp()),
        }
    }
}

///
/// Clock
///
/// Source of creation timestamps for new records.
///

pub trait Clock {
    fn now(&self) -> Timestamp;
}

///
/// SystemClock
///

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp(OffsetDateTime::now_utc())
    }
}

///
/// FixedClock
///
/// Always returns the same instant.
///

#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub Timestamp);

impl FixedClock {
    #[must_use]
    pub fn from_unix(secs: i64) -> Self {
        Self(Timestamp::from_unix(secs).unwrap_or(Timestamp(OffsetDateTime::UNIX_EPOCH)))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

///
/// TESTS
///
