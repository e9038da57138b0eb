use crate::error::{ErrorOrigin, InternalError};
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// AmountError
///

#[derive(Debug, ThisError)]
pub enum AmountError {
    #[error("invalid amount '{input}': expecting an integer value")]
    Invalid { input: String },

    #[error("amount overflow: {left} {op} {right}")]
    Overflow {
        left: i64,
        op: &'static str,
        right: i64,
    },
}

impl From<AmountError> for InternalError {
    fn from(err: AmountError) -> Self {
        Self::malformed(ErrorOrigin::Contract, err.to_string())
    }
}

///
/// Amount
///
/// Signed integer holding used by the balance-transfer entities.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Amount(i64);

impl Amount {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    pub fn parse(s: &str) -> Result<Self, AmountError> {
        s.parse::<i64>().map(Self).map_err(|_| AmountError::Invalid {
            input: s.to_string(),
        })
    }

    pub fn checked_add(self, other: Self) -> Result<Self, AmountError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(AmountError::Overflow {
                left: self.0,
                op: "+",
                right: other.0,
            })
    }

    pub fn checked_sub(self, other: Self) -> Result<Self, AmountError> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(AmountError::Overflow {
                left: self.0,
                op: "-",
                right: other.0,
            })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

///
/// TESTS
///
