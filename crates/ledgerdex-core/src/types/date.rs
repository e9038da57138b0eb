use crate::error::{ErrorOrigin, InternalError};
use std::{
    fmt::{self, Debug, Display},
    str::FromStr,
};
use thiserror::Error as ThisError;
use time::{Date as TimeDate, format_description::BorrowedFormatItem, macros::format_description};

const FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

///
/// DateParseError
///

#[derive(Debug, ThisError)]
#[error("invalid date '{input}': expected YYYY-MM-DD")]
pub struct DateParseError {
    pub input: String,
}

impl From<DateParseError> for InternalError {
    fn from(err: DateParseError) -> Self {
        Self::malformed(ErrorOrigin::Query, err.to_string())
    }
}

///
/// Date
///
/// Calendar date parsed strictly from `YYYY-MM-DD`. Month and day must be
/// zero-padded and the date must exist.
///

#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date(TimeDate);

impl Date {
    pub fn new_checked(y: i32, m: u8, d: u8) -> Option<Self> {
        let month = time::Month::try_from(m).ok()?;
        TimeDate::from_calendar_date(y, month, d).ok().map(Self)
    }

    /// Parse an ISO `YYYY-MM-DD` string into a `Date`.
    pub fn parse(s: &str) -> Result<Self, DateParseError> {
        let err = || DateParseError {
            input: s.to_string(),
        };

        // `[year]` tolerates a leading sign; the layout is digits only.
        if !s.as_bytes().first().is_some_and(u8::is_ascii_digit) {
            return Err(err());
        }

        TimeDate::parse(s, FORMAT).map(Self).map_err(|_| err())
    }

    /// Parse, discarding the reason on failure.
    #[must_use]
    pub fn try_parse(s: &str) -> Option<Self> {
        Self::parse(s).ok()
    }

    /// True when `self` lies strictly between `from` and `to`.
    #[must_use]
    pub fn is_strictly_between(self, from: Self, to: Self) -> bool {
        self > from && self < to
    }

    #[must_use]
    pub const fn year(self) -> i32 {
        self.0.year()
    }

    #[must_use]
    pub fn month(self) -> u8 {
        self.0.month().into()
    }

    #[must_use]
    pub const fn day(self) -> u8 {
        self.0.day()
    }
}

impl Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Date({self})")
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for Date {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_iso_dates() {
        let date = Date::parse("2016-06-15").unwrap();

        assert_eq!((date.year(), date.month(), date.day()), (2016, 6, 15));
        assert_eq!(date.to_string(), "2016-06-15");
    }

    #[test]
    fn rejects_non_padded_and_impossible_dates() {
        for input in ["2016-6-15", "2016-02-30", "15/06/2016", "", "2016-06-15T00:00"] {
            assert!(Date::parse(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn rejects_signed_years() {
        for input in ["+2016-06-15", "-2016-06-15", " 2016-06-15"] {
            assert!(Date::parse(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn strictly_between_excludes_both_bounds() {
        let from = Date::parse("2016-01-01").unwrap();
        let to = Date::parse("2017-01-01").unwrap();

        assert!(!from.is_strictly_between(from, to));
        assert!(!to.is_strictly_between(from, to));
        assert!(
            Date::parse("2016-06-15")
                .unwrap()
                .is_strictly_between(from, to)
        );
    }

    #[test]
    fn parse_error_maps_to_malformed_input() {
        let err = InternalError::from(Date::parse("soon").unwrap_err());

        assert!(err.is_malformed_input());
        assert!(err.message.contains("'soon'"));
    }

    proptest! {
        #[test]
        fn display_parse_roundtrip(y in 1i32..=9999, m in 1u8..=12, d in 1u8..=28) {
            let date = Date::new_checked(y, m, d).unwrap();
            prop_assert_eq!(Date::parse(&date.to_string()).unwrap(), date);
        }

        #[test]
        fn ordering_matches_text_ordering(
            a in (1i32..=9999, 1u8..=12, 1u8..=28),
            b in (1i32..=9999, 1u8..=12, 1u8..=28),
        ) {
            let left = Date::new_checked(a.0, a.1, a.2).unwrap();
            let right = Date::new_checked(b.0, b.1, b.2).unwrap();
            prop_assert_eq!(left.cmp(&right), left.to_string().cmp(&right.to_string()));
        }
    }
}
