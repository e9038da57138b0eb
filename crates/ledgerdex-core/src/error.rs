use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable classification.
/// Every failure in this layer aborts the enclosing operation; the message is
/// reported verbatim to the caller.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `origin`.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    /// Construct an InternalError with optional origin-specific detail.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        let message = message.into();

        let detail = match (class, origin) {
            (ErrorClass::Unavailable, ErrorOrigin::Ledger) => {
                Some(ErrorDetail::Ledger(LedgerFailure::Unavailable {
                    message: message.clone(),
                }))
            }
            (ErrorClass::Corruption, ErrorOrigin::Ledger | ErrorOrigin::Store) => {
                Some(ErrorDetail::Ledger(LedgerFailure::Corrupt {
                    message: message.clone(),
                }))
            }
            _ => None,
        };

        Self {
            class,
            origin,
            message,
            detail,
        }
    }

    /// Construct a malformed-input error for a specific origin.
    pub fn malformed(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::MalformedInput, origin, message)
    }

    /// Construct a ledger-origin unavailable error.
    pub fn ledger_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Unavailable, ErrorOrigin::Ledger, message)
    }

    /// Construct a corruption error for a specific origin.
    pub(crate) fn corruption(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Corruption, origin, message)
    }

    /// Construct a store-origin corruption error.
    pub(crate) fn store_corruption(message: impl Into<String>) -> Self {
        Self::corruption(ErrorOrigin::Store, message)
    }

    /// Construct a mirror-origin corruption error.
    pub(crate) fn mirror_corruption(message: impl Into<String>) -> Self {
        Self::corruption(ErrorOrigin::Mirror, message)
    }

    /// Construct a query-origin invariant violation.
    pub(crate) fn query_invariant(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvariantViolation, ErrorOrigin::Query, message)
    }

    /// Construct a standardized not-found error for a key that must exist.
    pub fn not_found(origin: ErrorOrigin, key: impl Into<String>) -> Self {
        let key = key.into();

        Self {
            class: ErrorClass::NotFound,
            origin,
            message: format!("key not found: {key}"),
            detail: Some(ErrorDetail::Ledger(LedgerFailure::NotFound { key })),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.class, ErrorClass::NotFound)
    }

    #[must_use]
    pub const fn is_malformed_input(&self) -> bool {
        matches!(self.class, ErrorClass::MalformedInput)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`InternalError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Ledger(LedgerFailure),
}

///
/// LedgerFailure
///
/// Ledger-specific structured error detail.
/// Never returned directly; always wrapped in [`ErrorDetail::Ledger`].
///

#[derive(Debug, ThisError)]
pub enum LedgerFailure {
    #[error("key not found: {key}")]
    NotFound { key: String },

    #[error("ledger unavailable: {message}")]
    Unavailable { message: String },

    #[error("ledger corruption: {message}")]
    Corrupt { message: String },
}

///
/// ErrorClass
/// Error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    MalformedInput,
    NotFound,
    Unavailable,
    Corruption,
    InvariantViolation,
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MalformedInput => "malformed_input",
            Self::NotFound => "not_found",
            Self::Unavailable => "unavailable",
            Self::Corruption => "corruption",
            Self::InvariantViolation => "invariant_violation",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Ledger,
    Key,
    Store,
    Index,
    Mirror,
    Query,
    Serialize,
    Contract,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ledger => "ledger",
            Self::Key => "key",
            Self::Store => "store",
            Self::Index => "index",
            Self::Mirror => "mirror",
            Self::Query => "query",
            Self::Serialize => "serialize",
            Self::Contract => "contract",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
