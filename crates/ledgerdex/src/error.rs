use ledgerdex_core::{
    error::{ErrorClass, ErrorOrigin, InternalError},
    model::RecordArgsError,
    serialize::SerializeError,
    types::{AmountError, DateParseError},
};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable class + origin taxonomy.
///
/// Only `message` crosses the operation boundary; class and origin are kept
/// for logging and tests.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct Error {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::NotFound, ErrorOrigin::Contract, message)
    }

    pub(crate) fn corruption(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Corruption, ErrorOrigin::Contract, message)
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        Self::new(err.class, err.origin, err.message)
    }
}

impl From<ArgumentError> for Error {
    fn from(err: ArgumentError) -> Self {
        Self::new(ErrorClass::MalformedInput, ErrorOrigin::Contract, err.to_string())
    }
}

impl From<AmountError> for Error {
    fn from(err: AmountError) -> Self {
        InternalError::from(err).into()
    }
}

impl From<DateParseError> for Error {
    fn from(err: DateParseError) -> Self {
        InternalError::from(err).into()
    }
}

impl From<RecordArgsError> for Error {
    fn from(err: RecordArgsError) -> Self {
        InternalError::from(err).into()
    }
}

impl From<SerializeError> for Error {
    fn from(err: SerializeError) -> Self {
        InternalError::from(err).into()
    }
}

///
/// ArgumentError
/// (input boundary)
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum ArgumentError {
    #[error("Incorrect number of arguments. Expecting {expected}")]
    Count { expected: &'static str },

    #[error("Expecting integer value for asset holding")]
    Holding { input: String },

    #[error("Invalid transaction amount, expecting a integer value")]
    Transfer { input: String },

    #[error(
        "Unknown action, check the first argument, must be one of {accepted}. But got: {function}"
    )]
    UnknownFunction { function: String, accepted: String },
}

///
/// TESTS
///
