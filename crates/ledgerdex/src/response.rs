use crate::error::Error;

///
/// Response
///
/// Outcome of one operation: raw success bytes (usually JSON, possibly
/// empty) or a failure message. There are no structured error codes.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Response {
    Success(Vec<u8>),
    Error(String),
}

impl Response {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Self::Success(bytes) => Some(bytes),
            Self::Error(_) => None,
        }
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Error(message) => Some(message),
        }
    }
}

impl From<Result<Vec<u8>, Error>> for Response {
    fn from(result: Result<Vec<u8>, Error>) -> Self {
        match result {
            Ok(bytes) => Self::Success(bytes),
            Err(err) => Self::Error(err.message),
        }
    }
}

///
/// TESTS
///
