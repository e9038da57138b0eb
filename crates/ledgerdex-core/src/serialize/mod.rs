mod json;

use crate::error::{ErrorClass, ErrorOrigin, InternalError};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error as ThisError;

/// Record payload serialization.
///
/// Record payloads, mirror blobs and query responses are JSON. This module is
/// format-level only; key layout and mirror policy live in `db`.

///
/// SerializeError
///

#[derive(Debug, ThisError)]
pub enum SerializeError {
    #[error("serialize error: {0}")]
    Serialize(String),

    #[error("deserialize error: {0}")]
    Deserialize(String),
}

impl SerializeError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::Serialize(_) => ErrorClass::Internal,
            Self::Deserialize(_) => ErrorClass::Corruption,
        }
    }
}

impl From<SerializeError> for InternalError {
    fn from(err: SerializeError) -> Self {
        Self::new(err.class(), ErrorOrigin::Serialize, err.to_string())
    }
}

/// Serialize a value into JSON bytes.
pub fn serialize<T>(value: &T) -> Result<Vec<u8>, SerializeError>
where
    T: Serialize + ?Sized,
{
    json::serialize(value)
}

/// Deserialize a value produced by [`serialize`].
pub fn deserialize<T>(bytes: &[u8]) -> Result<T, SerializeError>
where
    T: DeserializeOwned,
{
    json::deserialize(bytes)
}

///
/// TESTS
///
