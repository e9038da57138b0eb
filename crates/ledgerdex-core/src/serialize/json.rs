use crate::serialize::SerializeError;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{from_slice, to_vec};

/// Serialize a value into JSON bytes.
pub(super) fn serialize<T>(value: &T) -> Result<Vec<u8>, SerializeError>
where
    T: Serialize + ?Sized,
{
    to_vec(value).map_err(|e| SerializeError::Serialize(e.to_string()))
}

/// Deserialize JSON bytes into a value.
pub(super) fn deserialize<T>(bytes: &[u8]) -> Result<T, SerializeError>
where
    T: DeserializeOwned,
{
    from_slice(bytes).map_err(|e| SerializeError::Deserialize(e.to_string()))
}
