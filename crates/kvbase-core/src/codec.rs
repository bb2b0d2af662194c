//! Value encoding.
//!
//! Values are stored as JSON so records stay inspectable with ordinary
//! tooling and decode into any shape with matching field names.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{KvError, KvResult};

/// Encode `value` to JSON, rejecting results larger than `max_size` bytes.
pub fn encode<T>(value: &T, max_size: usize) -> KvResult<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    let data = serde_json::to_vec(value)?;
    if data.len() > max_size {
        return Err(KvError::OversizedValue { size: data.len(), max: max_size });
    }
    Ok(data)
}

/// Decode a stored JSON value.
pub fn decode<T: DeserializeOwned>(data: &[u8]) -> KvResult<T> {
    Ok(serde_json::from_slice(data)?)
}
