//! Persistence medium abstraction
//!
//! A medium is a flat key/blob store. Keys are short ASCII identifiers
//! chosen by the engine (`forum_data`, `current_user`). A write replaces the
//! whole blob under a key; there is no partial or streamed access.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::checksum::{frame, unframe};
use super::errors::{StorageError, StorageResult};

/// Key/blob persistence medium.
///
/// Implementations must make `write` all-or-nothing: after a failed write
/// the previous blob under the key is still readable.
pub trait Medium: Send + Sync {
    /// Reads the raw blob under `key`, or `None` if nothing was ever written.
    fn read(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Replaces the raw blob under `key`.
    fn write(&self, key: &str, bytes: &[u8]) -> StorageResult<()>;
}

/// Reads and decodes a checksummed JSON value stored under `key`.
pub fn read_json<T: DeserializeOwned>(medium: &dyn Medium, key: &str) -> StorageResult<Option<T>> {
    let bytes = match medium.read(key)? {
        Some(bytes) => bytes,
        None => return Ok(None),
    };

    let body = unframe(key, &bytes)?;
    let value = serde_json::from_slice(body)
        .map_err(|e| StorageError::data_corruption(key, format!("undecodable blob: {}", e)))?;

    Ok(Some(value))
}

/// Encodes `value` as checksummed JSON and stores it under `key`.
pub fn write_json<T: Serialize>(medium: &dyn Medium, key: &str, value: &T) -> StorageResult<()> {
    let body = serde_json::to_vec(value).map_err(|e| {
        StorageError::unavailable_no_source(format!("failed to encode {}: {}", key, e))
    })?;
    medium.write(key, &frame(&body))
}
