//! CRC32 framing for persisted blobs
//!
//! Every blob is written as a header line followed by the body:
//!
//! ```text
//! QRM1 <crc32 of body, 8 lowercase hex digits>\n
//! <body bytes>
//! ```
//!
//! Every read verifies the checksum. A mismatch is never ignored.

use crc32fast::Hasher;

use super::errors::{StorageError, StorageResult};

/// Header magic for framed blobs
const FRAME_MAGIC: &str = "QRM1";

/// Computes a CRC32 checksum over the provided data.
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Wraps `body` in a checksummed frame.
pub fn frame(body: &[u8]) -> Vec<u8> {
    let header = format!("{} {:08x}\n", FRAME_MAGIC, compute_checksum(body));
    let mut out = Vec::with_capacity(header.len() + body.len());
    out.extend_from_slice(header.as_bytes());
    out.extend_from_slice(body);
    out
}

/// Verifies a frame and returns its body.
///
/// `key` is only used for error context.
pub fn unframe<'a>(key: &str, bytes: &'a [u8]) -> StorageResult<&'a [u8]> {
    let newline = bytes
        .iter()
        .position(|b| *b == b'\n')
        .ok_or_else(|| StorageError::data_corruption(key, "missing frame header"))?;

    let header = std::str::from_utf8(&bytes[..newline])
        .map_err(|_| StorageError::data_corruption(key, "frame header is not UTF-8"))?;
    let body = &bytes[newline + 1..];

    let mut parts = header.split(' ');
    if parts.next() != Some(FRAME_MAGIC) {
        return Err(StorageError::data_corruption(key, "unknown frame magic"));
    }
    let expected = parts
        .next()
        .and_then(|hex| u32::from_str_radix(hex, 16).ok())
        .ok_or_else(|| StorageError::data_corruption(key, "malformed checksum in header"))?;

    let actual = compute_checksum(body);
    if actual != expected {
        return Err(StorageError::data_corruption(
            key,
            format!(
                "checksum mismatch: expected {:08x}, found {:08x}",
                expected, actual
            ),
        ));
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_deterministic() {
        let data = b"forum aggregate";
        assert_eq!(compute_checksum(data), compute_checksum(data));
    }

    #[test]
    fn test_frame_roundtrip() {
        let framed = frame(b"{\"questions\":[]}");
        assert!(framed.starts_with(b"QRM1 "));
        assert_eq!(unframe("k", &framed).unwrap(), b"{\"questions\":[]}");
    }

    #[test]
    fn test_flipped_body_byte_detected() {
        let mut framed = frame(b"some persisted body");
        let last = framed.len() - 1;
        framed[last] ^= 0x01;

        let err = unframe("forum_data", &framed).unwrap_err();
        assert!(err.is_fatal());
        assert!(err.message().contains("checksum mismatch"));
    }

    #[test]
    fn test_missing_header_detected() {
        let err = unframe("forum_data", b"{\"questions\":[]}").unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_wrong_magic_detected() {
        let err = unframe("forum_data", b"XYZ9 00000000\n").unwrap_err();
        assert!(err.message().contains("magic"));
    }
}
