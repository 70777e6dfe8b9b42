//! SHA-256 digests, lowercase hex.
//!
//! - `sha256_canonical` for serializable values (through canonical JSON), so
//!   key order in the source document never changes a digest.
//! - `sha256_hex` for raw bytes (the history snapshot as read).

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical_json::to_canonical_bytes;
use crate::IoResult;

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

pub fn sha256_canonical<T: Serialize>(value: &T) -> IoResult<String> {
    Ok(sha256_hex(&to_canonical_bytes(value)?))
}
