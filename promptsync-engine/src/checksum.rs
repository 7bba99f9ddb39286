//! Content checksum used by the loop-prevention guard.
//!
//! Equality comparison only — this is not an integrity or security
//! mechanism.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest of the content's UTF-8 bytes.
pub fn checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
