//! Hashing helpers

use sha2::{Digest, Sha256};

/// SHA-256 of `data` as lowercase hex
///
/// Used to fingerprint embedded schema migrations so drift in an already
/// applied version is detected at startup.
pub fn sha256_hex(data: &str) -> String {
    hex::encode(Sha256::digest(data.as_bytes()))
}
