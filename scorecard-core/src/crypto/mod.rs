//! Password digest module
//!
//! Passwords are stored as the lowercase hex SHA-256 of their UTF-8 bytes.
//! The format matches the files written by the earlier form application, so
//! its `users.json` can be imported without re-hashing.
//!
//! Unsalted fast digests do not resist offline brute force. Keep this module
//! the single place that knows the format so a salted KDF can replace it.

use sha2::{Digest, Sha256};

/// Length of a hex encoded SHA-256 digest.
pub const DIGEST_HEX_LENGTH: usize = 64;

/// Compute the stored digest for a password.
#[must_use]
pub fn digest_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Check a password against a stored digest.
///
/// The comparison visits every byte regardless of where the first mismatch is.
#[must_use]
pub fn verify_password(password: &str, stored_digest: &str) -> bool {
    let computed = digest_password(password);
    let stored = stored_digest.to_ascii_lowercase();
    if computed.len() != stored.len() {
        return false;
    }
    computed
        .bytes()
        .zip(stored.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Whether `value` looks like a digest produced by [`digest_password`].
#[must_use]
pub fn is_valid_digest(value: &str) -> bool {
    value.len() == DIGEST_HEX_LENGTH && value.bytes().all(|b| b.is_ascii_hexdigit())
}
