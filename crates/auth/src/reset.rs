//! Password-reset tokens.
//!
//! The raw value proves control of the registered email address: it is
//! delivered out-of-band and never persisted. Only its SHA-256 digest is
//! stored, together with a fixed 10-minute expiry.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

/// Validity window of an issued reset token, in minutes.
pub const RESET_TOKEN_TTL_MINUTES: i64 = 10;

/// Entropy of the raw token, in bytes.
const RESET_TOKEN_BYTES: usize = 32;

/// A freshly issued reset token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedResetToken {
    /// High-entropy raw value (hex). Hand this to the mailer; never store it.
    pub raw: String,
    /// SHA-256 hex digest of `raw`; this is what gets persisted.
    pub hash: String,
    /// Instant after which the token is no longer accepted.
    pub expires_at: DateTime<Utc>,
}

/// Generate a fresh reset token.
pub fn issue_reset_token(now: DateTime<Utc>) -> IssuedResetToken {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    let raw = hex::encode(bytes);

    IssuedResetToken {
        hash: hash_for_lookup(&raw),
        raw,
        expires_at: now + Duration::minutes(RESET_TOKEN_TTL_MINUTES),
    }
}

/// Digest a presented raw token the same way [`issue_reset_token`] does, so
/// the stored record can be found by its hash.
pub fn hash_for_lookup(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_hash_matches_issued_hash() {
        let issued = issue_reset_token(Utc::now());
        assert_eq!(hash_for_lookup(&issued.raw), issued.hash);
    }

    #[test]
    fn raw_value_is_256_bits_of_hex() {
        let issued = issue_reset_token(Utc::now());
        assert_eq!(issued.raw.len(), RESET_TOKEN_BYTES * 2);
        assert!(issued.raw.bytes().all(|b| b.is_ascii_hexdigit()));
        assert_ne!(issued.raw, issued.hash);
    }

    #[test]
    fn tokens_are_unique() {
        let a = issue_reset_token(Utc::now());
        let b = issue_reset_token(Utc::now());
        assert_ne!(a.raw, b.raw);
    }

    #[test]
    fn expiry_is_ten_minutes_out() {
        let now = Utc::now();
        let issued = issue_reset_token(now);
        assert_eq!(issued.expires_at, now + Duration::minutes(10));
    }
}
