//! Password hashing and verification.

use thiserror::Error;

/// bcrypt cost factor. Fixed; tuned for roughly 100ms per verification on
/// commodity hardware.
const BCRYPT_COST: u32 = 12;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("credential processing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Hash a plaintext password (salted, one-way, computationally expensive).
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    Ok(bcrypt::hash(plain, BCRYPT_COST)?)
}

/// Verify a plaintext candidate against a stored hash.
///
/// Returns `false` on mismatch; errors only when the stored hash itself is
/// malformed.
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, PasswordError> {
    Ok(bcrypt::verify(plain, hash)?)
}
