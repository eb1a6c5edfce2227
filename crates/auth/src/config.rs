//! Authentication configuration.

use chrono::Duration;

use storefront_core::{DomainError, DomainResult};

/// Configuration for session-token issuance.
///
/// Constructed once at process startup and handed to
/// [`crate::TokenAuthority`]; there is no process-global secret.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC signing secret for session tokens.
    pub token_secret: String,
    /// Session token lifetime. Typically between one and ninety days.
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(token_secret: impl Into<String>, token_ttl: Duration) -> DomainResult<Self> {
        let token_secret = token_secret.into();
        if token_secret.is_empty() {
            return Err(DomainError::validation("token secret cannot be empty"));
        }
        if token_ttl <= Duration::zero() {
            return Err(DomainError::validation("token ttl must be positive"));
        }
        Ok(Self {
            token_secret,
            token_ttl,
        })
    }
}
