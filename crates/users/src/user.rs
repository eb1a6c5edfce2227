//! User account entity and its strongly-typed mutations.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use storefront_auth::Role;
use storefront_core::{DomainError, DomainResult, Entity, StoreId, UserId};

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 8;

/// Avatar filename assigned to new accounts.
const DEFAULT_PHOTO: &str = "default.jpg";

/// User account.
///
/// # Invariants
/// - `email` is stored trimmed and lowercased; the repository enforces
///   uniqueness case-insensitively.
/// - The reset pair (`reset_token_hash`, `reset_token_expires`) is `Some`
///   only while a reset flow is in progress; consuming a reset clears both
///   fields in the same update that installs the new password hash.
/// - `active == false` marks a soft-deleted account. Read paths exclude it
///   unless they explicitly opt in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
    pub password_changed_at: Option<DateTime<Utc>>,
    pub reset_token_hash: Option<String>,
    pub reset_token_expires: Option<DateTime<Utc>>,
    pub active: bool,
    pub hearts: HashSet<StoreId>,
    pub photo: String,
    pub created_at: DateTime<Utc>,
}

/// Request to register a new account.
///
/// `password` is plaintext here; hashing happens at the service boundary
/// before the entity is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterUser {
    /// Field-level validation; no IO, runs before the (expensive) hash.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

/// Partial profile update.
///
/// The mutable fields are enumerated here; everything else (role, password,
/// reset state, hearts) has its own dedicated path and cannot be smuggled
/// through a profile update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Minimal structural email check: one `@`, a dotted domain, no spaces.
pub fn validate_email(email: &str) -> DomainResult<()> {
    let email = email.trim();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        })
        && !email.contains(' ');

    if valid {
        Ok(())
    } else {
        Err(DomainError::validation("a valid email address is required"))
    }
}

pub fn validate_password(password: &str) -> DomainResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(DomainError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    Ok(())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl User {
    /// Construct a new active account from a validated registration.
    pub fn register(
        id: UserId,
        cmd: &RegisterUser,
        password_hash: String,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        cmd.validate()?;

        Ok(Self {
            id,
            name: cmd.name.trim().to_string(),
            email: normalize_email(&cmd.email),
            role: Role::Standard,
            password_hash,
            password_changed_at: None,
            reset_token_hash: None,
            reset_token_expires: None,
            active: true,
            hearts: HashSet::new(),
            photo: DEFAULT_PHOTO.to_string(),
            created_at: now,
        })
    }

    /// Apply a profile update (whitelisted fields only).
    pub fn apply_profile_update(&mut self, update: &UpdateProfile) -> DomainResult<()> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name cannot be empty"));
            }
            self.name = name.trim().to_string();
        }
        if let Some(email) = &update.email {
            validate_email(email)?;
            self.email = normalize_email(email);
        }
        Ok(())
    }

    /// Record a credential rotation.
    ///
    /// The change timestamp is skewed one second into the past so a session
    /// token minted within the same second as the rotation still fails the
    /// revocation check.
    pub fn set_password(&mut self, password_hash: String, now: DateTime<Utc>) {
        self.password_hash = password_hash;
        self.password_changed_at = Some(now - Duration::seconds(1));
    }

    /// Begin a reset flow: remember the token digest and its expiry.
    pub fn begin_password_reset(&mut self, token_hash: String, expires_at: DateTime<Utc>) {
        self.reset_token_hash = Some(token_hash);
        self.reset_token_expires = Some(expires_at);
    }

    /// Consume the pending reset: install the new hash and clear both reset
    /// fields in the same update, making the token single-use.
    pub fn complete_password_reset(&mut self, password_hash: String, now: DateTime<Utc>) {
        self.set_password(password_hash, now);
        self.reset_token_hash = None;
        self.reset_token_expires = None;
    }

    /// Whether the pending reset token is still acceptable at `now`.
    pub fn reset_token_valid_at(&self, now: DateTime<Utc>) -> bool {
        match (&self.reset_token_hash, self.reset_token_expires) {
            (Some(_), Some(expires)) => now < expires,
            _ => false,
        }
    }

    /// Whether credentials changed after a token issued at `issued_at`
    /// (seconds since the epoch). Used to revoke stateless sessions.
    pub fn changed_password_after(&self, issued_at: i64) -> bool {
        match self.password_changed_at {
            Some(changed) => issued_at < changed.timestamp(),
            None => false,
        }
    }

    /// Toggle a store in the hearts set; returns whether it is now hearted.
    pub fn toggle_heart(&mut self, store_id: StoreId) -> bool {
        if self.hearts.remove(&store_id) {
            false
        } else {
            self.hearts.insert(store_id);
            true
        }
    }

    /// Soft delete: the account disappears from default read paths but the
    /// record survives.
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
