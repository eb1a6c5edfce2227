//! Account flows: signup, login, authentication, password lifecycle,
//! profile updates, soft deletion.

use chrono::{DateTime, Utc};
use serde::Serialize;

use storefront_auth::{
    Actor, PasswordError, hash_for_lookup, hash_password, issue_reset_token, verify_password,
};
use storefront_core::{DomainError, DomainResult, StoreId, UserId};
use storefront_infra::ActiveFilter;
use storefront_users::{RegisterUser, UpdateProfile, User, validate_password};

use crate::app::Directory;

/// Public projection of a user account (credential and reset fields stay
/// server-side).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountView {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: storefront_auth::Role,
    pub photo: String,
    pub hearts: Vec<StoreId>,
}

impl From<&User> for AccountView {
    fn from(user: &User) -> Self {
        let mut hearts: Vec<StoreId> = user.hearts.iter().copied().collect();
        hearts.sort();

        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            photo: user.photo.clone(),
            hearts,
        }
    }
}

/// Outcome of a successful signup/login/reset: the account plus a fresh
/// session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub account: AccountView,
    pub token: String,
}

/// A hashing failure here means the *stored* credential is unusable, which
/// is a state problem rather than caller error.
fn credential_failure(e: PasswordError) -> DomainError {
    DomainError::conflict(format!("credential processing failed: {e}"))
}

impl Directory {
    /// Register a new account and open a session for it.
    ///
    /// Validation runs before the (deliberately expensive) hash.
    pub fn signup(&self, cmd: &RegisterUser, now: DateTime<Utc>) -> DomainResult<Session> {
        cmd.validate()?;

        let password_hash = hash_password(&cmd.password).map_err(credential_failure)?;
        let user = User::register(UserId::new(), cmd, password_hash, now)?;
        self.users.insert(user.clone())?;

        tracing::info!(user = %user.id, "account registered");
        self.open_session(&user, now)
    }

    /// Exchange credentials for a session token.
    ///
    /// Unknown email, wrong password and deactivated account all produce the
    /// same `Unauthenticated`.
    pub fn login(&self, email: &str, password: &str, now: DateTime<Utc>) -> DomainResult<Session> {
        let Some(user) = self.users.find_by_email(email, ActiveFilter::ActiveOnly) else {
            return Err(DomainError::Unauthenticated);
        };

        let ok = verify_password(password, &user.password_hash).map_err(credential_failure)?;
        if !ok {
            return Err(DomainError::Unauthenticated);
        }

        self.open_session(&user, now)
    }

    /// Resolve a bearer token into an acting principal.
    ///
    /// Fails with `Unauthenticated` when the token is absent, forged,
    /// expired, bound to an unknown or deactivated account, or issued before
    /// the account's last password change.
    pub fn authenticate(&self, token: Option<&str>) -> DomainResult<Actor> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(DomainError::Unauthenticated)?;

        let claims = self
            .tokens
            .verify(token)
            .map_err(|_| DomainError::Unauthenticated)?;

        let user = self
            .users
            .get(claims.sub, ActiveFilter::ActiveOnly)
            .map_err(|_| DomainError::Unauthenticated)?;

        if user.changed_password_after(claims.iat) {
            return Err(DomainError::Unauthenticated);
        }

        Ok(Actor {
            id: user.id,
            role: user.role,
        })
    }

    /// Begin a password reset.
    ///
    /// Persists the token digest and expiry, and returns the raw token for
    /// the out-of-band mailer. The raw value is never stored or logged.
    pub fn forgot_password(&self, email: &str, now: DateTime<Utc>) -> DomainResult<String> {
        let Some(mut user) = self.users.find_by_email(email, ActiveFilter::ActiveOnly) else {
            return Err(DomainError::NotFound);
        };

        let issued = issue_reset_token(now);
        user.begin_password_reset(issued.hash, issued.expires_at);
        self.users.update(user)?;

        Ok(issued.raw)
    }

    /// Complete a password reset with the raw token from the email.
    ///
    /// An unknown or expired token is `NotFound`. Success installs the new
    /// hash, clears the reset pair (single use) and opens a fresh session;
    /// tokens issued before the reset are dead from here on.
    pub fn reset_password(
        &self,
        raw_token: &str,
        new_password: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Session> {
        let Some(mut user) = self.users.find_by_reset_hash(&hash_for_lookup(raw_token)) else {
            return Err(DomainError::NotFound);
        };
        if !user.reset_token_valid_at(now) {
            return Err(DomainError::NotFound);
        }

        validate_password(new_password)?;
        let password_hash = hash_password(new_password).map_err(credential_failure)?;
        user.complete_password_reset(password_hash, now);
        self.users.update(user.clone())?;

        tracing::info!(user = %user.id, "password reset completed");
        self.open_session(&user, now)
    }

    /// Rotate the password of a logged-in user; the current password must
    /// verify first. Returns a fresh session because older tokens are
    /// revoked by the rotation.
    pub fn update_password(
        &self,
        actor: &Actor,
        current: &str,
        new_password: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Session> {
        let mut user = self.users.get(actor.id, ActiveFilter::ActiveOnly)?;

        let ok = verify_password(current, &user.password_hash).map_err(credential_failure)?;
        if !ok {
            return Err(DomainError::Unauthenticated);
        }

        validate_password(new_password)?;
        let password_hash = hash_password(new_password).map_err(credential_failure)?;
        user.set_password(password_hash, now);
        self.users.update(user.clone())?;

        self.open_session(&user, now)
    }

    /// Update the acting user's own profile (name/email only; credentials
    /// have their own paths and other fields are unrepresentable here).
    pub fn update_profile(
        &self,
        actor: &Actor,
        update: &UpdateProfile,
    ) -> DomainResult<AccountView> {
        let mut user = self.users.get(actor.id, ActiveFilter::ActiveOnly)?;
        user.apply_profile_update(update)?;
        self.users.update(user.clone())?;

        Ok(AccountView::from(&user))
    }

    /// Soft-delete the acting user's account. Default read paths stop
    /// seeing it, and authentication fails from here on.
    pub fn deactivate_account(&self, actor: &Actor) -> DomainResult<()> {
        let mut user = self.users.get(actor.id, ActiveFilter::ActiveOnly)?;
        user.deactivate();
        self.users.update(user)?;

        tracing::info!(user = %actor.id, "account deactivated");
        Ok(())
    }

    /// The acting user's own account.
    pub fn current_account(&self, actor: &Actor) -> DomainResult<AccountView> {
        let user = self.users.get(actor.id, ActiveFilter::ActiveOnly)?;
        Ok(AccountView::from(&user))
    }

    fn open_session(&self, user: &User, now: DateTime<Utc>) -> DomainResult<Session> {
        let token = self
            .tokens
            .issue(user.id, now)
            .map_err(|_| DomainError::conflict("token issuance failed"))?;

        Ok(Session {
            account: AccountView::from(user),
            token,
        })
    }
}
