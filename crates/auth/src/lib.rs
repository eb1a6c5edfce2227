//! `storefront-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it hashes and
//! verifies credentials, mints and checks stateless session tokens, manages
//! the reset-token lifecycle, and answers ownership questions. Looking up the
//! subject behind a token is the service layer's job.

pub mod authorize;
pub mod config;
pub mod password;
pub mod reset;
pub mod roles;
pub mod token;

pub use authorize::{Action, Actor, AuthzError, authorize};
pub use config::AuthConfig;
pub use password::{PasswordError, hash_password, verify_password};
pub use reset::{IssuedResetToken, RESET_TOKEN_TTL_MINUTES, hash_for_lookup, issue_reset_token};
pub use roles::Role;
pub use token::{TokenAuthority, TokenClaims, TokenError};
