//! Repository traits for the three document collections.

use storefront_core::{DomainResult, ReviewId, StoreId, UserId};
use storefront_reviews::Review;
use storefront_stores::Store;
use storefront_users::User;

/// Visibility filter for user reads.
///
/// Soft-deleted accounts are excluded by an explicit parameter on every read
/// path, not by an invisible query rewrite — the exclusion is part of the
/// call site's contract and can be tested directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveFilter {
    /// Only active accounts (the default posture for service reads).
    ActiveOnly,
    /// Include soft-deleted accounts (credential/reset internals).
    IncludeInactive,
}

impl ActiveFilter {
    pub fn admits(self, user: &User) -> bool {
        match self {
            ActiveFilter::ActiveOnly => user.active,
            ActiveFilter::IncludeInactive => true,
        }
    }
}

/// User accounts, keyed by id with a case-insensitive unique email index.
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Fails with `Validation` when the email is
    /// already registered (case-insensitive).
    fn insert(&self, user: User) -> DomainResult<()>;

    /// Fetch by id; `NotFound` covers both absence and accounts excluded by
    /// `filter`.
    fn get(&self, id: UserId, filter: ActiveFilter) -> DomainResult<User>;

    fn find_by_email(&self, email: &str, filter: ActiveFilter) -> Option<User>;

    /// Locate the account holding a pending reset-token digest. Soft-deleted
    /// accounts cannot be resurrected through a reset, so this is
    /// active-only.
    fn find_by_reset_hash(&self, hash: &str) -> Option<User>;

    /// Replace the stored record (whole-document update). Fails with
    /// `NotFound` for unknown ids and `Validation` when the new email
    /// collides with another account.
    fn update(&self, user: User) -> DomainResult<()>;
}

/// Store listings, keyed by id with a unique slug index.
pub trait StoreRepository: Send + Sync {
    /// Insert a new store. Fails with `Validation` on a slug collision.
    fn insert(&self, store: Store) -> DomainResult<()>;

    fn get(&self, id: StoreId) -> DomainResult<Store>;

    /// Replace the stored record. Fails with `NotFound` for unknown ids and
    /// `Validation` when the slug collides with another store.
    fn update(&self, store: Store) -> DomainResult<()>;

    fn delete(&self, id: StoreId) -> DomainResult<()>;

    fn list(&self) -> Vec<Store>;

    fn get_many(&self, ids: &[StoreId]) -> Vec<Store>;

    /// Every slug currently in use (collision disambiguation input).
    fn slugs(&self) -> Vec<String>;
}

/// Reviews, keyed by id with a unique `(store, author)` pair index.
pub trait ReviewRepository: Send + Sync {
    /// Insert a new review. Fails with `Validation` when the author already
    /// reviewed the store.
    fn insert(&self, review: Review) -> DomainResult<()>;

    fn get(&self, id: ReviewId) -> DomainResult<Review>;

    /// Replace the stored record; the `(store, author)` binding must not
    /// change.
    fn update(&self, review: Review) -> DomainResult<()>;

    fn delete(&self, id: ReviewId) -> DomainResult<()>;

    fn list(&self) -> Vec<Review>;

    /// All reviews for one store — the full current set the aggregate is
    /// recomputed from.
    fn list_by_store(&self, store_id: StoreId) -> Vec<Review>;

    /// Remove every review for a store (cascade on store deletion).
    /// Returns how many were removed.
    fn delete_by_store(&self, store_id: StoreId) -> usize;
}
