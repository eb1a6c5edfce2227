//! Service wiring.

use std::sync::Arc;

use storefront_auth::{AuthConfig, TokenAuthority};
use storefront_infra::{
    InMemoryReviewRepository, InMemoryStoreRepository, InMemoryUserRepository, ReviewRepository,
    StoreRepository, UserRepository,
};

/// The assembled directory service.
///
/// Holds the three repositories plus the token authority. Construction takes
/// an explicit [`AuthConfig`]; nothing here reads process globals.
pub struct Directory {
    pub(crate) users: Arc<dyn UserRepository>,
    pub(crate) stores: Arc<dyn StoreRepository>,
    pub(crate) reviews: Arc<dyn ReviewRepository>,
    pub(crate) tokens: TokenAuthority,
}

impl Directory {
    pub fn new(
        users: Arc<dyn UserRepository>,
        stores: Arc<dyn StoreRepository>,
        reviews: Arc<dyn ReviewRepository>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            users,
            stores,
            reviews,
            tokens: TokenAuthority::new(config),
        }
    }

    /// Wire up in-memory repositories (tests, single-process deployments).
    pub fn in_memory(config: &AuthConfig) -> Self {
        Self::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryStoreRepository::new()),
            Arc::new(InMemoryReviewRepository::new()),
            config,
        )
    }
}
