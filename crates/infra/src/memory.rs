//! In-memory repository implementations.
//!
//! `RwLock<HashMap>` documents for tests and single-process deployments.
//! Unique indexes (email, slug, review pair) are checked inside the write
//! lock so concurrent inserts cannot both pass.

use std::collections::HashMap;
use std::sync::RwLock;

use storefront_core::{DomainError, DomainResult, ReviewId, StoreId, UserId};
use storefront_reviews::Review;
use storefront_stores::Store;
use storefront_users::User;

use crate::repository::{ActiveFilter, ReviewRepository, StoreRepository, UserRepository};

fn lock_poisoned() -> DomainError {
    DomainError::conflict("repository lock poisoned")
}

/// In-memory user collection.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    inner: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn insert(&self, user: User) -> DomainResult<()> {
        let mut map = self.inner.write().map_err(|_| lock_poisoned())?;

        let email = user.email.to_lowercase();
        if map.values().any(|u| u.email.to_lowercase() == email) {
            return Err(DomainError::validation("email is already registered"));
        }

        map.insert(user.id, user);
        Ok(())
    }

    fn get(&self, id: UserId, filter: ActiveFilter) -> DomainResult<User> {
        let map = self.inner.read().map_err(|_| lock_poisoned())?;

        map.get(&id)
            .filter(|u| filter.admits(u))
            .cloned()
            .ok_or(DomainError::NotFound)
    }

    fn find_by_email(&self, email: &str, filter: ActiveFilter) -> Option<User> {
        let map = self.inner.read().ok()?;
        let email = email.trim().to_lowercase();

        map.values()
            .find(|u| u.email.to_lowercase() == email && filter.admits(u))
            .cloned()
    }

    fn find_by_reset_hash(&self, hash: &str) -> Option<User> {
        let map = self.inner.read().ok()?;

        map.values()
            .find(|u| u.active && u.reset_token_hash.as_deref() == Some(hash))
            .cloned()
    }

    fn update(&self, user: User) -> DomainResult<()> {
        let mut map = self.inner.write().map_err(|_| lock_poisoned())?;

        if !map.contains_key(&user.id) {
            return Err(DomainError::NotFound);
        }

        let email = user.email.to_lowercase();
        if map
            .values()
            .any(|u| u.id != user.id && u.email.to_lowercase() == email)
        {
            return Err(DomainError::validation("email is already registered"));
        }

        map.insert(user.id, user);
        Ok(())
    }
}

/// In-memory store collection.
#[derive(Debug, Default)]
pub struct InMemoryStoreRepository {
    inner: RwLock<HashMap<StoreId, Store>>,
}

impl InMemoryStoreRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoreRepository for InMemoryStoreRepository {
    fn insert(&self, store: Store) -> DomainResult<()> {
        let mut map = self.inner.write().map_err(|_| lock_poisoned())?;

        if map.values().any(|s| s.slug == store.slug) {
            return Err(DomainError::validation("slug is already taken"));
        }

        map.insert(store.id, store);
        Ok(())
    }

    fn get(&self, id: StoreId) -> DomainResult<Store> {
        let map = self.inner.read().map_err(|_| lock_poisoned())?;
        map.get(&id).cloned().ok_or(DomainError::NotFound)
    }

    fn update(&self, store: Store) -> DomainResult<()> {
        let mut map = self.inner.write().map_err(|_| lock_poisoned())?;

        if !map.contains_key(&store.id) {
            return Err(DomainError::NotFound);
        }
        if map
            .values()
            .any(|s| s.id != store.id && s.slug == store.slug)
        {
            return Err(DomainError::validation("slug is already taken"));
        }

        map.insert(store.id, store);
        Ok(())
    }

    fn delete(&self, id: StoreId) -> DomainResult<()> {
        let mut map = self.inner.write().map_err(|_| lock_poisoned())?;
        map.remove(&id).map(|_| ()).ok_or(DomainError::NotFound)
    }

    fn list(&self) -> Vec<Store> {
        match self.inner.read() {
            Ok(map) => {
                let mut stores: Vec<Store> = map.values().cloned().collect();
                stores.sort_by_key(|s| s.id);
                stores
            }
            Err(_) => Vec::new(),
        }
    }

    fn get_many(&self, ids: &[StoreId]) -> Vec<Store> {
        match self.inner.read() {
            Ok(map) => {
                let mut stores: Vec<Store> =
                    ids.iter().filter_map(|id| map.get(id).cloned()).collect();
                stores.sort_by_key(|s| s.id);
                stores
            }
            Err(_) => Vec::new(),
        }
    }

    fn slugs(&self) -> Vec<String> {
        match self.inner.read() {
            Ok(map) => map.values().map(|s| s.slug.clone()).collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// In-memory review collection.
#[derive(Debug, Default)]
pub struct InMemoryReviewRepository {
    inner: RwLock<HashMap<ReviewId, Review>>,
}

impl InMemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReviewRepository for InMemoryReviewRepository {
    fn insert(&self, review: Review) -> DomainResult<()> {
        let mut map = self.inner.write().map_err(|_| lock_poisoned())?;

        if map
            .values()
            .any(|r| r.store == review.store && r.author == review.author)
        {
            return Err(DomainError::validation(
                "this author has already reviewed this store",
            ));
        }

        map.insert(review.id, review);
        Ok(())
    }

    fn get(&self, id: ReviewId) -> DomainResult<Review> {
        let map = self.inner.read().map_err(|_| lock_poisoned())?;
        map.get(&id).cloned().ok_or(DomainError::NotFound)
    }

    fn update(&self, review: Review) -> DomainResult<()> {
        let mut map = self.inner.write().map_err(|_| lock_poisoned())?;

        let Some(existing) = map.get(&review.id) else {
            return Err(DomainError::NotFound);
        };
        if existing.store != review.store || existing.author != review.author {
            return Err(DomainError::validation(
                "a review's store and author bindings are immutable",
            ));
        }

        map.insert(review.id, review);
        Ok(())
    }

    fn delete(&self, id: ReviewId) -> DomainResult<()> {
        let mut map = self.inner.write().map_err(|_| lock_poisoned())?;
        map.remove(&id).map(|_| ()).ok_or(DomainError::NotFound)
    }

    fn list(&self) -> Vec<Review> {
        match self.inner.read() {
            Ok(map) => {
                let mut reviews: Vec<Review> = map.values().cloned().collect();
                reviews.sort_by_key(|r| r.id);
                reviews
            }
            Err(_) => Vec::new(),
        }
    }

    fn list_by_store(&self, store_id: StoreId) -> Vec<Review> {
        match self.inner.read() {
            Ok(map) => {
                let mut reviews: Vec<Review> = map
                    .values()
                    .filter(|r| r.store == store_id)
                    .cloned()
                    .collect();
                reviews.sort_by_key(|r| r.id);
                reviews
            }
            Err(_) => Vec::new(),
        }
    }

    fn delete_by_store(&self, store_id: StoreId) -> usize {
        match self.inner.write() {
            Ok(mut map) => {
                let before = map.len();
                map.retain(|_, r| r.store != store_id);
                before - map.len()
            }
            Err(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeSet;
    use storefront_core::{GeoPoint, Location};
    use storefront_reviews::CreateReview;
    use storefront_stores::CreateStore;
    use storefront_users::RegisterUser;

    fn test_user(email: &str) -> User {
        User::register(
            UserId::new(),
            &RegisterUser {
                name: "Test User".to_string(),
                email: email.to_string(),
                password: "pass1234".to_string(),
            },
            "$hash$".to_string(),
            Utc::now(),
        )
        .unwrap()
    }

    fn test_store(name: &str, slug: &str) -> Store {
        Store::create(
            StoreId::new(),
            &CreateStore {
                name: name.to_string(),
                description: String::new(),
                tags: BTreeSet::from(["test".to_string()]),
                location: Location::new(GeoPoint::new(0.0, 0.0).unwrap(), "somewhere").unwrap(),
            },
            slug.to_string(),
            UserId::new(),
            Utc::now(),
        )
        .unwrap()
    }

    fn test_review(store: StoreId, author: UserId, rating: u8) -> Review {
        Review::create(
            ReviewId::new(),
            &CreateReview {
                text: "Decent enough.".to_string(),
                rating,
                store,
            },
            author,
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn email_uniqueness_is_case_insensitive() {
        let repo = InMemoryUserRepository::new();
        repo.insert(test_user("ada@example.com")).unwrap();

        let err = repo.insert(test_user("ADA@example.com")).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn active_filter_is_explicit_on_reads() {
        let repo = InMemoryUserRepository::new();
        let mut user = test_user("gone@example.com");
        user.deactivate();
        let id = user.id;
        repo.insert(user).unwrap();

        assert_eq!(
            repo.get(id, ActiveFilter::ActiveOnly).unwrap_err(),
            DomainError::NotFound
        );
        assert!(repo.get(id, ActiveFilter::IncludeInactive).is_ok());
        assert!(
            repo.find_by_email("gone@example.com", ActiveFilter::ActiveOnly)
                .is_none()
        );
        assert!(
            repo.find_by_email("gone@example.com", ActiveFilter::IncludeInactive)
                .is_some()
        );
    }

    #[test]
    fn update_rejects_email_collision_with_other_account() {
        let repo = InMemoryUserRepository::new();
        let first = test_user("first@example.com");
        let mut second = test_user("second@example.com");
        repo.insert(first).unwrap();
        repo.insert(second.clone()).unwrap();

        second.email = "first@example.com".to_string();
        assert!(repo.update(second).is_err());
    }

    #[test]
    fn slug_collisions_are_rejected() {
        let repo = InMemoryStoreRepository::new();
        repo.insert(test_store("Original Chip Shop", "chips")).unwrap();

        let err = repo
            .insert(test_store("Imitation Chip Shop", "chips"))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(repo.slugs(), vec!["chips".to_string()]);
    }

    #[test]
    fn duplicate_review_pair_is_rejected() {
        let repo = InMemoryReviewRepository::new();
        let store = StoreId::new();
        let author = UserId::new();

        repo.insert(test_review(store, author, 5)).unwrap();
        let err = repo.insert(test_review(store, author, 3)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // Same author, different store: fine.
        repo.insert(test_review(StoreId::new(), author, 3)).unwrap();
    }

    #[test]
    fn review_bindings_are_immutable_on_update() {
        let repo = InMemoryReviewRepository::new();
        let store = StoreId::new();
        let author = UserId::new();
        let review = test_review(store, author, 4);
        repo.insert(review.clone()).unwrap();

        let mut moved = review;
        moved.store = StoreId::new();
        assert!(repo.update(moved).is_err());
    }

    #[test]
    fn delete_by_store_cascades_only_that_store() {
        let repo = InMemoryReviewRepository::new();
        let store_a = StoreId::new();
        let store_b = StoreId::new();

        repo.insert(test_review(store_a, UserId::new(), 5)).unwrap();
        repo.insert(test_review(store_a, UserId::new(), 3)).unwrap();
        repo.insert(test_review(store_b, UserId::new(), 1)).unwrap();

        assert_eq!(repo.delete_by_store(store_a), 2);
        assert!(repo.list_by_store(store_a).is_empty());
        assert_eq!(repo.list_by_store(store_b).len(), 1);
        assert_eq!(repo.delete_by_store(store_a), 0);
    }
}
