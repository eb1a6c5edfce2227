//! Store mutations and store-centric reads: CRUD, hearts, tags, rankings.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use storefront_auth::{Action, Actor, authorize};
use storefront_core::{DomainError, DomainResult, StoreId};
use storefront_infra::ActiveFilter;
use storefront_reviews::Review;
use storefront_stores::{CreateStore, Store, UpdateStore, disambiguate_slug, slugify};

use crate::accounts::AccountView;
use crate::app::Directory;

/// Cap on the "top stores" ranking.
const TOP_STORES_CAP: usize = 10;

/// Minimum review count to qualify for the ranking.
const TOP_STORES_MIN_REVIEWS: u64 = 2;

/// A store together with its reviews.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreDetail {
    pub store: Store,
    pub reviews: Vec<Review>,
}

/// One entry of the tag directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

impl Directory {
    /// Create a store owned by the acting user.
    pub fn create_store(
        &self,
        actor: &Actor,
        cmd: &CreateStore,
        now: DateTime<Utc>,
    ) -> DomainResult<Store> {
        cmd.validate()?;

        let base = slugify(cmd.name.trim());
        let slug = disambiguate_slug(&base, &self.stores.slugs());
        let store = Store::create(StoreId::new(), cmd, slug, actor.id, now)?;
        self.stores.insert(store.clone())?;

        tracing::info!(store = %store.id, slug = %store.slug, "store created");
        Ok(store)
    }

    /// Update a store (owner or administrator only). The slug is re-derived
    /// only when the name actually changed.
    pub fn update_store(
        &self,
        actor: &Actor,
        id: StoreId,
        cmd: &UpdateStore,
    ) -> DomainResult<Store> {
        let mut store = self.stores.get(id)?;
        authorize(actor, store.author, Action::Mutate).map_err(|_| DomainError::Unauthorized)?;

        let name_changed = store.apply_update(cmd)?;
        if name_changed {
            let base = slugify(&store.name);
            let taken: Vec<String> = self
                .stores
                .slugs()
                .into_iter()
                .filter(|s| *s != store.slug)
                .collect();
            store.slug = disambiguate_slug(&base, &taken);
        }

        self.stores.update(store.clone())?;
        Ok(store)
    }

    /// Delete a store (owner or administrator only), cascading its reviews.
    ///
    /// The aggregate trigger still fires once for the bulk removal; with the
    /// store gone it is a no-op by design.
    pub fn delete_store(&self, actor: &Actor, id: StoreId) -> DomainResult<()> {
        let store = self.stores.get(id)?;
        authorize(actor, store.author, Action::Mutate).map_err(|_| DomainError::Unauthorized)?;

        self.stores.delete(id)?;
        let removed = self.reviews.delete_by_store(id);
        self.on_review_changed(id)?;

        tracing::info!(store = %id, reviews_removed = removed, "store deleted");
        Ok(())
    }

    /// A store plus its reviews.
    pub fn get_store(&self, id: StoreId) -> DomainResult<StoreDetail> {
        let store = self.stores.get(id)?;
        let reviews = self.reviews.list_by_store(id);
        Ok(StoreDetail { store, reviews })
    }

    pub fn list_stores(&self) -> Vec<Store> {
        self.stores.list()
    }

    /// Toggle the acting user's heart on a store.
    pub fn heart_store(&self, actor: &Actor, store_id: StoreId) -> DomainResult<AccountView> {
        // The store must exist; hearting is otherwise unrestricted.
        self.stores.get(store_id)?;

        let mut user = self.users.get(actor.id, ActiveFilter::ActiveOnly)?;
        user.toggle_heart(store_id);
        self.users.update(user.clone())?;

        Ok(AccountView::from(&user))
    }

    /// The stores the acting user has hearted.
    pub fn hearted_stores(&self, actor: &Actor) -> DomainResult<Vec<Store>> {
        let user = self.users.get(actor.id, ActiveFilter::ActiveOnly)?;
        let ids: Vec<StoreId> = user.hearts.iter().copied().collect();
        Ok(self.stores.get_many(&ids))
    }

    /// Tag directory: every tag in use with its store count, most used
    /// first (ties alphabetical).
    pub fn tag_counts(&self) -> Vec<TagCount> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for store in self.stores.list() {
            for tag in &store.tags {
                *counts.entry(tag.clone()).or_insert(0) += 1;
            }
        }

        let mut tags: Vec<TagCount> = counts
            .into_iter()
            .map(|(tag, count)| TagCount { tag, count })
            .collect();
        tags.sort_by(|a, b| b.count.cmp(&a.count).then(a.tag.cmp(&b.tag)));
        tags
    }

    /// Best-rated stores with at least [`TOP_STORES_MIN_REVIEWS`] reviews,
    /// by aggregate average descending, capped at [`TOP_STORES_CAP`].
    pub fn top_stores(&self) -> Vec<Store> {
        let mut stores: Vec<Store> = self
            .stores
            .list()
            .into_iter()
            .filter(|s| s.ratings.quantity >= TOP_STORES_MIN_REVIEWS)
            .collect();
        stores.sort_by(|a, b| b.ratings.average.total_cmp(&a.ratings.average));
        stores.truncate(TOP_STORES_CAP);
        stores
    }
}
