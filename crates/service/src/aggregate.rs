//! Denormalized rating recomputation.

use storefront_core::{DomainError, DomainResult, StoreId};
use storefront_stores::RatingSummary;

use crate::app::Directory;

impl Directory {
    /// Recompute and persist the rating aggregate of `store_id` from the
    /// full current review set. Invoked exactly once after every successful
    /// review create, update or delete.
    ///
    /// This is read-then-write, not a transaction. Because it always derives
    /// from the complete current set, a stale overwrite from a concurrent
    /// caller is corrected by whichever trigger runs last. A vanished store
    /// makes the trigger a no-op: that is the cascade path, where the
    /// reviews were bulk-removed because the store itself was deleted.
    pub fn on_review_changed(&self, store_id: StoreId) -> DomainResult<()> {
        let mut store = match self.stores.get(store_id) {
            Ok(store) => store,
            Err(DomainError::NotFound) => return Ok(()),
            Err(e) => return Err(e),
        };

        let ratings: Vec<u8> = self
            .reviews
            .list_by_store(store_id)
            .iter()
            .map(|r| r.rating)
            .collect();

        store.set_ratings(RatingSummary::from_ratings(&ratings));
        self.stores.update(store)?;

        tracing::debug!(store = %store_id, reviews = ratings.len(), "rating aggregate recomputed");
        Ok(())
    }
}
