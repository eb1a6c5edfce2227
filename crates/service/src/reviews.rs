//! Review mutations. Every successful write is followed by exactly one
//! rating recomputation for the affected store.

use chrono::{DateTime, Utc};

use storefront_auth::{Action, Actor, authorize};
use storefront_core::{DomainError, DomainResult, ReviewId};
use storefront_reviews::{CreateReview, Review, UpdateReview};

use crate::app::Directory;

impl Directory {
    /// Create a review authored by the acting user.
    ///
    /// A second review of the same store by the same author fails validation
    /// before any write. Recomputation failure after the insert is reported
    /// but does not undo the committed review.
    pub fn create_review(
        &self,
        actor: &Actor,
        cmd: &CreateReview,
        now: DateTime<Utc>,
    ) -> DomainResult<Review> {
        cmd.validate()?;
        self.stores.get(cmd.store)?;

        let review = Review::create(ReviewId::new(), cmd, actor.id, now)?;
        self.reviews.insert(review.clone())?;
        self.on_review_changed(review.store)?;

        tracing::debug!(review = %review.id, store = %review.store, "review created");
        Ok(review)
    }

    /// Update a review (author or administrator only).
    pub fn update_review(
        &self,
        actor: &Actor,
        id: ReviewId,
        cmd: &UpdateReview,
    ) -> DomainResult<Review> {
        let mut review = self.reviews.get(id)?;
        authorize(actor, review.author, Action::Mutate).map_err(|_| DomainError::Unauthorized)?;

        review.apply_update(cmd)?;
        self.reviews.update(review.clone())?;
        self.on_review_changed(review.store)?;

        Ok(review)
    }

    /// Delete a review (author or administrator only).
    pub fn delete_review(&self, actor: &Actor, id: ReviewId) -> DomainResult<()> {
        let review = self.reviews.get(id)?;
        authorize(actor, review.author, Action::Mutate).map_err(|_| DomainError::Unauthorized)?;

        self.reviews.delete(id)?;
        self.on_review_changed(review.store)?;

        tracing::debug!(review = %id, store = %review.store, "review deleted");
        Ok(())
    }

    pub fn get_review(&self, id: ReviewId) -> DomainResult<Review> {
        self.reviews.get(id)
    }

    pub fn list_reviews(&self) -> Vec<Review> {
        self.reviews.list()
    }
}
