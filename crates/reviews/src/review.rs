//! Review entity and its strongly-typed mutations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, ReviewId, StoreId, UserId};

/// Rating bounds (inclusive).
pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

/// A review of a store by a user.
///
/// # Invariants
/// - `rating` is an integer in [1, 5].
/// - At most one review exists per `(store, author)` pair; the repository
///   enforces the pair uniqueness.
/// - Mutable only by its author or an administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub text: String,
    pub rating: u8,
    pub store: StoreId,
    pub author: UserId,
    pub created_at: DateTime<Utc>,
}

/// Request to create a review. The author is implicit: whoever is
/// authenticated when the request is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReview {
    pub text: String,
    pub rating: u8,
    pub store: StoreId,
}

impl CreateReview {
    pub fn validate(&self) -> DomainResult<()> {
        validate_text(&self.text)?;
        validate_rating(self.rating)
    }
}

/// Partial review update. Store and author bindings are immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReview {
    pub text: Option<String>,
    pub rating: Option<u8>,
}

fn validate_text(text: &str) -> DomainResult<()> {
    if text.trim().is_empty() {
        return Err(DomainError::validation("a review must have text"));
    }
    Ok(())
}

fn validate_rating(rating: u8) -> DomainResult<()> {
    if !(RATING_MIN..=RATING_MAX).contains(&rating) {
        return Err(DomainError::validation(format!(
            "rating must be between {RATING_MIN} and {RATING_MAX}"
        )));
    }
    Ok(())
}

impl Review {
    /// Construct a review from a validated request.
    pub fn create(
        id: ReviewId,
        cmd: &CreateReview,
        author: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        cmd.validate()?;

        Ok(Self {
            id,
            text: cmd.text.trim().to_string(),
            rating: cmd.rating,
            store: cmd.store,
            author,
            created_at: now,
        })
    }

    /// Apply a partial update. Validates every provided field before any
    /// mutation lands.
    pub fn apply_update(&mut self, cmd: &UpdateReview) -> DomainResult<()> {
        if let Some(text) = &cmd.text {
            validate_text(text)?;
        }
        if let Some(rating) = cmd.rating {
            validate_rating(rating)?;
        }

        if let Some(text) = &cmd.text {
            self.text = text.trim().to_string();
        }
        if let Some(rating) = cmd.rating {
            self.rating = rating;
        }
        Ok(())
    }
}

impl Entity for Review {
    type Id = ReviewId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_cmd(rating: u8) -> CreateReview {
        CreateReview {
            text: "Great chips, rude seagulls.".to_string(),
            rating,
            store: StoreId::new(),
        }
    }

    #[test]
    fn create_trims_text() {
        let mut cmd = create_cmd(5);
        cmd.text = "  Lovely.  ".to_string();

        let review = Review::create(ReviewId::new(), &cmd, UserId::new(), Utc::now()).unwrap();
        assert_eq!(review.text, "Lovely.");
        assert_eq!(review.rating, 5);
    }

    #[test]
    fn rating_out_of_range_is_rejected() {
        assert!(create_cmd(0).validate().is_err());
        assert!(create_cmd(6).validate().is_err());
        assert!(create_cmd(1).validate().is_ok());
        assert!(create_cmd(5).validate().is_ok());
    }

    #[test]
    fn empty_text_is_rejected() {
        let mut cmd = create_cmd(4);
        cmd.text = "   ".to_string();
        assert!(matches!(cmd.validate().unwrap_err(), DomainError::Validation(_)));
    }

    #[test]
    fn update_validates_before_mutating() {
        let mut review =
            Review::create(ReviewId::new(), &create_cmd(4), UserId::new(), Utc::now()).unwrap();
        let before = review.clone();

        let bad = UpdateReview {
            text: Some("New text".to_string()),
            rating: Some(9),
        };
        assert!(review.apply_update(&bad).is_err());
        assert_eq!(review, before);

        let good = UpdateReview {
            text: None,
            rating: Some(2),
        };
        review.apply_update(&good).unwrap();
        assert_eq!(review.rating, 2);
        assert_eq!(review.text, before.text);
    }
}
