//! `storefront-reviews` — review domain model.

pub mod review;

pub use review::{CreateReview, RATING_MAX, RATING_MIN, Review, UpdateReview};
