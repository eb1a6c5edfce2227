//! `storefront-infra` — persistence boundary.
//!
//! Repository traits plus in-memory implementations. The document store is
//! the only shared resource in the system; the discipline everywhere is
//! "read full current state, compute, write back".

pub mod memory;
pub mod repository;

pub use memory::{InMemoryReviewRepository, InMemoryStoreRepository, InMemoryUserRepository};
pub use repository::{ActiveFilter, ReviewRepository, StoreRepository, UserRepository};
