//! `storefront-service` — write-path orchestration.
//!
//! Every inbound mutation flows: authenticate (token → actor) → authorize
//! (ownership/role) → domain write → aggregate recomputation when the write
//! touched a review. Read-only geo/text queries skip authorization and go
//! straight to the search facade.
//!
//! All sequencing is explicit: there is no hook registry, and the rating
//! recomputer is invoked by name after each successful review mutation.

pub mod accounts;
pub mod aggregate;
pub mod app;
pub mod catalog;
pub mod queries;
pub mod reviews;

pub use accounts::{AccountView, Session};
pub use app::Directory;
pub use catalog::{StoreDetail, TagCount};
