//! `storefront-search` — proximity and free-text queries over stores.
//!
//! Pure functions over store slices: no IO, no index persistence. Callers
//! fetch the candidate set from the repository and hand it here.

pub mod geo;
pub mod text;

pub use geo::{
    DEFAULT_NEAR_RADIUS_M, GeoQuery, MapSummary, NEAR_RESULT_CAP, StoreDistance, distances_from,
    near, within_radius,
};
pub use text::{TEXT_RESULT_CAP, TextIndex};
