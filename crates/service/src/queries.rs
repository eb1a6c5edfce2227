//! Read-only search facade. These paths bypass authorization by design;
//! whether anonymous callers reach them is a routing-layer decision.

use storefront_core::{DistanceUnit, DomainError, DomainResult};
use storefront_search::{GeoQuery, MapSummary, StoreDistance, TextIndex, distances_from, near, within_radius};
use storefront_stores::Store;

use crate::app::Directory;

impl Directory {
    /// Free-text search over names and descriptions, best match first,
    /// capped at [`storefront_search::TEXT_RESULT_CAP`].
    pub fn search_stores(&self, query: &str) -> Vec<Store> {
        let stores = self.stores.list();
        let index = TextIndex::build(&stores);

        let by_id: std::collections::HashMap<_, _> =
            stores.iter().map(|s| (s.id, s)).collect();

        index
            .search(query)
            .into_iter()
            .filter_map(|(id, _score)| by_id.get(&id).map(|s| (*s).clone()))
            .collect()
    }

    /// Map view: stores near the parsed origin within `max_distance_m`
    /// meters (default 10 km), nearest first, capped at ten, reduced
    /// projection.
    pub fn map_stores(
        &self,
        lat: Option<&str>,
        lng: Option<&str>,
        max_distance_m: Option<f64>,
    ) -> DomainResult<Vec<MapSummary>> {
        let query = GeoQuery::parse(lat, lng)?;
        Ok(near(&self.stores.list(), query.point, max_distance_m))
    }

    /// All stores within `distance` (in `unit`) of `latlng`, as a pure
    /// containment filter with no distance ordering.
    pub fn stores_within(
        &self,
        distance: &str,
        latlng: &str,
        unit: &str,
    ) -> DomainResult<Vec<Store>> {
        let distance: f64 = distance
            .trim()
            .parse()
            .map_err(|_| DomainError::invalid_query(format!("unparseable distance: '{distance}'")))?;
        let query = GeoQuery::parse_latlng(latlng)?;
        let unit: DistanceUnit = unit.parse()?;

        let stores = self.stores.list();
        Ok(within_radius(&stores, query.point, distance, unit)?
            .into_iter()
            .cloned()
            .collect())
    }

    /// Every store annotated with its distance from `latlng` in `unit`,
    /// nearest first.
    pub fn store_distances(&self, latlng: &str, unit: &str) -> DomainResult<Vec<StoreDistance>> {
        let query = GeoQuery::parse_latlng(latlng)?;
        let unit: DistanceUnit = unit.parse()?;

        Ok(distances_from(&self.stores.list(), query.point, unit))
    }
}
