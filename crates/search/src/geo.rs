//! Geospatial queries: proximity, radius scan, distance projection.

use serde::Serialize;

use storefront_core::{DistanceUnit, DomainError, DomainResult, GeoPoint, Location, StoreId};
use storefront_stores::Store;

/// Cap on proximity ("near me") results.
pub const NEAR_RESULT_CAP: usize = 10;

/// Default proximity radius, in meters, when the caller gives none.
pub const DEFAULT_NEAR_RADIUS_M: f64 = 10_000.0;

/// Parsed origin for geo queries.
///
/// Parsing lives at this boundary so every query mode reports missing or
/// unparseable coordinates the same way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoQuery {
    pub point: GeoPoint,
}

impl GeoQuery {
    /// Parse latitude/longitude parameters. Either one missing or
    /// unparseable is an `InvalidQuery`.
    pub fn parse(lat: Option<&str>, lng: Option<&str>) -> DomainResult<Self> {
        let lat = parse_coordinate(lat, "lat")?;
        let lng = parse_coordinate(lng, "lng")?;

        let point = GeoPoint::new(lng, lat)
            .map_err(|_| DomainError::invalid_query("coordinates out of range"))?;
        Ok(Self { point })
    }

    /// Parse a combined `"lat,lng"` parameter.
    pub fn parse_latlng(latlng: &str) -> DomainResult<Self> {
        let Some((lat, lng)) = latlng.split_once(',') else {
            return Err(DomainError::invalid_query(
                "provide latitude and longitude in the format lat,lng",
            ));
        };
        Self::parse(Some(lat), Some(lng))
    }
}

fn parse_coordinate(raw: Option<&str>, field: &str) -> DomainResult<f64> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DomainError::invalid_query(format!("missing {field}")))?;

    raw.parse::<f64>()
        .map_err(|_| DomainError::invalid_query(format!("unparseable {field}: '{raw}'")))
}

/// Reduced store projection for map display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSummary {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub location: Location,
    pub photo: String,
}

impl From<&Store> for MapSummary {
    fn from(store: &Store) -> Self {
        Self {
            slug: store.slug.clone(),
            name: store.name.clone(),
            description: store.description.clone(),
            location: store.location.clone(),
            photo: store.photo.clone(),
        }
    }
}

/// A store annotated with its distance from a query origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreDistance {
    pub id: StoreId,
    pub name: String,
    /// Distance from the origin, in the requested unit.
    pub distance: f64,
}

/// Stores within `radius_m` meters of `origin` (default
/// [`DEFAULT_NEAR_RADIUS_M`]), nearest first, capped at [`NEAR_RESULT_CAP`],
/// projected for map display.
pub fn near(stores: &[Store], origin: GeoPoint, radius_m: Option<f64>) -> Vec<MapSummary> {
    let radius = radius_m.unwrap_or(DEFAULT_NEAR_RADIUS_M);

    let mut hits: Vec<(f64, &Store)> = stores
        .iter()
        .map(|s| (origin.distance_m(&s.location.point), s))
        .filter(|(d, _)| *d <= radius)
        .collect();
    hits.sort_by(|a, b| a.0.total_cmp(&b.0));

    hits.into_iter()
        .take(NEAR_RESULT_CAP)
        .map(|(_, s)| MapSummary::from(s))
        .collect()
}

/// Pure containment filter: stores inside the spherical cap of angular
/// radius `distance / reference-radius(unit)` around `origin`. The result
/// carries no distance ordering.
pub fn within_radius<'a>(
    stores: &'a [Store],
    origin: GeoPoint,
    distance: f64,
    unit: DistanceUnit,
) -> DomainResult<Vec<&'a Store>> {
    if !distance.is_finite() || distance < 0.0 {
        return Err(DomainError::invalid_query("radius must be non-negative"));
    }

    let angular = unit.angular_radius(distance);
    Ok(stores
        .iter()
        .filter(|s| origin.angular_distance(&s.location.point) <= angular)
        .collect())
}

/// Every store annotated with its distance from `origin` in `unit`, nearest
/// first (ascending is the natural order of this projection).
pub fn distances_from(stores: &[Store], origin: GeoPoint, unit: DistanceUnit) -> Vec<StoreDistance> {
    let multiplier = unit.meters_multiplier();

    let mut distances: Vec<StoreDistance> = stores
        .iter()
        .map(|s| StoreDistance {
            id: s.id,
            name: s.name.clone(),
            distance: origin.distance_m(&s.location.point) * multiplier,
        })
        .collect();
    distances.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    distances
}
