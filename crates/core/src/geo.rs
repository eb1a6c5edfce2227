//! Geospatial value objects: coordinates, locations, distance units.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Mean earth radius in meters, used for surface (haversine) distances.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Equatorial radius in kilometers, used to convert a km radius to an
/// angular radius for spherical-cap containment.
pub const EARTH_RADIUS_KM: f64 = 6378.1;

/// Equatorial radius in miles, used to convert a mile radius to an
/// angular radius for spherical-cap containment.
pub const EARTH_RADIUS_MI: f64 = 3963.2;

/// WGS84 coordinate pair, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    /// Validate and construct a coordinate pair.
    pub fn new(longitude: f64, latitude: f64) -> DomainResult<Self> {
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::validation("longitude out of range"));
        }
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::validation("latitude out of range"));
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Great-circle distance to `other`, in meters.
    pub fn distance_m(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlng = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }

    /// Central angle to `other`, in radians.
    pub fn angular_distance(&self, other: &GeoPoint) -> f64 {
        self.distance_m(other) / EARTH_RADIUS_M
    }
}

/// Distance unit accepted by radius and distance-projection queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    Km,
    Mi,
}

impl DistanceUnit {
    /// Convert a surface distance in this unit to an angular radius
    /// (radians) on the reference sphere for the unit.
    pub fn angular_radius(self, distance: f64) -> f64 {
        match self {
            DistanceUnit::Km => distance / EARTH_RADIUS_KM,
            DistanceUnit::Mi => distance / EARTH_RADIUS_MI,
        }
    }

    /// Multiplier from meters to this unit.
    pub fn meters_multiplier(self) -> f64 {
        match self {
            DistanceUnit::Km => 0.001,
            DistanceUnit::Mi => 0.000_621_371,
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "km" => Ok(DistanceUnit::Km),
            "mi" => Ok(DistanceUnit::Mi),
            other => Err(DomainError::invalid_query(format!(
                "unknown distance unit '{other}' (expected 'km' or 'mi')"
            ))),
        }
    }
}

/// A physical location: coordinates plus a human-readable address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub point: GeoPoint,
    pub address: String,
}

impl Location {
    pub fn new(point: GeoPoint, address: impl Into<String>) -> DomainResult<Self> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(DomainError::validation("an address must be supplied"));
        }
        Ok(Self {
            point,
            address: address.trim().to_string(),
        })
    }
}
