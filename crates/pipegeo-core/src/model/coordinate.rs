// crates/pipegeo-core/src/model/coordinate.rs
use crate::common::EntityId;
use crate::error::{GeoError, Result};
use serde::{Deserialize, Serialize};

pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        GeoPoint {
            latitude,
            longitude,
        }
    }

    /// Finite and within [`MIN_LAT`]..=[`MAX_LAT`]. NaN is never valid.
    #[inline]
    pub fn latitude_in_range(&self) -> bool {
        (MIN_LAT..=MAX_LAT).contains(&self.latitude)
    }

    /// Finite and within [`MIN_LON`]..=[`MAX_LON`]. NaN is never valid.
    #[inline]
    pub fn longitude_in_range(&self) -> bool {
        (MIN_LON..=MAX_LON).contains(&self.longitude)
    }

    /// Latitude is checked first, so a point wrong on both axes reports
    /// [`GeoError::InvalidLatitude`].
    pub fn check(&self) -> Result<()> {
        if !self.latitude_in_range() {
            return Err(GeoError::InvalidLatitude(self.latitude));
        }
        if !self.longitude_in_range() {
            return Err(GeoError::InvalidLongitude(self.longitude));
        }
        Ok(())
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        GeoPoint::new(latitude, longitude)
    }
}

/// One waypoint on the route of a linear asset (pipeline).
///
/// `infrastructure_id` is optional on the wire so that a missing owner shows
/// up as a validation error rather than a decode failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub sequence: i64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub elevation: Option<f64>,
    #[serde(default)]
    pub infrastructure_id: Option<EntityId>,
}

impl Coordinate {
    pub fn new(sequence: i64, latitude: f64, longitude: f64) -> Self {
        Coordinate {
            id: None,
            sequence,
            latitude,
            longitude,
            elevation: None,
            infrastructure_id: None,
        }
    }

    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }

    pub fn on_infrastructure(mut self, infrastructure_id: EntityId) -> Self {
        self.infrastructure_id = Some(infrastructure_id);
        self
    }

    #[inline]
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

impl From<&Coordinate> for GeoPoint {
    fn from(c: &Coordinate) -> Self {
        c.point()
    }
}
