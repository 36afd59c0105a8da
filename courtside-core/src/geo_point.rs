//! Validated WGS84 coordinates.
//!
//! A [`GeoPoint`] can only be built through [`GeoPoint::new`] (or
//! deserialised through the same check), so every value in circulation lies
//! inside the latitude and longitude ranges.

use std::fmt;
use std::ops::RangeInclusive;

use geo::{Coord, Point};
use thiserror::Error;

/// Valid latitudes in degrees.
pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitudes in degrees.
pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// Errors returned by [`GeoPoint::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoPointError {
    /// Latitude or longitude fell outside its valid range, or was not finite.
    #[error("invalid coordinate ({latitude}, {longitude}): latitude must be within -90..=90 and longitude within -180..=180")]
    InvalidCoordinate {
        /// Latitude as supplied by the caller.
        latitude: f64,
        /// Longitude as supplied by the caller.
        longitude: f64,
    },
}

/// A latitude/longitude pair in degrees.
///
/// # Examples
/// ```
/// use courtside_core::GeoPoint;
///
/// # fn main() -> Result<(), courtside_core::GeoPointError> {
/// let san_francisco = GeoPoint::new(37.7749, -122.4194)?;
/// assert_eq!(san_francisco.latitude(), 37.7749);
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGeoPoint"))]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Validate and construct a [`GeoPoint`].
    ///
    /// # Errors
    /// Returns [`GeoPointError::InvalidCoordinate`] when either component is
    /// out of range or `NaN`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoPointError> {
        if LATITUDE_RANGE.contains(&latitude) && LONGITUDE_RANGE.contains(&longitude) {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(GeoPointError::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

// `geo` stores x = longitude and y = latitude.
impl From<GeoPoint> for Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        Self {
            x: point.longitude,
            y: point.latitude,
        }
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(point: GeoPoint) -> Self {
        Self::new(point.longitude, point.latitude)
    }
}

impl TryFrom<Coord<f64>> for GeoPoint {
    type Error = GeoPointError;

    fn try_from(coord: Coord<f64>) -> Result<Self, Self::Error> {
        Self::new(coord.y, coord.x)
    }
}

impl TryFrom<Point<f64>> for GeoPoint {
    type Error = GeoPointError;

    fn try_from(point: Point<f64>) -> Result<Self, Self::Error> {
        Self::new(point.y(), point.x())
    }
}

/// Unvalidated wire shape used while deserialising a [`GeoPoint`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = GeoPointError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}
