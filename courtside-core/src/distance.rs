//! Great-circle distance on a spherical Earth.
//!
//! Distances use the haversine formula. [`distance`] reports miles with an
//! Earth radius of 3959 miles; [`distance_in`] and [`distance_with_radius`]
//! select other units.
//!
//! # Examples
//! ```
//! use courtside_core::{GeoPoint, distance};
//!
//! # fn main() -> Result<(), courtside_core::GeoPointError> {
//! let san_francisco = GeoPoint::new(37.7749, -122.4194)?;
//! let los_angeles = GeoPoint::new(34.0522, -118.2437)?;
//! let miles = distance(san_francisco, los_angeles);
//! assert!((miles - 347.4).abs() < 1.0);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::GeoPoint;

/// Mean Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KILOMETRES: f64 = 6371.0;

/// Errors raised while selecting a distance unit or radius.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistanceError {
    /// The unit name was not recognised.
    #[error("unknown distance unit '{name}' (expected 'mi' or 'km')")]
    UnknownUnit {
        /// Name supplied by the caller.
        name: String,
    },
    /// The sphere radius was zero, negative or not finite.
    #[error("sphere radius must be positive and finite, got {radius}")]
    InvalidRadius {
        /// Radius supplied by the caller.
        radius: f64,
    },
}

/// Unit in which distances are computed and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DistanceUnit {
    /// Statute miles.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "mi"))]
    Miles,
    /// Kilometres.
    #[cfg_attr(feature = "serde", serde(alias = "km"))]
    Kilometres,
}

impl DistanceUnit {
    /// Earth radius expressed in this unit.
    #[must_use]
    pub const fn radius(self) -> f64 {
        match self {
            Self::Miles => EARTH_RADIUS_MILES,
            Self::Kilometres => EARTH_RADIUS_KILOMETRES,
        }
    }

    /// Short suffix appended to formatted distances.
    ///
    /// # Examples
    /// ```
    /// use courtside_core::DistanceUnit;
    ///
    /// assert_eq!(DistanceUnit::Miles.suffix(), "mi");
    /// assert_eq!(DistanceUnit::Kilometres.suffix(), "km");
    /// ```
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Miles => "mi",
            Self::Kilometres => "km",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for DistanceUnit {
    type Err = DistanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mi" | "mile" | "miles" => Ok(Self::Miles),
            "km" | "kilometre" | "kilometres" | "kilometer" | "kilometers" => {
                Ok(Self::Kilometres)
            }
            _ => Err(DistanceError::UnknownUnit { name: s.to_owned() }),
        }
    }
}

/// A computed distance tagged with its unit.
///
/// Formats to one decimal place with the unit suffix, e.g. `347.4 mi`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Distance {
    /// Magnitude in `unit`.
    pub value: f64,
    /// Unit of `value`.
    pub unit: DistanceUnit,
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} {}", self.value, self.unit.suffix())
    }
}

/// Great-circle distance between `a` and `b` in miles.
///
/// Symmetric and zero for identical points.
#[must_use]
pub fn distance(a: GeoPoint, b: GeoPoint) -> f64 {
    haversine(a, b, EARTH_RADIUS_MILES)
}

/// Great-circle distance between `a` and `b` in `unit`.
#[must_use]
pub fn distance_in(a: GeoPoint, b: GeoPoint, unit: DistanceUnit) -> Distance {
    Distance {
        value: haversine(a, b, unit.radius()),
        unit,
    }
}

/// Great-circle distance on a sphere of the given `radius`.
///
/// The result is expressed in whatever unit `radius` uses.
///
/// # Errors
/// Returns [`DistanceError::InvalidRadius`] when `radius` is not a positive,
/// finite number.
pub fn distance_with_radius(a: GeoPoint, b: GeoPoint, radius: f64) -> Result<f64, DistanceError> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(DistanceError::InvalidRadius { radius });
    }
    Ok(haversine(a, b, radius))
}

#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
fn haversine(a: GeoPoint, b: GeoPoint, radius: f64) -> f64 {
    let lat_a = a.latitude().to_radians();
    let lat_b = b.latitude().to_radians();
    let half_d_lat = (b.latitude() - a.latitude()).to_radians() / 2.0;
    let half_d_lon = (b.longitude() - a.longitude()).to_radians() / 2.0;

    let unclamped =
        half_d_lat.sin().powi(2) + lat_a.cos() * lat_b.cos() * half_d_lon.sin().powi(2);
    // Rounding can push the haversine just past 1.0 for antipodal points.
    let h = unclamped.clamp(0.0, 1.0);
    let central_angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    radius * central_angle
}
