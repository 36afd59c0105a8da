//! Core ranking and filtering for the Courtside engine.
//!
//! Records carry a validated [`GeoPoint`], a name, an address and free-form
//! attributes. [`rank`] filters them by case-insensitive text, measures the
//! great-circle distance from an optional origin and orders the survivors.
//! [`present`] shapes a ranked result for display, classifying occupancy with
//! an [`OccupancyColorPolicy`].
//!
//! Everything here is pure and synchronous; fetching records and locating the
//! caller are left to the embedding application.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod distance;
mod geo_point;
mod poi;
mod present;
mod query;
mod rank;
mod text;
mod timestamp;

pub use distance::{
    Distance, DistanceError, DistanceUnit, EARTH_RADIUS_KILOMETRES, EARTH_RADIUS_MILES, distance,
    distance_in, distance_with_radius,
};
pub use geo_point::{GeoPoint, GeoPointError, LATITUDE_RANGE, LONGITUDE_RANGE};
pub use poi::{ATTR_HOURS, ATTR_OCCUPANCY, ATTR_PHONE, ATTR_RATING, Attributes, PointOfInterest};
pub use present::{
    DisplayRecord, OccupancyBadge, OccupancyBreakpoint, OccupancyColorPolicy,
    OccupancyPolicyError, OccupancyTier, PresentError, Presenter, present,
};
pub use query::{FallbackOrder, Query};
pub use rank::{RankedResult, rank};
pub use text::{SearchField, SearchText, matches};
pub use timestamp::{RelativeTime, format_relative};
