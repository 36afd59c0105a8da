use std::collections::BTreeMap;

use crate::GeoPoint;

/// Free-form display attributes attached to a [`PointOfInterest`].
///
/// The engine treats these as opaque strings. Only the occupancy, rating,
/// hours and phone keys are read, and only by the presentation adapter.
pub type Attributes = BTreeMap<String, String>;

/// Attribute key holding the current occupancy count (e.g. players on court).
pub const ATTR_OCCUPANCY: &str = "occupancy";
/// Attribute key holding a numeric rating.
pub const ATTR_RATING: &str = "rating";
/// Attribute key holding an opening-hours string.
pub const ATTR_HOURS: &str = "hours";
/// Attribute key holding a contact phone number.
pub const ATTR_PHONE: &str = "phone";

/// A named, located record to be ranked, such as a basketball court.
///
/// # Examples
/// ```
/// use courtside_core::{ATTR_OCCUPANCY, GeoPoint, PointOfInterest};
///
/// # fn main() -> Result<(), courtside_core::GeoPointError> {
/// let court = PointOfInterest::new(
///     "venice",
///     "Venice Courts",
///     "1800 Ocean Front Walk",
///     GeoPoint::new(33.9850, -118.4695)?,
/// )
/// .with_attribute(ATTR_OCCUPANCY, "3");
///
/// assert_eq!(court.attribute(ATTR_OCCUPANCY), Some("3"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointOfInterest {
    /// Identifier, unique within one result set.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Street address or free-text description.
    pub address: String,
    /// Geographic position.
    pub location: GeoPoint,
    /// Opaque display payload.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: Attributes,
}

impl PointOfInterest {
    /// Construct a `PointOfInterest` without attributes.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        location: GeoPoint,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            location,
            attributes: Attributes::new(),
        }
    }

    /// Add or replace an attribute while returning `self` for chaining.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Return an attribute value, if present.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}
