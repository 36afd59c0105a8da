//! Ranking queries.
//!
//! A [`Query`] gathers everything [`rank`](crate::rank) needs besides the
//! records themselves: the optional origin, search text, result caps and the
//! ordering used when no origin is known.

use crate::{DistanceUnit, GeoPoint, SearchField};

/// Ordering applied when a query has no origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FallbackOrder {
    /// Keep records in the order they were supplied.
    #[default]
    AsGiven,
    /// Sort by name, ignoring case.
    Alphabetical,
}

/// Parameters for a single ranking pass.
///
/// # Examples
/// ```
/// use courtside_core::{DistanceUnit, GeoPoint, Query};
///
/// # fn main() -> Result<(), courtside_core::GeoPointError> {
/// let query = Query::new()
///     .with_origin(GeoPoint::new(37.7749, -122.4194)?)
///     .with_search("court")
///     .with_max_results(10)
///     .with_unit(DistanceUnit::Kilometres);
/// assert_eq!(query.max_results, Some(10));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Query {
    /// Caller location. Without it no distances are computed.
    pub origin: Option<GeoPoint>,
    /// Free-text filter; blank or absent keeps every record.
    pub search: Option<String>,
    /// Fields the search text is matched against.
    pub fields: Vec<SearchField>,
    /// Keep at most this many results.
    pub max_results: Option<usize>,
    /// Drop results farther than this, in `unit`. Ignored without an origin.
    pub max_distance: Option<f64>,
    /// Unit for computed distances.
    pub unit: DistanceUnit,
    /// Ordering used when `origin` is absent.
    pub fallback_order: FallbackOrder,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            origin: None,
            search: None,
            fields: SearchField::defaults(),
            max_results: None,
            max_distance: None,
            unit: DistanceUnit::default(),
            fallback_order: FallbackOrder::default(),
        }
    }
}

impl Query {
    /// A query that keeps every record in input order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank by distance from `origin`.
    #[must_use]
    pub const fn with_origin(mut self, origin: GeoPoint) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Set the origin from an optional location fix.
    ///
    /// Location providers report permission-denied or unavailable as `None`.
    #[must_use]
    pub const fn with_optional_origin(mut self, origin: Option<GeoPoint>) -> Self {
        self.origin = origin;
        self
    }

    /// Filter by `search` text.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Match the search text against `fields` instead of name and address.
    #[must_use]
    pub fn with_fields(mut self, fields: Vec<SearchField>) -> Self {
        self.fields = fields;
        self
    }

    /// Cap the number of results.
    #[must_use]
    pub const fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Drop results farther than `max_distance` (in the query unit).
    #[must_use]
    pub const fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = Some(max_distance);
        self
    }

    /// Compute distances in `unit`.
    #[must_use]
    pub const fn with_unit(mut self, unit: DistanceUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Choose the ordering used without an origin.
    #[must_use]
    pub const fn with_fallback_order(mut self, fallback_order: FallbackOrder) -> Self {
        self.fallback_order = fallback_order;
        self
    }
}
