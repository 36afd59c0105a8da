//! Map ranked results to display-ready records.
//!
//! The adapter formats distances and ratings, passes hours and phone numbers
//! through, and classifies the occupancy count into a colour-coded
//! [`OccupancyTier`] using caller-supplied breakpoints. It performs no I/O.

use std::fmt;

use log::warn;
use thiserror::Error;

use crate::{ATTR_HOURS, ATTR_OCCUPANCY, ATTR_PHONE, ATTR_RATING, RankedResult};

/// Severity bucket for an occupancy count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OccupancyTier {
    /// Nobody present.
    Empty,
    /// A handful of people.
    Low,
    /// Moderately busy.
    Medium,
    /// Busy.
    High,
    /// Crowded.
    VeryHigh,
}

impl OccupancyTier {
    /// Human-readable label, e.g. `"very high"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very high",
        }
    }

    /// Badge colour as a `#RRGGBB` hex string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Empty => "#555555",
            Self::Low => "#4CAF50",
            Self::Medium => "#FFC107",
            Self::High => "#FF9800",
            Self::VeryHigh => "#F44336",
        }
    }
}

impl fmt::Display for OccupancyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Upper bound (inclusive) of an occupancy tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OccupancyBreakpoint {
    /// Largest count that still falls into `tier`.
    pub max: u64,
    /// Tier assigned to counts up to `max`.
    pub tier: OccupancyTier,
}

/// Errors returned by [`OccupancyColorPolicy::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OccupancyPolicyError {
    /// No breakpoints were supplied.
    #[error("occupancy policy needs at least one breakpoint")]
    Empty,
    /// Breakpoints were not strictly ascending.
    #[error("occupancy breakpoint {max} at index {index} does not exceed the previous one")]
    Unordered {
        /// Position of the offending breakpoint.
        index: usize,
        /// Its upper bound.
        max: u64,
    },
}

/// Table-driven mapping from occupancy counts to tiers.
///
/// A count falls into the first breakpoint whose `max` is at least the
/// count; counts above every breakpoint fall into the overflow tier.
///
/// # Examples
/// ```
/// use courtside_core::{OccupancyColorPolicy, OccupancyTier};
///
/// let policy = OccupancyColorPolicy::default();
/// assert_eq!(policy.tier_for(0), OccupancyTier::Empty);
/// assert_eq!(policy.tier_for(3), OccupancyTier::Low);
/// assert_eq!(policy.tier_for(30), OccupancyTier::VeryHigh);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OccupancyColorPolicy {
    breakpoints: Vec<OccupancyBreakpoint>,
    overflow: OccupancyTier,
}

impl OccupancyColorPolicy {
    /// Validate and construct a policy.
    ///
    /// # Errors
    /// Returns [`OccupancyPolicyError::Empty`] when `breakpoints` is empty and
    /// [`OccupancyPolicyError::Unordered`] when the upper bounds are not
    /// strictly ascending.
    pub fn new(
        breakpoints: Vec<OccupancyBreakpoint>,
        overflow: OccupancyTier,
    ) -> Result<Self, OccupancyPolicyError> {
        if breakpoints.is_empty() {
            return Err(OccupancyPolicyError::Empty);
        }
        for (index, pair) in breakpoints.windows(2).enumerate() {
            if let [previous, next] = pair
                && next.max <= previous.max
            {
                return Err(OccupancyPolicyError::Unordered {
                    index: index + 1,
                    max: next.max,
                });
            }
        }
        Ok(Self {
            breakpoints,
            overflow,
        })
    }

    /// Tier for a non-negative occupancy `count`.
    #[must_use]
    pub fn tier_for(&self, count: u64) -> OccupancyTier {
        self.breakpoints
            .iter()
            .find(|breakpoint| count <= breakpoint.max)
            .map_or(self.overflow, |breakpoint| breakpoint.tier)
    }

    /// The configured breakpoints in ascending order.
    #[must_use]
    pub const fn breakpoints(&self) -> &[OccupancyBreakpoint] {
        self.breakpoints.as_slice()
    }

    /// Tier for counts above every breakpoint.
    #[must_use]
    pub const fn overflow(&self) -> OccupancyTier {
        self.overflow
    }
}

impl Default for OccupancyColorPolicy {
    /// `0` empty, `1..=5` low, `6..=15` medium, `16..=25` high, above that
    /// very high.
    fn default() -> Self {
        Self {
            breakpoints: vec![
                OccupancyBreakpoint {
                    max: 0,
                    tier: OccupancyTier::Empty,
                },
                OccupancyBreakpoint {
                    max: 5,
                    tier: OccupancyTier::Low,
                },
                OccupancyBreakpoint {
                    max: 15,
                    tier: OccupancyTier::Medium,
                },
                OccupancyBreakpoint {
                    max: 25,
                    tier: OccupancyTier::High,
                },
            ],
            overflow: OccupancyTier::VeryHigh,
        }
    }
}

/// Errors returned by [`present`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresentError {
    /// An attribute the adapter interprets held an unusable value.
    #[error("record {id} has invalid {key} value '{value}'")]
    InvalidAttribute {
        /// Identifier of the affected record.
        id: String,
        /// Attribute key.
        key: &'static str,
        /// Raw attribute value.
        value: String,
    },
}

/// Colour-coded occupancy badge.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OccupancyBadge {
    /// Occupancy count.
    pub count: u64,
    /// Tier the count falls into.
    pub tier: OccupancyTier,
    /// Tier label.
    pub label: &'static str,
    /// Tier colour.
    pub color: &'static str,
}

/// A ranked record shaped for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DisplayRecord {
    /// Record identifier.
    pub id: String,
    /// One-based position in the ranking.
    pub position: usize,
    /// Display name.
    pub name: String,
    /// Address or description.
    pub address: String,
    /// Distance such as `"347.4 mi"`; absent without an origin.
    pub distance: Option<String>,
    /// Occupancy badge; absent when the record carries no count.
    pub occupancy: Option<OccupancyBadge>,
    /// Rating to one decimal place, or the raw value when not numeric.
    pub rating: Option<String>,
    /// Opening hours, unchanged.
    pub hours: Option<String>,
    /// Contact phone number, unchanged.
    pub phone: Option<String>,
}

/// Shape one ranked result for display.
///
/// # Errors
/// Returns [`PresentError::InvalidAttribute`] when the occupancy attribute is
/// negative or not an integer.
///
/// # Examples
/// ```
/// use courtside_core::{
///     ATTR_OCCUPANCY, GeoPoint, OccupancyColorPolicy, OccupancyTier, PointOfInterest, Query,
///     present, rank,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let records = vec![
///     PointOfInterest::new("d", "Downtown Courts", "Main St", GeoPoint::new(34.05, -118.24)?)
///         .with_attribute(ATTR_OCCUPANCY, "30"),
/// ];
/// let ranked = rank(&records, &Query::new());
/// let record = present(&ranked[0], &OccupancyColorPolicy::default())?;
/// assert_eq!(record.occupancy.map(|badge| badge.tier), Some(OccupancyTier::VeryHigh));
/// assert!(record.distance.is_none());
/// # Ok(())
/// # }
/// ```
pub fn present(
    result: &RankedResult<'_>,
    thresholds: &OccupancyColorPolicy,
) -> Result<DisplayRecord, PresentError> {
    let poi = result.poi;
    let occupancy = poi
        .attribute(ATTR_OCCUPANCY)
        .map(|raw| {
            let count = parse_count(raw).ok_or_else(|| PresentError::InvalidAttribute {
                id: poi.id.clone(),
                key: ATTR_OCCUPANCY,
                value: raw.to_owned(),
            })?;
            let tier = thresholds.tier_for(count);
            Ok(OccupancyBadge {
                count,
                tier,
                label: tier.label(),
                color: tier.color(),
            })
        })
        .transpose()?;

    Ok(DisplayRecord {
        id: poi.id.clone(),
        position: result.position,
        name: poi.name.clone(),
        address: poi.address.clone(),
        distance: result.distance.map(|measured| measured.to_string()),
        occupancy,
        rating: poi.attribute(ATTR_RATING).map(format_rating),
        hours: poi.attribute(ATTR_HOURS).map(str::to_owned),
        phone: poi.attribute(ATTR_PHONE).map(str::to_owned),
    })
}

/// Batch presentation with a configurable policy for malformed records.
///
/// With `skip_invalid_records` set, records that fail [`present`] are logged
/// and left out; their neighbours keep their original positions. Otherwise
/// the first failure aborts the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presenter {
    thresholds: OccupancyColorPolicy,
    skip_invalid_records: bool,
}

impl Presenter {
    /// Construct a presenter that fails on malformed records.
    #[must_use]
    pub const fn new(thresholds: OccupancyColorPolicy) -> Self {
        Self {
            thresholds,
            skip_invalid_records: false,
        }
    }

    /// Choose whether malformed records are skipped instead of failing.
    #[must_use]
    pub const fn with_skip_invalid_records(mut self, skip: bool) -> Self {
        self.skip_invalid_records = skip;
        self
    }

    /// Shape every result in `results`.
    ///
    /// # Errors
    /// Returns the first [`PresentError`] unless invalid records are skipped.
    pub fn present_all(
        &self,
        results: &[RankedResult<'_>],
    ) -> Result<Vec<DisplayRecord>, PresentError> {
        let mut records = Vec::with_capacity(results.len());
        for result in results {
            match present(result, &self.thresholds) {
                Ok(record) => records.push(record),
                Err(err) if self.skip_invalid_records => {
                    warn!("Skipping record at position {}: {err}", result.position);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(records)
    }
}

fn parse_count(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}

fn format_rating(raw: &str) -> String {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|rating| rating.is_finite())
        .map_or_else(|| raw.to_owned(), |rating| format!("{rating:.1}"))
}
