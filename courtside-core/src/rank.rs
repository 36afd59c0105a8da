//! Filter, measure and order records for display.
//!
//! [`rank`] runs the whole pipeline in one pass:
//!
//! 1. keep records whose selected fields contain the search text;
//! 2. measure each survivor from the origin, when one is given;
//! 3. drop survivors beyond `max_distance`, when set;
//! 4. sort by distance (ties by case-insensitive name), or apply the
//!    fallback order when there is no origin;
//! 5. truncate to `max_results`.
//!
//! Every sort is stable, so identical inputs always produce identical output.
//! Duplicate identifiers are kept as separate entries.

use std::cmp::Ordering;

use log::debug;

use crate::{Distance, FallbackOrder, PointOfInterest, Query, SearchText, distance_in};

/// A record together with its place in a ranking.
///
/// Results borrow from the input slice and live only as long as the ranking
/// that produced them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedResult<'a> {
    /// The ranked record.
    pub poi: &'a PointOfInterest,
    /// Distance from the query origin; `None` when the query had no origin.
    pub distance: Option<Distance>,
    /// One-based position in the final ordering.
    pub position: usize,
}

/// Rank `records` according to `query`.
///
/// An empty input yields an empty output.
///
/// # Examples
/// ```
/// use courtside_core::{GeoPoint, PointOfInterest, Query, rank};
///
/// # fn main() -> Result<(), courtside_core::GeoPointError> {
/// let records = vec![
///     PointOfInterest::new("la", "Pershing Square", "Los Angeles", GeoPoint::new(34.0522, -118.2437)?),
///     PointOfInterest::new("sf", "Civic Center", "San Francisco", GeoPoint::new(37.7749, -122.4194)?),
/// ];
/// let query = Query::new().with_origin(GeoPoint::new(37.7749, -122.4194)?);
/// let ranked = rank(&records, &query);
///
/// assert_eq!(ranked[0].poi.id, "sf");
/// assert_eq!(ranked[0].position, 1);
/// assert_eq!(ranked[1].distance.map(|d| d.to_string()).as_deref(), Some("347.4 mi"));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn rank<'a>(records: &'a [PointOfInterest], query: &Query) -> Vec<RankedResult<'a>> {
    let search = SearchText::new(query.search.as_deref().unwrap_or_default());

    let mut candidates: Vec<(&PointOfInterest, Option<Distance>)> = records
        .iter()
        .filter(|poi| search.matches(poi, &query.fields))
        .map(|poi| {
            let measured = query
                .origin
                .map(|origin| distance_in(origin, poi.location, query.unit));
            (poi, measured)
        })
        .filter(|(_, measured)| within_cap(*measured, query.max_distance))
        .collect();
    let matched = candidates.len();

    if query.origin.is_some() {
        candidates.sort_by(|(poi_a, dist_a), (poi_b, dist_b)| {
            compare_distance(*dist_a, *dist_b).then_with(|| compare_names(poi_a, poi_b))
        });
    } else if query.fallback_order == FallbackOrder::Alphabetical {
        candidates.sort_by(|(poi_a, _), (poi_b, _)| compare_names(poi_a, poi_b));
    }

    if let Some(limit) = query.max_results {
        candidates.truncate(limit);
    }

    debug!(
        "Ranked {} of {} records ({} matched, search {:?})",
        candidates.len(),
        records.len(),
        matched,
        search.as_str()
    );

    candidates
        .into_iter()
        .enumerate()
        .map(|(index, (poi, measured))| RankedResult {
            poi,
            distance: measured,
            position: index + 1,
        })
        .collect()
}

fn within_cap(measured: Option<Distance>, cap: Option<f64>) -> bool {
    match (measured, cap) {
        (Some(found), Some(limit)) => found.value <= limit,
        _ => true,
    }
}

fn compare_distance(a: Option<Distance>, b: Option<Distance>) -> Ordering {
    match (a, b) {
        (Some(left), Some(right)) => left.value.total_cmp(&right.value),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_names(a: &PointOfInterest, b: &PointOfInterest) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}
