//! Facade crate for the Courtside ranking engine.
//!
//! This crate re-exports the core domain types so applications can depend on
//! a single crate.

#![forbid(unsafe_code)]

pub use courtside_core::{
    Attributes, DisplayRecord, Distance, DistanceError, DistanceUnit, FallbackOrder, GeoPoint,
    GeoPointError, OccupancyBadge, OccupancyBreakpoint, OccupancyColorPolicy,
    OccupancyPolicyError, OccupancyTier, PointOfInterest, PresentError, Presenter, Query,
    RankedResult, RelativeTime, SearchField, distance, distance_in, format_relative, matches,
    present, rank,
};
