//! Case-insensitive substring filtering over record fields.
//!
//! A query matches a record when any of the selected fields contains the
//! query, ignoring case. Blank queries match everything.
//!
//! # Examples
//! ```
//! use courtside_core::{GeoPoint, PointOfInterest, SearchField, matches};
//!
//! # fn main() -> Result<(), courtside_core::GeoPointError> {
//! let court = PointOfInterest::new("1", "Court A", "Main St", GeoPoint::new(0.0, 0.0)?);
//! assert!(matches(&court, "court a", &[SearchField::Name]));
//! assert!(matches(&court, "   ", &[SearchField::Name]));
//! assert!(!matches(&court, "main", &[SearchField::Name]));
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use crate::PointOfInterest;

const ATTRIBUTE_PREFIX: &str = "attr:";

/// A record field consulted by the text filter.
///
/// Serialises as the same text accepted by [`FromStr`]: `name`, `address`
/// or `attr:<key>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum SearchField {
    /// [`PointOfInterest::name`].
    Name,
    /// [`PointOfInterest::address`].
    Address,
    /// A named entry in [`PointOfInterest::attributes`].
    Attribute(String),
}

impl SearchField {
    /// Fields searched when the caller does not choose any: name, then address.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![Self::Name, Self::Address]
    }

    /// Read this field from `poi`.
    ///
    /// Returns `None` for attributes the record does not carry.
    #[must_use]
    pub fn value<'a>(&self, poi: &'a PointOfInterest) -> Option<&'a str> {
        match self {
            Self::Name => Some(poi.name.as_str()),
            Self::Address => Some(poi.address.as_str()),
            Self::Attribute(key) => poi.attribute(key),
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => f.write_str("name"),
            Self::Address => f.write_str("address"),
            Self::Attribute(key) => write!(f, "{ATTRIBUTE_PREFIX}{key}"),
        }
    }
}

impl FromStr for SearchField {
    type Err = String;

    /// Parse `name`, `address` or `attr:<key>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(key) = trimmed.strip_prefix(ATTRIBUTE_PREFIX) {
            if key.is_empty() {
                return Err(format!("search field '{s}' names no attribute"));
            }
            return Ok(Self::Attribute(key.to_owned()));
        }
        match trimmed.to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "address" => Ok(Self::Address),
            _ => Err(format!("unknown search field '{s}'")),
        }
    }
}

impl TryFrom<String> for SearchField {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SearchField> for String {
    fn from(field: SearchField) -> Self {
        field.to_string()
    }
}

/// A normalised search string.
///
/// Surrounding whitespace is trimmed and the text is lowercased once, so a
/// single query can be checked against many records cheaply.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchText {
    needle: String,
}

impl SearchText {
    /// Normalise `raw` for matching.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self {
            needle: fold(raw.trim()),
        }
    }

    /// Whether the query is blank and therefore matches everything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// The normalised query text.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.needle.as_str()
    }

    /// Whether any of `fields` on `poi` contains this query.
    ///
    /// A blank query matches every record, even when `fields` is empty.
    #[must_use]
    pub fn matches(&self, poi: &PointOfInterest, fields: &[SearchField]) -> bool {
        if self.is_empty() {
            return true;
        }
        fields
            .iter()
            .filter_map(|field| field.value(poi))
            .any(|value| fold(value).contains(self.needle.as_str()))
    }
}

/// Whether `record` matches `query` on any of `fields`.
///
/// Matching is case-insensitive substring containment. An empty or
/// whitespace-only query matches every record.
#[must_use]
pub fn matches(record: &PointOfInterest, query: &str, fields: &[SearchField]) -> bool {
    SearchText::new(query).matches(record, fields)
}

fn fold(s: &str) -> String {
    s.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoPoint;
    use rstest::{fixture, rstest};

    #[fixture]
    fn court() -> PointOfInterest {
        let location = GeoPoint::new(33.9850, -118.4695).expect("valid coordinate");
        PointOfInterest::new("venice", "Venice Courts", "Ocean Front Walk, Los Angeles", location)
            .with_attribute("hours", "6:00 am - 10:00 pm")
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn blank_query_matches_everything(court: PointOfInterest, #[case] query: &str) {
        assert!(matches(&court, query, &[]));
        assert!(matches(&court, query, &SearchField::defaults()));
    }

    #[rstest]
    #[case("venice courts")]
    #[case("VENICE")]
    #[case("Courts")]
    #[case("  venice  ")]
    fn name_matching_ignores_case(court: PointOfInterest, #[case] query: &str) {
        assert!(matches(&court, query, &[SearchField::Name]));
    }

    #[rstest]
    fn searches_union_of_fields(court: PointOfInterest) {
        assert!(!matches(&court, "los angeles", &[SearchField::Name]));
        assert!(matches(&court, "los angeles", &SearchField::defaults()));
    }

    #[rstest]
    fn attributes_are_searchable_when_selected(court: PointOfInterest) {
        let fields = [SearchField::Attribute("hours".into())];
        assert!(matches(&court, "10:00 PM", &fields));
        let missing = [SearchField::Attribute("phone".into())];
        assert!(!matches(&court, "555", &missing));
    }

    #[rstest]
    fn non_blank_query_with_no_fields_matches_nothing(court: PointOfInterest) {
        assert!(!matches(&court, "venice", &[]));
    }

    #[rstest]
    fn matching_does_not_mutate_the_record(court: PointOfInterest) {
        let before = court.clone();
        let _matched = matches(&court, "VENICE", &SearchField::defaults());
        assert_eq!(court, before);
    }

    #[rstest]
    #[case("name", SearchField::Name)]
    #[case("Address", SearchField::Address)]
    #[case("attr:hours", SearchField::Attribute("hours".into()))]
    fn parses_field_names(#[case] raw: &str, #[case] expected: SearchField) {
        assert_eq!(raw.parse::<SearchField>(), Ok(expected.clone()));
        assert_eq!(expected.to_string().parse::<SearchField>(), Ok(expected));
    }

    #[rstest]
    #[case("phone")]
    #[case("attr:")]
    fn rejects_unknown_fields(#[case] raw: &str) {
        assert!(raw.parse::<SearchField>().is_err());
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn serde_uses_the_command_line_spelling() {
        let fields: Vec<SearchField> =
            serde_json::from_str(r#"["name", "attr:hours"]"#).expect("fields should decode");
        assert_eq!(
            fields,
            vec![SearchField::Name, SearchField::Attribute("hours".into())]
        );
        let encoded = serde_json::to_value(&fields).expect("fields should encode");
        assert_eq!(encoded, serde_json::json!(["name", "attr:hours"]));
        assert!(serde_json::from_str::<SearchField>(r#""phone""#).is_err());
    }
}
