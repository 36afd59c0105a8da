//! Coarse relative-time labels such as "5m ago".

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

/// How long ago an event happened, bucketed for display.
///
/// Buckets are chosen on the elapsed time between the event and "now":
/// under a minute is [`RelativeTime::JustNow`], then whole minutes below an
/// hour, whole hours below a day and whole days below a week. Anything older
/// is shown as the calendar date of the event. Events in the future count as
/// just now.
///
/// # Examples
/// ```
/// use chrono::{TimeDelta, TimeZone, Utc};
/// use courtside_core::RelativeTime;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let now = Utc
///     .with_ymd_and_hms(2024, 3, 10, 12, 0, 0)
///     .single()
///     .ok_or("ambiguous timestamp")?;
/// let then = now - TimeDelta::minutes(5);
/// assert_eq!(RelativeTime::between(then, now).to_string(), "5m ago");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeTime {
    /// Less than a minute ago.
    JustNow,
    /// Whole minutes, `1..=59`.
    Minutes(i64),
    /// Whole hours, `1..=23`.
    Hours(i64),
    /// Whole days, `1..=6`.
    Days(i64),
    /// A week or more ago; the event's date.
    Date(NaiveDate),
}

impl RelativeTime {
    /// Bucket the time elapsed from `then` to `now`.
    #[must_use]
    pub fn between(then: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let elapsed = now.signed_duration_since(then);
        if elapsed < TimeDelta::minutes(1) {
            Self::JustNow
        } else if elapsed < TimeDelta::hours(1) {
            Self::Minutes(elapsed.num_minutes())
        } else if elapsed < TimeDelta::days(1) {
            Self::Hours(elapsed.num_hours())
        } else if elapsed < TimeDelta::weeks(1) {
            Self::Days(elapsed.num_days())
        } else {
            Self::Date(then.date_naive())
        }
    }
}

impl fmt::Display for RelativeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JustNow => f.write_str("Just now"),
            Self::Minutes(minutes) => write!(f, "{minutes}m ago"),
            Self::Hours(hours) => write!(f, "{hours}h ago"),
            Self::Days(days) => write!(f, "{days}d ago"),
            Self::Date(date) => write!(f, "{}", date.format("%-m/%-d/%Y")),
        }
    }
}

/// Render the time elapsed from `then` to `now` as a display label.
#[must_use]
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    RelativeTime::between(then, now).to_string()
}
