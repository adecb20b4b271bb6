//! Human-readable renderings shared by list commands.

use chrono::{DateTime, Utc};

/// Shown in place of an age when a resource has no creation timestamp.
pub const MISSING: &str = "---";

const SECOND: i64 = 1;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 12 * MONTH;
const LONG_TIME: i64 = 37 * YEAR;

/// How a magnitude bucket renders its count.
enum Unit {
    /// Fixed text, no count.
    Fixed(&'static str),
    /// `{n} {plural}`, with `n = seconds / divisor`.
    Count(i64, &'static str),
}

/// Upper bound (exclusive, in seconds) and rendering for each bucket.
const MAGNITUDES: &[(i64, Unit)] = &[
    (SECOND, Unit::Fixed("now")),
    (2 * SECOND, Unit::Fixed("1 second")),
    (MINUTE, Unit::Count(SECOND, "seconds")),
    (2 * MINUTE, Unit::Fixed("1 minute")),
    (HOUR, Unit::Count(MINUTE, "minutes")),
    (2 * HOUR, Unit::Fixed("1 hour")),
    (DAY, Unit::Count(HOUR, "hours")),
    (2 * DAY, Unit::Fixed("1 day")),
    (WEEK, Unit::Count(DAY, "days")),
    (2 * WEEK, Unit::Fixed("1 week")),
    (MONTH, Unit::Count(WEEK, "weeks")),
    (2 * MONTH, Unit::Fixed("1 month")),
    (YEAR, Unit::Count(MONTH, "months")),
    (18 * MONTH, Unit::Fixed("1 year")),
    (2 * YEAR, Unit::Fixed("2 years")),
    (LONG_TIME, Unit::Count(YEAR, "years")),
    (i64::MAX, Unit::Fixed("a long while")),
];

/// Relative time between `then` and `now`, e.g. `20 seconds ago`.
///
/// Counts are truncated, so 119 seconds is still `1 minute ago`. Times after
/// `now` read `... from now`.
#[must_use]
pub fn age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(then).num_seconds();
    let (seconds, suffix) = if diff < 0 { (-diff, "from now") } else { (diff, "ago") };

    let unit = MAGNITUDES
        .iter()
        .find(|(bound, _)| seconds < *bound)
        .map_or(&MAGNITUDES[MAGNITUDES.len() - 1].1, |(_, unit)| unit);

    match unit {
        Unit::Fixed("now") => "now".to_string(),
        Unit::Fixed(text) => format!("{text} {suffix}"),
        Unit::Count(divisor, plural) => format!("{} {plural} {suffix}", seconds / divisor),
    }
}

/// [`age`] for an optional timestamp, falling back to [`MISSING`].
#[must_use]
pub fn optional_age(then: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    then.map_or_else(|| MISSING.to_string(), |then| age(then, now))
}
