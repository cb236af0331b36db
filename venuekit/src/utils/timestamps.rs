//! Parsing of loosely delimited ISO-like timestamps.
//!
//! The accepted shape is seven groups of ASCII digits separated by arbitrary
//! runs of anything else: `year, month, day, hour, minute, second,
//! millisecond`. Separators carry no meaning, so `Z`, `+hh:mm` and `.` are
//! all ignored and the instant is always read as UTC.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// A parsed instant, anchored to UTC.
pub type Timestamp = DateTime<Utc>;

/// Largest distance from the epoch, in milliseconds, that still denotes a date.
pub const MAX_EPOCH_MILLIS: i64 = 8_640_000_000_000_000;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_DAY: i64 = 86_400_000;
/// Days from 0000-03-01 to 1970-01-01.
const UNIX_EPOCH_DAY: i64 = 719_468;

const FIELD_NAMES: [&str; 7] = [
    "year",
    "month",
    "day",
    "hour",
    "minute",
    "second",
    "millisecond",
];

/// Errors describing why a timestamp string does not denote a date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    /// Fewer than seven numeric groups were present.
    #[error("Missing {0} field")]
    MissingField(&'static str),

    /// A numeric group does not fit in 64 bits.
    #[error("Numeric {field} field is too large: {value}")]
    Overflow {
        /// Name of the offending field.
        field: &'static str,
        /// The raw digits.
        value: String,
    },

    /// The combined fields land outside the representable range.
    #[error("Timestamp out of range")]
    OutOfRange,

    /// A valid date that [`Timestamp`] cannot hold (years past ±262143).
    #[error("Timestamp {0} ms from the epoch is beyond the supported calendar")]
    Unrepresentable(i64),
}

/// The seven positional fields of a timestamp string.
///
/// `month` is already zero-based. Values are not range-checked: overflow
/// is carried into the next larger unit when the instant is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampFields {
    /// Calendar year as written.
    pub year: i64,
    /// Zero-based month index.
    pub month: i64,
    /// Day of the month.
    pub day: i64,
    /// Hour of the day.
    pub hour: i64,
    /// Minute of the hour.
    pub minute: i64,
    /// Second of the minute.
    pub second: i64,
    /// Milliseconds, taken as an integer count rather than a fraction.
    pub millisecond: i64,
}

#[allow(clippy::expect_used)]
fn separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new("[^0-9]+").expect("separator pattern is valid"))
}

/// Converts one split token to a number. The empty token reads as zero.
fn token_value(field: &'static str, token: &str) -> Result<i64, TimestampError> {
    if token.is_empty() {
        return Ok(0);
    }
    token.parse::<i64>().map_err(|_| TimestampError::Overflow {
        field,
        value: token.to_string(),
    })
}

impl TimestampFields {
    /// Splits `input` into its positional fields.
    ///
    /// Tokens beyond the seventh are ignored.
    pub fn split(input: &str) -> Result<Self, TimestampError> {
        let mut values = [0_i64; 7];
        let mut tokens = separator().split(input);

        for (slot, field) in values.iter_mut().zip(FIELD_NAMES) {
            let token = tokens.next().ok_or(TimestampError::MissingField(field))?;
            *slot = token_value(field, token)?;
        }

        let [year, written_month, day, hour, minute, second, millisecond] = values;
        let month = written_month - 1;

        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
        })
    }

    /// Milliseconds since the Unix epoch for these fields.
    ///
    /// Years `0..=99` are read as `1900..=1999`.
    pub fn epoch_millis(&self) -> Result<i64, TimestampError> {
        let year = if (0..=99).contains(&self.year) {
            1900 + self.year
        } else {
            self.year
        };

        let day = days_from_epoch(year, self.month, self.day)?;
        let time = time_of_day(self.hour, self.minute, self.second, self.millisecond)?;

        let millis = day
            .checked_mul(MS_PER_DAY)
            .and_then(|ms| ms.checked_add(time))
            .ok_or(TimestampError::OutOfRange)?;

        if millis.abs() > MAX_EPOCH_MILLIS {
            return Err(TimestampError::OutOfRange);
        }
        Ok(millis)
    }

    /// Builds the UTC instant for these fields.
    ///
    /// Dates that [`epoch_millis`](Self::epoch_millis) accepts but that lie
    /// beyond chrono's calendar give [`TimestampError::Unrepresentable`].
    pub fn to_timestamp(&self) -> Result<Timestamp, TimestampError> {
        let millis = self.epoch_millis()?;
        DateTime::from_timestamp_millis(millis).ok_or(TimestampError::Unrepresentable(millis))
    }
}

/// Years outside this range have no day number, whatever the day offset.
const MAX_YEAR: i64 = 1_000_000;

/// Day number of `day` in month `month` (zero-based, may overflow) of `year`.
fn days_from_epoch(year: i64, month: i64, day: i64) -> Result<i64, TimestampError> {
    let year = year
        .checked_add(month.div_euclid(12))
        .filter(|y| y.abs() <= MAX_YEAR)
        .ok_or(TimestampError::OutOfRange)?;
    let month = month.rem_euclid(12);

    // Days to the first of the month, counting years from March so the
    // leap day falls at the end.
    let shifted_year = if month < 2 { year - 1 } else { year };
    let era = shifted_year.div_euclid(400);
    let year_of_era = shifted_year.rem_euclid(400);
    let day_of_year = (153 * ((month + 10) % 12) + 2) / 5;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    let first_day = era * 146_097 + day_of_era - UNIX_EPOCH_DAY;

    first_day
        .checked_add(day)
        .and_then(|d| d.checked_sub(1))
        .ok_or(TimestampError::OutOfRange)
}

fn time_of_day(hour: i64, minute: i64, second: i64, millisecond: i64) -> Result<i64, TimestampError> {
    let parts = [
        hour.checked_mul(MS_PER_HOUR),
        minute.checked_mul(MS_PER_MINUTE),
        second.checked_mul(MS_PER_SECOND),
        Some(millisecond),
    ];
    parts
        .into_iter()
        .try_fold(0_i64, |acc, part| part.and_then(|p| acc.checked_add(p)))
        .ok_or(TimestampError::OutOfRange)
}

/// Parses a timestamp, reporting why it is invalid.
///
/// # Examples
///
/// ```
/// use chrono::{Datelike, Timelike};
/// use venuekit::utils::try_parse_iso_string;
///
/// let ts = try_parse_iso_string("2021-03-15T10:30:00.500Z").unwrap();
/// assert_eq!(ts.month0(), 2);
/// assert_eq!(ts.nanosecond(), 500_000_000);
/// ```
pub fn try_parse_iso_string(input: &str) -> Result<Timestamp, TimestampError> {
    TimestampFields::split(input)?.to_timestamp()
}

/// Parses a timestamp, yielding `None` for an invalid date.
///
/// Malformed input never panics and never errors; the only signal is the
/// absence of a value. See [`try_parse_iso_string`] for the reason.
#[must_use]
pub fn parse_iso_string(input: &str) -> Option<Timestamp> {
    try_parse_iso_string(input).ok()
}

/// Formats a timestamp as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
#[must_use]
pub fn format_iso8601(dt: &Timestamp) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
