//! Time parsing and formatting lens
//!
//! This module normalizes the heterogeneous timestamp strings found in RDAP
//! events into comparable instants, and into display-friendly
//! `Month day, year` dates. It supports RFC3339/ISO-8601 strings, RFC2822,
//! Unix timestamps and human-readable date formats.
//!
//! # Feature Requirements
//!
//! This module requires the `lens-core` feature.
//!
//! # Example
//!
//! ```rust,ignore
//! use grip::lens::time::TimeLens;
//!
//! let lens = TimeLens::new();
//! let date = lens.to_human_parts("2018-07-05T14:12:23Z")?;
//! assert_eq!(date.to_string(), "July 5, 2018");
//! ```

use crate::error::{GripError, Result};
use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};
use chrono_humanize::HumanTime;
use serde::{Deserialize, Serialize};

/// Month number (1-based) to month name
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Look up the English name of a 1-based month number
pub fn month_name(month: u32) -> Result<&'static str> {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_NAMES.get(idx as usize))
        .copied()
        .ok_or(GripError::Range(month))
}

/// Whole days elapsed from `instant` to `reference`, floored.
///
/// Instants after the reference yield negative values.
pub fn elapsed_days(reference: DateTime<Utc>, instant: DateTime<Utc>) -> i64 {
    let elapsed = reference.signed_duration_since(instant);
    let days = elapsed.num_days();
    // num_days truncates toward zero
    if elapsed < TimeDelta::days(days) {
        days - 1
    } else {
        days
    }
}

// =============================================================================
// Types
// =============================================================================

/// A calendar date split into display parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HumanDate {
    pub month: &'static str,
    pub day: u32,
    pub year: i32,
}

impl HumanDate {
    fn from_date(date: NaiveDate) -> Result<Self> {
        Ok(Self {
            month: month_name(date.month())?,
            day: date.day(),
            year: date.year(),
        })
    }
}

impl std::fmt::Display for HumanDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}, {}", self.month, self.day, self.year)
    }
}

/// A parsed time string with multiple format representations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "display", derive(tabled::Tabled))]
pub struct TimeDescription {
    /// Unix timestamp in seconds
    pub unix: i64,
    /// RFC3339 formatted string
    pub rfc3339: String,
    /// Calendar date, e.g. "July 5, 2018"
    pub date: String,
    /// Relative time to the session reference, e.g. "2 years ago"
    pub human: String,
    /// Whole days between the time and the session reference
    pub elapsed_days: i64,
}

// =============================================================================
// Args
// =============================================================================

/// Arguments for time description operations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct TimeParseArgs {
    /// Time strings to parse (Unix timestamp, RFC3339, or human-readable)
    /// If empty, describes the session reference time
    #[cfg_attr(feature = "cli", clap(value_name = "TIME"))]
    #[serde(default)]
    pub times: Vec<String>,
}

impl TimeParseArgs {
    /// Create new args with given time strings
    pub fn new(times: Vec<String>) -> Self {
        Self { times }
    }
}

// =============================================================================
// Lens
// =============================================================================

/// Time parsing lens
///
/// Stateless: the "now" used for relative values is always passed in by the
/// caller, so repeated calls within one session agree with each other.
pub struct TimeLens;

impl TimeLens {
    /// Create a new time lens
    pub fn new() -> Self {
        Self
    }

    /// Parse a single time string into a `DateTime<Utc>`
    ///
    /// Accepts:
    /// - Unix timestamps (e.g., "1697043600")
    /// - RFC3339 strings (e.g., "2023-10-11T00:00:00Z")
    /// - RFC2822 strings (e.g., "Wed, 11 Oct 2023 00:00:00 +0000")
    /// - Human-readable dates (e.g., "October 11, 2023")
    ///
    /// Date-only inputs resolve to midnight UTC.
    pub fn to_instant(&self, text: &str) -> Result<DateTime<Utc>> {
        let midnight = chrono::NaiveTime::from_hms_opt(0, 0, 0)
            .ok_or_else(|| GripError::Parse(text.to_string()))?;
        dateparser::parse_with(text.trim(), &Utc, midnight)
            .map_err(|_| GripError::Parse(text.to_string()))
    }

    /// Parse a time string into its month name, day and year
    ///
    /// When the string carries an explicit offset the date is taken as
    /// written, not converted to UTC.
    pub fn to_human_parts(&self, text: &str) -> Result<HumanDate> {
        let date = match DateTime::parse_from_rfc3339(text.trim()) {
            Ok(dt) => dt.date_naive(),
            Err(_) => self.to_instant(text)?.date_naive(),
        };
        HumanDate::from_date(date)
    }

    /// Describe one time string relative to `reference`
    pub fn describe_one(&self, text: &str, reference: DateTime<Utc>) -> Result<TimeDescription> {
        let instant = self.to_instant(text)?;
        let date = self.to_human_parts(text)?;
        Ok(Self::description(instant, date, reference))
    }

    /// Describe all time strings in `args`, or the reference itself when empty
    pub fn describe(
        &self,
        args: &TimeParseArgs,
        reference: DateTime<Utc>,
    ) -> Result<Vec<TimeDescription>> {
        if args.times.is_empty() {
            let date = HumanDate::from_date(reference.date_naive())?;
            return Ok(vec![Self::description(reference, date, reference)]);
        }

        args.times
            .iter()
            .map(|t| self.describe_one(t, reference))
            .collect()
    }

    fn description(
        instant: DateTime<Utc>,
        date: HumanDate,
        reference: DateTime<Utc>,
    ) -> TimeDescription {
        let human = HumanTime::from(instant.signed_duration_since(reference)).to_string();
        TimeDescription {
            unix: instant.timestamp(),
            rfc3339: instant.to_rfc3339(),
            date: date.to_string(),
            human,
            elapsed_days: elapsed_days(reference, instant),
        }
    }
}

impl Default for TimeLens {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
