//! Duration helpers for the data source form.
//!
//! The server stores every duration (schedule, update timeout, request timeout)
//! as a number of seconds, while the form edits them as hours, minutes and
//! seconds. This module converts between the two representations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hour/minute/second breakdown of a duration.
///
/// Missing fields deserialize to zero, so partially filled forms still convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeParts {
    pub hour: u64,
    pub minute: u64,
    pub second: u64,
}

impl TimeParts {
    pub fn new(hour: u64, minute: u64, second: u64) -> Self {
        Self { hour, minute, second }
    }
}

/// Error returned when a duration string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeParseError {
    #[error("empty duration")]
    Empty,

    #[error("invalid duration component '{0}'")]
    InvalidComponent(String),

    #[error("too many components in duration '{0}', expected H:M:S")]
    TooManyComponents(String),

    #[error("duration '{0}' is too large")]
    OutOfRange(String),
}

/// Split a number of seconds into hours, minutes and seconds.
///
/// # Examples
/// ```
/// use datasources::utils::time::{seconds_to_parts, TimeParts};
///
/// assert_eq!(seconds_to_parts(21600), TimeParts::new(6, 0, 0));
/// assert_eq!(seconds_to_parts(3725), TimeParts::new(1, 2, 5));
/// ```
pub fn seconds_to_parts(total_seconds: u64) -> TimeParts {
    let hour = total_seconds / 3600;
    let minute = (total_seconds - hour * 3600) / 60;
    let second = total_seconds - minute * 60 - hour * 3600;
    TimeParts { hour, minute, second }
}

/// Collapse hours, minutes and seconds back into a number of seconds.
///
/// Components are not required to be normalized: `{minute: 90}` is 5400.
/// Totals past `u64::MAX` saturate.
pub fn parts_to_seconds(parts: &TimeParts) -> u64 {
    parts
        .hour
        .saturating_mul(3600)
        .saturating_add(parts.minute.saturating_mul(60))
        .saturating_add(parts.second)
}

fn checked_total(parts: &TimeParts) -> Option<u64> {
    parts
        .hour
        .checked_mul(3600)?
        .checked_add(parts.minute.checked_mul(60)?)?
        .checked_add(parts.second)
}

impl fmt::Display for TimeParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl FromStr for TimeParts {
    type Err = TimeParseError;

    /// Accepts bare seconds (`"90"`), `M:S` or `H:M:S`. The total must fit in
    /// a `u64` number of seconds.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TimeParseError::Empty);
        }

        let components = s
            .split(':')
            .map(|c| {
                c.trim()
                    .parse::<u64>()
                    .map_err(|_| TimeParseError::InvalidComponent(c.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let parts = match components.as_slice() {
            [seconds] => return Ok(seconds_to_parts(*seconds)),
            [minute, second] => TimeParts::new(0, *minute, *second),
            [hour, minute, second] => TimeParts::new(*hour, *minute, *second),
            _ => return Err(TimeParseError::TooManyComponents(s.to_string())),
        };

        match checked_total(&parts) {
            Some(_) => Ok(parts),
            None => Err(TimeParseError::OutOfRange(s.to_string())),
        }
    }
}
