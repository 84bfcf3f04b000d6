//! Wall-clock time of day with strict `HH:MM` parsing.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Exactly two digits, a colon, two digits.
static HH_MM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2}):([0-9]{2})$").expect("HH:MM pattern is valid"));

/// Errors produced while parsing a time-of-day string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    /// The input is not shaped like `HH:MM`.
    #[error("time must be specified as 'HH:MM' (24 hour), provided: {input:?}")]
    Format { input: String },

    /// The hour part is outside 0..=23.
    #[error("hour must be between 0 and 23, provided: {hour}")]
    HourOutOfRange { hour: u32 },

    /// The minute part is outside 0..=59.
    #[error("minutes must be between 0 and 59, provided: {minute}")]
    MinuteOutOfRange { minute: u32 },
}

/// An hour and minute on a 24 hour clock.
///
/// Ordering is chronological within a day, so `TimeOfDay` values can be
/// compared directly against a local timestamp's hour and minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

impl TimeOfDay {
    /// Builds a time of day after range checks.
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeParseError> {
        if hour > 23 {
            return Err(TimeParseError::HourOutOfRange { hour });
        }
        if minute > 59 {
            return Err(TimeParseError::MinuteOutOfRange { minute });
        }
        Ok(Self { hour, minute })
    }

    /// Parses a `HH:MM` string, ignoring surrounding whitespace.
    ///
    /// This is the single validation primitive for office start and end
    /// times; callers collecting input interactively should run it themselves
    /// to surface the message before a classification run.
    pub fn parse(input: &str) -> Result<Self, TimeParseError> {
        let Some(caps) = HH_MM_RE.captures(input.trim()) else {
            return Err(TimeParseError::Format {
                input: input.to_string(),
            });
        };

        // Two ASCII digits always fit in a u32.
        let hour = caps[1].parse().unwrap_or(u32::MAX);
        let minute = caps[2].parse().unwrap_or(u32::MAX);
        Self::new(hour, minute)
    }

    /// Hour of the day, 0..=23.
    #[must_use]
    pub const fn hour(self) -> u32 {
        self.hour
    }

    /// Minute of the hour, 0..=59.
    #[must_use]
    pub const fn minute(self) -> u32 {
        self.minute
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}
