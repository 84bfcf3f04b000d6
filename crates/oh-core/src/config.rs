//! Classification settings with validation.
//!
//! [`OfficeHoursSettings`] is the raw, loosely validated input surface (what
//! a config file or a form hands over). [`OfficeHoursConfig`] is the
//! immutable, validated configuration that the classifier runs against.

use std::fmt;

use chrono::Weekday;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time_of_day::{TimeOfDay, TimeParseError};

/// Separator between a parent tag and its child.
pub const TAG_SEPARATOR: char = '|';

/// Weekdays in the order they are reported, Monday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An office start or end time failed to parse.
    #[error("invalid {field} {value:?}: {source}")]
    InvalidTime {
        field: &'static str,
        value: String,
        #[source]
        source: TimeParseError,
    },

    /// The timezone id is not a known IANA zone.
    #[error("unknown timezone: {value}")]
    UnknownTimezone { value: String },

    /// An office day is not a weekday name.
    #[error("unknown weekday in office_days: {value}")]
    UnknownWeekday { value: String },

    /// A required field was blank.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// No weekday was marked as an office day.
    #[error("at least one office day is required")]
    NoOfficeDays,

    /// Office hours do not start strictly before they end.
    #[error("office_start ({start}) must be before office_end ({end})")]
    WindowNotOrdered { start: TimeOfDay, end: TimeOfDay },
}

/// Upper-case weekday name, as used in the configuration summary.
pub const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
        Weekday::Sun => "SUNDAY",
    }
}

/// Capitalised weekday name, as used in day-of-week tags.
pub const fn weekday_title(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parses a weekday from its full or three-letter name, case-insensitively.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let name = name.trim().to_ascii_lowercase();
    WEEKDAYS.into_iter().find(|day| {
        let full = weekday_title(*day).to_ascii_lowercase();
        name == full || name == full[..3]
    })
}

/// Which weekdays count as office days.
///
/// Days without an explicit flag are not office days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfficeDays([bool; 7]);

impl OfficeDays {
    /// No office days at all.
    pub const NONE: Self = Self([false; 7]);

    /// Builds the set from weekday names; every named day is an office day.
    pub fn from_names<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut days = Self::NONE;
        for name in names {
            let name = name.as_ref();
            let day = parse_weekday(name).ok_or_else(|| ConfigError::UnknownWeekday {
                value: name.to_string(),
            })?;
            days.set(day, true);
        }
        Ok(days)
    }

    /// Marks a weekday as an office day or not.
    pub fn set(&mut self, day: Weekday, is_office_day: bool) {
        self.0[day.num_days_from_monday() as usize] = is_office_day;
    }

    #[must_use]
    pub fn is_office_day(&self, day: Weekday) -> bool {
        self.0[day.num_days_from_monday() as usize]
    }

    /// Iterates every weekday with its flag, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, bool)> + '_ {
        WEEKDAYS.into_iter().map(|day| (day, self.is_office_day(day)))
    }

    /// Returns true if no day is an office day.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|flag| !flag)
    }
}

impl Default for OfficeDays {
    /// Monday to Friday.
    fn default() -> Self {
        Self([true, true, true, true, true, false, false])
    }
}

/// Output tag names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNames {
    pub parent: String,
    pub before: String,
    pub during: String,
    pub after: String,
    pub weekend: String,
    pub day_of_week: String,
}

impl Default for TagNames {
    fn default() -> Self {
        Self {
            parent: "Office Hours".to_string(),
            before: "Before Office Hours".to_string(),
            during: "During Office Hours".to_string(),
            after: "After Office Hours".to_string(),
            weekend: "Weekend".to_string(),
            day_of_week: "Day of Week".to_string(),
        }
    }
}

impl TagNames {
    /// Prefixes `child` with the parent tag.
    ///
    /// A blank parent leaves the child unchanged.
    #[must_use]
    pub fn compose(&self, child: &str) -> String {
        if self.parent.trim().is_empty() {
            child.to_string()
        } else {
            format!("{}{TAG_SEPARATOR}{child}", self.parent)
        }
    }

    /// Tag applied for the day of week when that recording is enabled.
    #[must_use]
    pub fn compose_day_of_week(&self, day: Weekday) -> String {
        self.compose(&format!(
            "{}{TAG_SEPARATOR}{}",
            self.day_of_week,
            weekday_title(day)
        ))
    }
}

/// Raw settings as supplied by a config file, environment or form.
///
/// Every field has a default, so a partial document is enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfficeHoursSettings {
    /// IANA timezone id; blank means the system timezone.
    pub timezone: String,
    /// Start of office hours, `HH:MM`.
    pub office_start: String,
    /// End of office hours, `HH:MM`.
    pub office_end: String,
    /// Names of the weekdays that are office days.
    pub office_days: Vec<String>,
    pub parent_tag: String,
    pub before_tag: String,
    pub during_tag: String,
    pub after_tag: String,
    pub weekend_tag: String,
    /// Also tag each dated item with its local weekday.
    pub record_day_of_week: bool,
    pub day_of_week_tag: String,
}

impl Default for OfficeHoursSettings {
    fn default() -> Self {
        let tags = TagNames::default();
        Self {
            timezone: String::new(),
            office_start: "09:00".to_string(),
            office_end: "17:00".to_string(),
            office_days: OfficeDays::default()
                .iter()
                .filter(|(_, is_office_day)| *is_office_day)
                .map(|(day, _)| weekday_name(day).to_string())
                .collect(),
            parent_tag: tags.parent,
            before_tag: tags.before,
            during_tag: tags.during,
            after_tag: tags.after,
            weekend_tag: tags.weekend,
            record_day_of_week: false,
            day_of_week_tag: tags.day_of_week,
        }
    }
}

impl OfficeHoursSettings {
    /// Checks the settings the way an interactive form would before a run.
    ///
    /// This is stricter than [`OfficeHoursConfig::from_settings`]: it also
    /// requires non-blank times and child tags, at least one office day and
    /// a start strictly before the end.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let start = required_time("office_start", &self.office_start)?;
        let end = required_time("office_end", &self.office_end)?;
        if start >= end {
            return Err(ConfigError::WindowNotOrdered { start, end });
        }

        for (field, value) in [
            ("before_tag", &self.before_tag),
            ("during_tag", &self.during_tag),
            ("after_tag", &self.after_tag),
            ("weekend_tag", &self.weekend_tag),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty { field });
            }
        }
        if self.record_day_of_week && self.day_of_week_tag.trim().is_empty() {
            return Err(ConfigError::Empty {
                field: "day_of_week_tag",
            });
        }

        if OfficeDays::from_names(&self.office_days)?.is_empty() {
            return Err(ConfigError::NoOfficeDays);
        }
        Ok(())
    }
}

fn required_time(field: &'static str, value: &str) -> Result<TimeOfDay, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Empty { field });
    }
    parse_time(field, value)
}

fn parse_time(field: &'static str, value: &str) -> Result<TimeOfDay, ConfigError> {
    TimeOfDay::parse(value).map_err(|source| ConfigError::InvalidTime {
        field,
        value: value.to_string(),
        source,
    })
}

/// Resolves a timezone id, falling back to the system zone when blank.
fn resolve_timezone(id: &str) -> Result<Tz, ConfigError> {
    let id = id.trim();
    if id.is_empty() {
        return Ok(system_timezone());
    }
    id.parse::<Tz>()
        .map_err(|_| ConfigError::UnknownTimezone {
            value: id.to_string(),
        })
}

fn system_timezone() -> Tz {
    match iana_time_zone::get_timezone() {
        Ok(name) => name.parse().unwrap_or_else(|_| {
            tracing::warn!(timezone = %name, "system timezone is not an IANA zone, using UTC");
            Tz::UTC
        }),
        Err(error) => {
            tracing::warn!(%error, "could not determine system timezone, using UTC");
            Tz::UTC
        }
    }
}

/// Validated, immutable classification configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficeHoursConfig {
    timezone: Tz,
    office_start: TimeOfDay,
    office_end: TimeOfDay,
    office_days: OfficeDays,
    tags: TagNames,
    record_day_of_week: bool,
}

impl OfficeHoursConfig {
    /// Creates a configuration with default office days and tags.
    ///
    /// A blank `timezone` resolves to the system timezone. Start and end only
    /// have to be valid times; their order is not checked here.
    pub fn new(timezone: &str, office_start: &str, office_end: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            timezone: resolve_timezone(timezone)?,
            office_start: parse_time("office_start", office_start)?,
            office_end: parse_time("office_end", office_end)?,
            office_days: OfficeDays::default(),
            tags: TagNames::default(),
            record_day_of_week: false,
        })
    }

    /// Builds a configuration from raw settings.
    pub fn from_settings(settings: &OfficeHoursSettings) -> Result<Self, ConfigError> {
        let config = Self::new(
            &settings.timezone,
            &settings.office_start,
            &settings.office_end,
        )?
        .with_office_days(OfficeDays::from_names(&settings.office_days)?)
        .with_tags(TagNames {
            parent: settings.parent_tag.clone(),
            before: settings.before_tag.clone(),
            during: settings.during_tag.clone(),
            after: settings.after_tag.clone(),
            weekend: settings.weekend_tag.clone(),
            day_of_week: settings.day_of_week_tag.clone(),
        })
        .with_record_day_of_week(settings.record_day_of_week);
        Ok(config)
    }

    #[must_use]
    pub const fn with_office_days(mut self, office_days: OfficeDays) -> Self {
        self.office_days = office_days;
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: TagNames) -> Self {
        self.tags = tags;
        self
    }

    #[must_use]
    pub const fn with_record_day_of_week(mut self, enabled: bool) -> Self {
        self.record_day_of_week = enabled;
        self
    }

    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    pub const fn office_start(&self) -> TimeOfDay {
        self.office_start
    }

    pub const fn office_end(&self) -> TimeOfDay {
        self.office_end
    }

    pub const fn office_days(&self) -> &OfficeDays {
        &self.office_days
    }

    pub const fn tags(&self) -> &TagNames {
        &self.tags
    }

    pub const fn record_day_of_week(&self) -> bool {
        self.record_day_of_week
    }
}

impl fmt::Display for OfficeHoursConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Time Zone: {}", self.timezone)?;
        writeln!(
            f,
            "Office Hours: {} - {}",
            self.office_start, self.office_end
        )?;
        write!(f, "Office Days:")?;
        for (day, is_office_day) in self.office_days.iter() {
            write!(f, "\n{} => {is_office_day}", weekday_name(day))?;
        }
        Ok(())
    }
}
