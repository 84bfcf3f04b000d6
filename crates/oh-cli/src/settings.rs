//! Command-line overrides for office-hours settings.

use clap::Args;
use oh_core::OfficeHoursSettings;

/// Flags that override individual fields of the configured settings.
#[derive(Debug, Default, Clone, Args)]
pub struct SettingsOverrides {
    /// IANA timezone office hours are measured in (e.g. America/Los_Angeles).
    #[arg(long)]
    pub timezone: Option<String>,

    /// Start of office hours (24 hour).
    #[arg(long, value_name = "HH:MM")]
    pub start: Option<String>,

    /// End of office hours (24 hour).
    #[arg(long, value_name = "HH:MM")]
    pub end: Option<String>,

    /// Office days, comma separated (e.g. mon,tue,wed,thu,fri).
    #[arg(long, value_delimiter = ',')]
    pub office_days: Option<Vec<String>>,

    /// Parent tag; pass an empty string for none.
    #[arg(long)]
    pub parent_tag: Option<String>,

    #[arg(long)]
    pub before_tag: Option<String>,

    #[arg(long)]
    pub during_tag: Option<String>,

    #[arg(long)]
    pub after_tag: Option<String>,

    /// Tag for items sent on a non-office day.
    #[arg(long)]
    pub weekend_tag: Option<String>,

    /// Also tag items with their local day of week; `=false` turns it off.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub record_day_of_week: Option<bool>,

    /// Child tag grouping the day-of-week tags.
    #[arg(long)]
    pub day_of_week_tag: Option<String>,
}

impl SettingsOverrides {
    /// Returns `base` with every supplied flag applied.
    pub fn apply(&self, base: &OfficeHoursSettings) -> OfficeHoursSettings {
        let mut settings = base.clone();
        let fields = [
            (&self.timezone, &mut settings.timezone),
            (&self.start, &mut settings.office_start),
            (&self.end, &mut settings.office_end),
            (&self.parent_tag, &mut settings.parent_tag),
            (&self.before_tag, &mut settings.before_tag),
            (&self.during_tag, &mut settings.during_tag),
            (&self.after_tag, &mut settings.after_tag),
            (&self.weekend_tag, &mut settings.weekend_tag),
            (&self.day_of_week_tag, &mut settings.day_of_week_tag),
        ];
        for (value, field) in fields {
            if let Some(value) = value {
                field.clone_from(value);
            }
        }
        if let Some(days) = &self.office_days {
            settings.office_days.clone_from(days);
        }
        if let Some(record) = self.record_day_of_week {
            settings.record_day_of_week = record;
        }
        settings
    }
}
