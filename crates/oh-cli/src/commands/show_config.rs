//! Config command for previewing the resolved office-hours configuration.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use oh_core::OfficeHoursConfig;
use oh_core::config::TAG_SEPARATOR;

use crate::{Config, SettingsOverrides};

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub settings: SettingsOverrides,
}

pub fn run<W: Write>(writer: &mut W, args: &ConfigArgs, config: &Config) -> Result<()> {
    let settings = args.settings.apply(&config.office_hours);
    let office_hours =
        OfficeHoursConfig::from_settings(&settings).context("invalid office hours settings")?;

    writeln!(writer, "{office_hours}")?;
    writeln!(writer, "Tags:")?;
    let tags = office_hours.tags();
    for child in [&tags.before, &tags.during, &tags.after, &tags.weekend] {
        writeln!(writer, "- {}", tags.compose(child))?;
    }
    if office_hours.record_day_of_week() {
        let day_tag = format!("{}{TAG_SEPARATOR}<day>", tags.day_of_week);
        writeln!(writer, "- {}", tags.compose(&day_tag))?;
    }
    writeln!(writer, "Batch Size: {}", config.batch_size)?;
    writeln!(writer, "Database: {}", config.database_path.display())?;

    if let Err(err) = settings.validate() {
        writeln!(writer, "Warning: {err}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use insta::assert_snapshot;
    use oh_core::OfficeHoursSettings;

    fn config() -> Config {
        Config {
            database_path: PathBuf::from("/data/oh.db"),
            office_hours: OfficeHoursSettings {
                timezone: "America/New_York".to_string(),
                ..OfficeHoursSettings::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn prints_summary_and_tags() {
        let args = ConfigArgs {
            settings: SettingsOverrides {
                office_days: Some(vec!["mon".to_string(), "wed".to_string()]),
                record_day_of_week: Some(true),
                ..SettingsOverrides::default()
            },
        };
        let mut output = Vec::new();

        run(&mut output, &args, &config()).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Time Zone: America/New_York
        Office Hours: 09:00 - 17:00
        Office Days:
        MONDAY => true
        TUESDAY => false
        WEDNESDAY => true
        THURSDAY => false
        FRIDAY => false
        SATURDAY => false
        SUNDAY => false
        Tags:
        - Office Hours|Before Office Hours
        - Office Hours|During Office Hours
        - Office Hours|After Office Hours
        - Office Hours|Weekend
        - Office Hours|Day of Week|<day>
        Batch Size: 500
        Database: /data/oh.db
        ");
    }

    #[test]
    fn warns_about_settings_a_run_would_reject() {
        let args = ConfigArgs {
            settings: SettingsOverrides {
                start: Some("18:00".to_string()),
                ..SettingsOverrides::default()
            },
        };
        let mut output = Vec::new();

        run(&mut output, &args, &config()).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.ends_with(
            "Warning: office_start (18:00) must be before office_end (17:00)\n"
        ));
    }

    #[test]
    fn rejects_unknown_timezone() {
        let args = ConfigArgs {
            settings: SettingsOverrides {
                timezone: Some("Nowhere/Special".to_string()),
                ..SettingsOverrides::default()
            },
        };

        let err = run(&mut Vec::new(), &args, &config()).unwrap_err();
        assert!(format!("{err:#}").contains("unknown timezone: Nowhere/Special"));
    }
}
