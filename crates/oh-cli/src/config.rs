//! Configuration loading and management.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use oh_core::{DEFAULT_BATCH_SIZE, OfficeHoursSettings};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the tag database.
    pub database_path: PathBuf,
    /// Largest number of items tagged in one database call.
    pub batch_size: NonZeroUsize,
    /// Office hours, office days and tag names.
    #[serde(default)]
    pub office_hours: OfficeHoursSettings,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("oh.db"),
            batch_size: DEFAULT_BATCH_SIZE,
            office_hours: OfficeHoursSettings::default(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Later sources win: defaults, the user config file, `config_path`,
    /// then `OH_*` environment variables (`OH_OFFICE_HOURS__TIMEZONE` for
    /// nested keys).
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("OH_").split("__"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for oh.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("oh"))
}

/// Returns the platform-specific data directory for oh.
///
/// On Linux: `~/.local/share/oh`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("oh"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_oh() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "oh");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_db() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.database_path, data_dir.join("oh.db"));
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
database_path = "/tmp/tags.db"
batch_size = 50

[office_hours]
timezone = "Australia/Sydney"
office_start = "08:00"
office_days = ["MONDAY", "TUESDAY"]
"#,
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/tags.db"));
        assert_eq!(config.batch_size.get(), 50);
        assert_eq!(config.office_hours.timezone, "Australia/Sydney");
        assert_eq!(config.office_hours.office_start, "08:00");
        assert_eq!(config.office_hours.office_end, "17:00");
        assert_eq!(config.office_hours.office_days, ["MONDAY", "TUESDAY"]);
    }

    #[test]
    fn test_config_file_rejects_zero_batch_size() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "batch_size = 0\n").unwrap();

        assert!(Config::load_from(Some(&path)).is_err());
    }
}
