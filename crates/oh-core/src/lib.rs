//! Office-hours classification of communications.
//!
//! This crate contains:
//! - Configuration: timezone, office window, office days and tag names
//! - Classification: bucketing timestamps and batching tags into a sink

mod classifier;
pub mod config;
mod record;
mod report;
mod sink;
pub mod time_of_day;

pub use classifier::{
    Bucket, Classifier, DEFAULT_BATCH_SIZE, NO_COMMUNICATION_DATE, NOT_COMMUNICATION,
};
pub use config::{ConfigError, OfficeDays, OfficeHoursConfig, OfficeHoursSettings, TagNames};
pub use record::{Communication, CommunicationRecord, Item};
pub use report::ClassificationReport;
pub use sink::TagSink;
pub use time_of_day::{TimeOfDay, TimeParseError};
