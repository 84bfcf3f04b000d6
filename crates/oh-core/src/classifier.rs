//! Office-hours classification.
//!
//! # Algorithm
//!
//! For each item, in input order:
//!
//! 1. Items without a communication count as [`NOT_COMMUNICATION`], and
//!    communications without a date count as [`NO_COMMUNICATION_DATE`].
//!    Neither is tagged.
//! 2. The timestamp is converted to the configured timezone. A weekday that
//!    is not an office day gets the weekend tag, whatever the calendar says.
//! 3. Otherwise the local hour and minute are compared against the office
//!    window. Both the start minute and the end minute are inside it.
//! 4. The item joins the pending batch for its tag. A batch that reaches the
//!    batch size is sent to the [`TagSink`] straight away; whatever is left
//!    is flushed once every item has been seen.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};

use crate::config::{OfficeHoursConfig, TagNames, WEEKDAYS};
use crate::record::CommunicationRecord;
use crate::report::ClassificationReport;
use crate::sink::TagSink;

/// Label counted for items that are not communications.
pub const NOT_COMMUNICATION: &str = "Not Communication";

/// Label counted for communications without a date.
pub const NO_COMMUNICATION_DATE: &str = "No Communication Date";

/// Largest batch sent to the sink in one call unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = match NonZeroUsize::new(500) {
    Some(size) => size,
    None => unreachable!(),
};

/// Where an item's communication time falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    BeforeHours,
    DuringHours,
    AfterHours,
    /// Any day that is not an office day.
    Weekend,
    NotCommunication,
    NoCommunicationDate,
}

impl Bucket {
    /// Label for buckets that are counted but never tagged.
    #[must_use]
    pub const fn sentinel_label(self) -> Option<&'static str> {
        match self {
            Self::NotCommunication => Some(NOT_COMMUNICATION),
            Self::NoCommunicationDate => Some(NO_COMMUNICATION_DATE),
            Self::BeforeHours | Self::DuringHours | Self::AfterHours | Self::Weekend => None,
        }
    }
}

impl OfficeHoursConfig {
    /// Buckets a UTC timestamp.
    #[must_use]
    pub fn bucket_at(&self, timestamp: DateTime<Utc>) -> Bucket {
        let local = timestamp.with_timezone(&self.timezone());
        if !self.office_days().is_office_day(local.weekday()) {
            return Bucket::Weekend;
        }

        let (hour, minute) = (local.hour(), local.minute());
        let start = self.office_start();
        let end = self.office_end();
        if hour < start.hour() || (hour == start.hour() && minute < start.minute()) {
            Bucket::BeforeHours
        } else if hour > end.hour() || (hour == end.hour() && minute > end.minute()) {
            Bucket::AfterHours
        } else {
            Bucket::DuringHours
        }
    }

    /// Buckets an item.
    pub fn bucket_for<R: CommunicationRecord + ?Sized>(&self, record: &R) -> Bucket {
        self.locate(record).0
    }

    /// Weekday of a timestamp in the configured timezone.
    #[must_use]
    pub fn local_weekday(&self, timestamp: DateTime<Utc>) -> Weekday {
        timestamp.with_timezone(&self.timezone()).weekday()
    }

    fn locate<R: CommunicationRecord + ?Sized>(&self, record: &R) -> (Bucket, Option<Weekday>) {
        let Some(communication) = record.communication() else {
            return (Bucket::NotCommunication, None);
        };
        let Some(timestamp) = communication.date_time else {
            return (Bucket::NoCommunicationDate, None);
        };
        (self.bucket_at(timestamp), Some(self.local_weekday(timestamp)))
    }
}

/// Final tag strings, composed once per run.
#[derive(Debug)]
struct Labels {
    before: String,
    during: String,
    after: String,
    weekend: String,
    days: [String; 7],
}

impl Labels {
    fn new(tags: &TagNames) -> Self {
        Self {
            before: tags.compose(&tags.before),
            during: tags.compose(&tags.during),
            after: tags.compose(&tags.after),
            weekend: tags.compose(&tags.weekend),
            days: WEEKDAYS.map(|day| tags.compose_day_of_week(day)),
        }
    }

    fn tag(&self, bucket: Bucket) -> Option<&str> {
        match bucket {
            Bucket::BeforeHours => Some(self.before.as_str()),
            Bucket::DuringHours => Some(self.during.as_str()),
            Bucket::AfterHours => Some(self.after.as_str()),
            Bucket::Weekend => Some(self.weekend.as_str()),
            Bucket::NotCommunication | Bucket::NoCommunicationDate => None,
        }
    }

    fn day(&self, day: Weekday) -> &str {
        &self.days[day.num_days_from_monday() as usize]
    }
}

/// Items waiting to be tagged, grouped by tag.
struct TagBatches<'a, R: ?Sized> {
    pending: BTreeMap<String, Vec<&'a R>>,
    limit: usize,
}

impl<'a, R: ?Sized> TagBatches<'a, R> {
    fn new(limit: NonZeroUsize) -> Self {
        Self {
            pending: BTreeMap::new(),
            limit: limit.get(),
        }
    }

    /// Appends an item, returning the batch once it is full.
    fn push(&mut self, tag: &str, item: &'a R) -> Option<(String, Vec<&'a R>)> {
        let len = if let Some(batch) = self.pending.get_mut(tag) {
            batch.push(item);
            batch.len()
        } else {
            self.pending.insert(tag.to_string(), vec![item]);
            1
        };

        if len >= self.limit {
            self.pending.remove_entry(tag)
        } else {
            None
        }
    }

    /// Takes every non-empty batch, in tag order.
    fn drain(&mut self) -> impl Iterator<Item = (String, Vec<&'a R>)> + use<'a, R> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .filter(|(_, batch)| !batch.is_empty())
    }
}

type MessageCallback<'cb> = Box<dyn FnMut(&str) + 'cb>;
type ProgressCallback<'cb> = Box<dyn FnMut(usize, usize) + 'cb>;

/// Tags items by where their communication time falls relative to office hours.
///
/// A classifier runs one [`classify`](Self::classify) at a time; the
/// borrow on `&mut self` enforces that.
pub struct Classifier<'cb> {
    config: OfficeHoursConfig,
    batch_size: NonZeroUsize,
    on_message: Option<MessageCallback<'cb>>,
    on_progress: Option<ProgressCallback<'cb>>,
}

impl std::fmt::Debug for Classifier<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("config", &self.config)
            .field("batch_size", &self.batch_size)
            .finish_non_exhaustive()
    }
}

impl<'cb> Classifier<'cb> {
    pub const fn new(config: OfficeHoursConfig) -> Self {
        Self {
            config,
            batch_size: DEFAULT_BATCH_SIZE,
            on_message: None,
            on_progress: None,
        }
    }

    /// Sets the largest batch handed to the sink in one call.
    #[must_use]
    pub const fn with_batch_size(mut self, batch_size: NonZeroUsize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Receives flush notices and the final summary instead of stdout.
    #[must_use]
    pub fn on_message(mut self, callback: impl FnMut(&str) + 'cb) -> Self {
        self.on_message = Some(Box::new(callback));
        self
    }

    /// Receives `(current, total)` after each item, `current` starting at 1.
    #[must_use]
    pub fn on_progress(mut self, callback: impl FnMut(usize, usize) + 'cb) -> Self {
        self.on_progress = Some(Box::new(callback));
        self
    }

    pub const fn config(&self) -> &OfficeHoursConfig {
        &self.config
    }

    pub const fn batch_size(&self) -> NonZeroUsize {
        self.batch_size
    }

    /// Classifies `items` and applies the resulting tags through `sink`.
    ///
    /// Returns the per-label counts. A sink error aborts the run; batches
    /// flushed before it stay applied.
    pub fn classify<R, S>(
        &mut self,
        items: &[R],
        sink: &mut S,
    ) -> Result<ClassificationReport, S::Error>
    where
        R: CommunicationRecord,
        S: TagSink<R> + ?Sized,
    {
        let labels = Labels::new(self.config.tags());
        let record_day = self.config.record_day_of_week();
        let total = items.len();

        let mut report = ClassificationReport {
            items_processed: total,
            ..ClassificationReport::default()
        };
        let mut outcome_batches = TagBatches::new(self.batch_size);
        let mut day_batches = TagBatches::new(self.batch_size);

        tracing::debug!(items = total, batch_size = self.batch_size.get(), "classifying items");

        for (index, item) in items.iter().enumerate() {
            let (bucket, day) = self.config.locate(item);
            self.fire_progress(index + 1, total);

            match labels.tag(bucket) {
                Some(tag) => {
                    if let Some((tag, batch)) = outcome_batches.push(tag, item) {
                        self.flush(sink, &mut report.outcomes, tag, &batch)?;
                    }
                }
                None => {
                    if let Some(label) = bucket.sentinel_label() {
                        *report.outcomes.entry(label.to_string()).or_insert(0) += 1;
                    }
                }
            }

            if let Some(day) = day.filter(|_| record_day) {
                if let Some((tag, batch)) = day_batches.push(labels.day(day), item) {
                    self.flush(sink, &mut report.day_of_week, tag, &batch)?;
                }
            }
        }

        for (tag, batch) in outcome_batches.drain() {
            self.flush(sink, &mut report.outcomes, tag, &batch)?;
        }
        for (tag, batch) in day_batches.drain() {
            self.flush(sink, &mut report.day_of_week, tag, &batch)?;
        }

        for line in report.summary_lines() {
            self.log(&line);
        }
        Ok(report)
    }

    fn flush<R, S>(
        &mut self,
        sink: &mut S,
        counts: &mut BTreeMap<String, usize>,
        tag: String,
        batch: &[&R],
    ) -> Result<(), S::Error>
    where
        S: TagSink<R> + ?Sized,
    {
        sink.apply_tag(&tag, batch)?;
        tracing::debug!(tag = %tag, items = batch.len(), "applied tag batch");
        self.log(&format!("Applied tag '{tag}' to {} items", batch.len()));
        *counts.entry(tag).or_insert(0) += batch.len();
        Ok(())
    }

    fn log(&mut self, message: &str) {
        match self.on_message.as_mut() {
            Some(callback) => callback(message),
            None => println!("{message}"),
        }
    }

    fn fire_progress(&mut self, current: usize, total: usize) {
        if let Some(callback) = self.on_progress.as_mut() {
            callback(current, total);
        }
    }
}
