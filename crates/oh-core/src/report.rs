//! Aggregate counts from a classification run.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// How many items ended up under each label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationReport {
    /// Number of items processed.
    pub items_processed: usize,
    /// Item count per outcome label (composed tag or sentinel label).
    ///
    /// Every item is counted under exactly one label.
    pub outcomes: BTreeMap<String, usize>,
    /// Item count per day-of-week tag, when day recording is enabled.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub day_of_week: BTreeMap<String, usize>,
}

impl ClassificationReport {
    /// Count recorded under `label`, zero if absent.
    #[must_use]
    pub fn count(&self, label: &str) -> usize {
        self.outcomes.get(label).copied().unwrap_or(0)
    }

    /// Sum of all outcome counts.
    #[must_use]
    pub fn total_classified(&self) -> usize {
        self.outcomes.values().sum()
    }

    /// Summary lines, as logged at the end of a run.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Items Processed: {}", self.items_processed)];
        lines.extend(
            self.outcomes
                .iter()
                .chain(&self.day_of_week)
                .map(|(label, count)| format!("{label}: {count}")),
        );
        lines
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary_lines().join("\n"))
    }
}
