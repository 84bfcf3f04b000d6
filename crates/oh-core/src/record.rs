//! Items handed to the classifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The communication part of an item (e.g. an email's sent date).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Communication {
    /// When the communication was sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<Utc>>,
}

/// Anything that may carry a communication.
///
/// This lets classification work with host item types as well as [`Item`].
pub trait CommunicationRecord {
    /// Returns the communication, or `None` if the item is not one.
    fn communication(&self) -> Option<&Communication>;

    /// Returns the communication timestamp, if the item has one.
    fn communication_date(&self) -> Option<DateTime<Utc>> {
        self.communication().and_then(|comm| comm.date_time)
    }
}

/// A plain item identified by a string ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communication: Option<Communication>,
}

impl Item {
    /// An item with a dated communication.
    pub fn dated(id: impl Into<String>, date_time: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            communication: Some(Communication {
                date_time: Some(date_time),
            }),
        }
    }

    /// An item that is not a communication.
    pub fn non_communication(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            communication: None,
        }
    }
}

impl CommunicationRecord for Item {
    fn communication(&self) -> Option<&Communication> {
        self.communication.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_without_communication_deserializes() {
        let item: Item = serde_json::from_str(r#"{"id":"doc-1"}"#).unwrap();
        assert!(item.communication().is_none());
        assert!(item.communication_date().is_none());
    }

    #[test]
    fn undated_communication_deserializes() {
        let item: Item = serde_json::from_str(r#"{"id":"mail-1","communication":{}}"#).unwrap();
        assert!(item.communication().is_some());
        assert!(item.communication_date().is_none());
    }

    #[test]
    fn offset_timestamps_normalize_to_utc() {
        let item: Item = serde_json::from_str(
            r#"{"id":"mail-2","communication":{"date_time":"2024-01-03T10:00:00+01:00"}}"#,
        )
        .unwrap();
        assert_eq!(
            item.communication_date().unwrap().to_rfc3339(),
            "2024-01-03T09:00:00+00:00"
        );
    }
}
