//! Line format shared by all reading sources.

use motorwatch_types::Reading;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// One line of a reading feed.
///
/// ```json
/// {"time": 61, "voltage": 12.04, "current": 1.62, "rpm": 1447.3, "fault": 0}
/// ```
///
/// `fault` is an optional ground-truth label, written by simulators as
/// `0`/`1` or as a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedRecord {
    pub time: u64,
    pub voltage: f64,
    pub current: f64,
    pub rpm: f64,
    #[serde(
        default,
        deserialize_with = "deserialize_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub fault: Option<bool>,
}

impl FeedRecord {
    pub fn reading(&self) -> Reading {
        Reading::new(self.time, self.voltage, self.current, self.rpm)
    }

    /// Parse a single feed line.
    pub fn parse_line(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line.trim())
    }

    /// Parse a single feed line from raw bytes, which need not be valid UTF-8.
    pub fn parse_bytes(line: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(line.trim_ascii())
    }
}

impl From<Reading> for FeedRecord {
    fn from(reading: Reading) -> Self {
        Self {
            time: reading.time,
            voltage: reading.voltage,
            current: reading.current,
            rpm: reading.rpm,
            fault: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Label {
    Flag(bool),
    Number(u64),
}

fn deserialize_label<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Label>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Label::Flag(flag)) => Ok(Some(flag)),
        Some(Label::Number(0)) => Ok(Some(false)),
        Some(Label::Number(1)) => Ok(Some(true)),
        Some(Label::Number(n)) => Err(de::Error::custom(format!(
            "fault label must be 0 or 1, got {n}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unlabeled() {
        let record =
            FeedRecord::parse_line(r#"{"time": 3, "voltage": 12.1, "current": 1.5, "rpm": 1490}"#)
                .unwrap();
        assert_eq!(record.fault, None);
        assert_eq!(record.reading(), Reading::new(3, 12.1, 1.5, 1490.0));
    }

    #[test]
    fn test_parse_numeric_and_boolean_labels() {
        let line = r#"{"time": 1, "voltage": 12, "current": 2.6, "rpm": 1400, "fault": 1}"#;
        assert_eq!(FeedRecord::parse_line(line).unwrap().fault, Some(true));

        let line = r#"{"time": 1, "voltage": 12, "current": 1.6, "rpm": 1400, "fault": false}"#;
        assert_eq!(FeedRecord::parse_line(line).unwrap().fault, Some(false));

        let line = r#"{"time": 1, "voltage": 12, "current": 1.6, "rpm": 1400, "fault": null}"#;
        assert_eq!(FeedRecord::parse_line(line).unwrap().fault, None);
    }

    #[test]
    fn test_rejects_bad_label() {
        let line = r#"{"time": 1, "voltage": 12, "current": 1.6, "rpm": 1400, "fault": 2}"#;
        let err = FeedRecord::parse_line(line).unwrap_err();
        assert!(err.to_string().contains("fault label must be 0 or 1"));
    }

    #[test]
    fn test_parse_bytes() {
        let line = b"{\"time\": 7, \"voltage\": 12, \"current\": 1.5, \"rpm\": 1500}\r";
        assert_eq!(FeedRecord::parse_bytes(line).unwrap().time, 7);
        assert!(FeedRecord::parse_bytes(b"\xff\xfe garbage").is_err());
    }

    #[test]
    fn test_rejects_missing_signal() {
        let line = r#"{"time": 1, "voltage": 12, "current": 1.6}"#;
        assert!(FeedRecord::parse_line(line).is_err());
    }

    #[test]
    fn test_unlabeled_record_serializes_without_fault() {
        let record = FeedRecord::from(Reading::new(2, 12.0, 1.5, 1500.0));
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("fault"));
        assert_eq!(FeedRecord::parse_line(&json).unwrap(), record);
    }
}
