//! HealthSnapshot - the aggregate health verdict published after each reading.

use crate::SchemaVersion;

/// RUL percentage below which the machine is considered critical.
pub const RUL_CRITICAL_PCT: u8 = 20;

/// RUL percentage below which the machine needs close monitoring.
pub const RUL_WARNING_PCT: u8 = 50;

/// Health band derived from the remaining useful life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    /// Classify a remaining-useful-life percentage.
    pub fn from_rul(rul_pct: u8) -> Self {
        if rul_pct < RUL_CRITICAL_PCT {
            HealthStatus::Critical
        } else if rul_pct < RUL_WARNING_PCT {
            HealthStatus::Warning
        } else {
            HealthStatus::Healthy
        }
    }

    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "OK",
            HealthStatus::Warning => "WARN",
            HealthStatus::Critical => "CRIT",
        }
    }
}

/// The health of the machine as of the most recent reading.
///
/// Snapshots are rebuilt from scratch on every reading and handed to
/// consumers read-only; nothing patches an existing snapshot in place.
///
/// # Example
///
/// ```rust
/// use motorwatch_types::{HealthSnapshot, HealthStatus};
///
/// let snapshot = HealthSnapshot {
///     rul_fault_pct: 64,
///     rul_anomaly_pct: 90,
///     ..HealthSnapshot::default()
/// };
///
/// assert_eq!(snapshot.min_rul_pct(), 64);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthSnapshot {
    /// Schema version for forward compatibility.
    pub version: SchemaVersion,

    /// Time of the reading this snapshot was computed for.
    pub time: u64,

    /// Total readings consumed by the session so far.
    pub samples: u64,

    /// Remaining useful life estimated from mean fault probability.
    pub rul_fault_pct: u8,

    /// Remaining useful life estimated from the anomaly rate.
    pub rul_anomaly_pct: u8,

    /// Readings with a predicted fault over the whole session.
    pub fault_count: u64,

    /// Readings flagged as anomalous over the whole session.
    pub anomaly_count: u64,

    /// Health band of the lower of the two RUL estimates.
    pub status: HealthStatus,

    /// Maintenance suggestions for the latest reading, in rule order.
    pub suggestions: Vec<String>,

    /// Corrective actions for the latest reading, in rule order.
    pub corrective_actions: Vec<String>,
}

impl HealthSnapshot {
    /// The more pessimistic of the two RUL estimates.
    pub fn min_rul_pct(&self) -> u8 {
        self.rul_fault_pct.min(self.rul_anomaly_pct)
    }

    /// Returns true if any reading so far was a predicted fault or anomaly.
    pub fn has_findings(&self) -> bool {
        self.fault_count > 0 || self.anomaly_count > 0
    }
}

impl Default for HealthSnapshot {
    fn default() -> Self {
        Self {
            version: SchemaVersion::current(),
            time: 0,
            samples: 0,
            rul_fault_pct: 100,
            rul_anomaly_pct: 100,
            fault_count: 0,
            anomaly_count: 0,
            status: HealthStatus::Healthy,
            suggestions: Vec::new(),
            corrective_actions: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_bands() {
        assert_eq!(HealthStatus::from_rul(100), HealthStatus::Healthy);
        assert_eq!(HealthStatus::from_rul(50), HealthStatus::Healthy);
        assert_eq!(HealthStatus::from_rul(49), HealthStatus::Warning);
        assert_eq!(HealthStatus::from_rul(20), HealthStatus::Warning);
        assert_eq!(HealthStatus::from_rul(19), HealthStatus::Critical);
        assert_eq!(HealthStatus::from_rul(0), HealthStatus::Critical);
    }

    #[test]
    fn test_status_ordering() {
        assert!(HealthStatus::Critical > HealthStatus::Warning);
        assert!(HealthStatus::Warning > HealthStatus::Healthy);
        assert_eq!(HealthStatus::Critical.symbol(), "CRIT");
    }

    #[test]
    fn test_has_findings() {
        let mut snapshot = HealthSnapshot::default();
        assert!(!snapshot.has_findings());
        snapshot.anomaly_count = 1;
        assert!(snapshot.has_findings());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_shape() {
        let snapshot = HealthSnapshot {
            time: 12,
            samples: 13,
            status: HealthStatus::Warning,
            suggestions: vec!["System appears stable.".to_string()],
            ..HealthSnapshot::default()
        };

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["status"], "warning");
        assert_eq!(value["version"]["major"], crate::SCHEMA_VERSION);
        assert_eq!(value["suggestions"][0], "System appears stable.");

        let parsed: HealthSnapshot = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
