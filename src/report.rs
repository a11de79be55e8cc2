//! End-of-run session report.

use std::path::Path;

use anyhow::{Context, Result};
use motorwatch_types::HealthSnapshot;
use serde::Serialize;

use crate::session::{MonitoringSession, SessionState};

/// Everything a session learned, in a form suitable for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub models: String,
    pub state: SessionState,
    pub samples: usize,
    /// Latest snapshot, absent if no reading was accepted.
    pub snapshot: Option<HealthSnapshot>,
    pub fault_times: Vec<u64>,
    pub anomaly_times: Vec<u64>,
    pub maintenance_summary: Vec<String>,
    /// Only present when the feed carried fault labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl SessionReport {
    pub fn from_session(session: &MonitoringSession) -> Self {
        Self {
            models: session.pipeline().describe_models(),
            state: session.state(),
            samples: session.len(),
            snapshot: session.snapshot().cloned(),
            fault_times: session.fault_times(),
            anomaly_times: session.anomaly_times(),
            maintenance_summary: session
                .maintenance_summary()
                .iter()
                .map(|s| s.message().to_string())
                .collect(),
            accuracy: session.accuracy(),
        }
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FixedAnomalyModel, FixedFaultModel};
    use crate::pipeline::Pipeline;
    use motorwatch_types::Reading;

    fn session(score: f64, anomaly: bool) -> MonitoringSession {
        MonitoringSession::with_defaults(Pipeline::new(
            Box::new(FixedFaultModel::new(score)),
            Box::new(FixedAnomalyModel::new(anomaly)),
        ))
    }

    #[test]
    fn test_empty_session_report() {
        let report = SessionReport::from_session(&session(0.0, false));
        assert_eq!(report.state, SessionState::Empty);
        assert_eq!(report.samples, 0);
        assert!(report.snapshot.is_none());
        assert!(report.maintenance_summary.is_empty());
        assert!(report.accuracy.is_none());
    }

    #[test]
    fn test_report_collects_timelines() {
        let mut session = session(0.9, true);
        session.advance(Reading::new(0, 12.0, 2.8, 1500.0)).unwrap();
        session.advance(Reading::new(1, 12.0, 1.5, 1500.0)).unwrap();

        let report = SessionReport::from_session(&session);
        assert_eq!(report.state, SessionState::Active);
        assert_eq!(report.samples, 2);
        assert_eq!(report.fault_times, vec![0, 1]);
        assert_eq!(report.anomaly_times, vec![0, 1]);
        assert_eq!(
            report.maintenance_summary.first().map(String::as_str),
            Some(crate::pipeline::Suggestion::HighCurrent.message())
        );
        assert_eq!(report.snapshot.as_ref().map(|s| s.time), Some(1));
    }

    #[test]
    fn test_write_json() {
        let mut session = session(0.1, false);
        session
            .advance_labeled(Reading::new(0, 12.0, 1.5, 1500.0), false)
            .unwrap();
        session.close();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        SessionReport::from_session(&session).write_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["state"], "finalized");
        assert_eq!(value["samples"], 1);
        assert_eq!(value["accuracy"], 1.0);
        assert_eq!(value["snapshot"]["status"], "healthy");
    }
}
