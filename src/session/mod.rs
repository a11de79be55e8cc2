//! Stateful monitoring session.
//!
//! A [`MonitoringSession`] owns the verdict history of one run of the
//! machine and turns each new reading into a fresh [`HealthSnapshot`].
//!
//! ## Lifecycle
//!
//! ```text
//!            advance()            advance()
//!   Empty ─────────────▶ Active ◀──────────┐
//!                          │  └────────────┘
//!                          │ close() or sample cap reached
//!                          ▼
//!                      Finalized ──▶ advance() fails with SessionClosed
//! ```
//!
//! RUL is computed over a rolling window of the last `window` verdicts;
//! fault and anomaly counts, timelines and the maintenance summary use the
//! full history.

mod window;

pub use window::RollingWindow;

use motorwatch_types::{HealthSnapshot, HealthStatus, Reading, SchemaVersion};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PipelineError, Result};
use crate::pipeline::{estimate, Pipeline, Suggestion, Verdict};

/// Default number of verdicts used for RUL estimation.
pub const DEFAULT_WINDOW: usize = 60;

/// Default number of readings after which a session finalizes itself.
pub const DEFAULT_SAMPLE_CAP: usize = 300;

/// Sizing of a monitoring session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Verdicts kept in the RUL window.
    pub window: usize,
    /// Readings accepted before the session finalizes.
    pub sample_cap: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            sample_cap: DEFAULT_SAMPLE_CAP,
        }
    }
}

impl SessionConfig {
    /// Reject sizes that cannot drive a session.
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(PipelineError::InvalidConfig(
                "window must hold at least one verdict".to_string(),
            ));
        }
        if self.sample_cap == 0 {
            return Err(PipelineError::InvalidConfig(
                "sample cap must allow at least one reading".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No reading accepted yet.
    Empty,
    /// Accepting readings.
    Active,
    /// Closed for good; every further advance fails.
    Finalized,
}

impl SessionState {
    /// Returns the display label for this state.
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Empty => "empty",
            SessionState::Active => "active",
            SessionState::Finalized => "finalized",
        }
    }
}

/// Rolling health assessment of one machine run.
///
/// # Example
///
/// ```
/// use motorwatch::{FixedAnomalyModel, FixedFaultModel, MonitoringSession, Pipeline, Reading};
///
/// let pipeline = Pipeline::new(
///     Box::new(FixedFaultModel::new(0.0)),
///     Box::new(FixedAnomalyModel::new(false)),
/// );
/// let mut session = MonitoringSession::with_defaults(pipeline);
///
/// let snapshot = session.advance(Reading::new(0, 12.0, 1.5, 1500.0)).unwrap();
/// assert_eq!(snapshot.rul_fault_pct, 100);
/// assert_eq!(snapshot.suggestions, vec!["System appears stable."]);
/// ```
#[derive(Debug)]
pub struct MonitoringSession {
    pipeline: Pipeline,
    config: SessionConfig,
    state: SessionState,
    history: Vec<Verdict>,
    window: RollingWindow<Verdict>,
    fault_count: u64,
    anomaly_count: u64,
    labeled: u64,
    labeled_correct: u64,
    snapshot: Option<HealthSnapshot>,
}

impl MonitoringSession {
    /// Create a session, validating its sizing.
    pub fn new(pipeline: Pipeline, config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(pipeline, config))
    }

    /// Create a session with a 60-verdict window and a 300-reading cap.
    pub fn with_defaults(pipeline: Pipeline) -> Self {
        Self::build(pipeline, SessionConfig::default())
    }

    fn build(pipeline: Pipeline, config: SessionConfig) -> Self {
        Self {
            pipeline,
            window: RollingWindow::new(config.window),
            config,
            state: SessionState::Empty,
            history: Vec::new(),
            fault_count: 0,
            anomaly_count: 0,
            labeled: 0,
            labeled_correct: 0,
            snapshot: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finalized(&self) -> bool {
        self.state == SessionState::Finalized
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// The snapshot installed by the last successful advance.
    pub fn snapshot(&self) -> Option<&HealthSnapshot> {
        self.snapshot.as_ref()
    }

    /// Every verdict accepted so far, oldest first.
    pub fn history(&self) -> &[Verdict] {
        &self.history
    }

    /// Verdicts currently used for RUL estimation, oldest first.
    pub fn window(&self) -> &RollingWindow<Verdict> {
        &self.window
    }

    /// Number of readings accepted so far.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Finalize the session. Closing twice is a no-op.
    pub fn close(&mut self) {
        if !self.is_finalized() {
            info!("Session closed after {} readings", self.history.len());
            self.state = SessionState::Finalized;
        }
    }

    /// Consume one reading and return the recomputed snapshot.
    ///
    /// Either every step succeeds and the new verdict, window and snapshot
    /// are installed together, or the call fails and the session is left
    /// exactly as it was.
    pub fn advance(&mut self, reading: Reading) -> Result<&HealthSnapshot> {
        self.advance_inner(reading, None)
    }

    /// Like [`advance`](Self::advance), also recording the ground-truth
    /// fault label for [`accuracy`](Self::accuracy).
    pub fn advance_labeled(&mut self, reading: Reading, fault: bool) -> Result<&HealthSnapshot> {
        self.advance_inner(reading, Some(fault))
    }

    fn advance_inner(&mut self, reading: Reading, label: Option<bool>) -> Result<&HealthSnapshot> {
        if self.is_finalized() {
            return Err(PipelineError::SessionClosed);
        }
        if let Some(last) = self.history.last() {
            let previous = last.reading().time;
            if reading.time <= previous {
                return Err(PipelineError::NonMonotonicTime {
                    previous,
                    got: reading.time,
                });
            }
        }

        let verdict = self.pipeline.assess(&reading)?;
        let snapshot = self.compute_snapshot(&verdict)?;

        // Nothing below can fail.
        self.window.push(verdict);
        self.history.push(verdict);
        self.fault_count = snapshot.fault_count;
        self.anomaly_count = snapshot.anomaly_count;
        if let Some(fault) = label {
            self.labeled += 1;
            if fault == verdict.fault_predicted() {
                self.labeled_correct += 1;
            }
        }

        debug!(
            "t={}s score={:.3} fault={} anomaly={} rul_fault={}% rul_anomaly={}%",
            reading.time,
            verdict.fault_score(),
            verdict.fault_predicted(),
            verdict.anomaly(),
            snapshot.rul_fault_pct,
            snapshot.rul_anomaly_pct
        );

        self.state = if self.history.len() >= self.config.sample_cap {
            info!(
                "Sample cap of {} reached, session finalized",
                self.config.sample_cap
            );
            SessionState::Finalized
        } else {
            SessionState::Active
        };

        Ok(self.snapshot.insert(snapshot))
    }

    /// Build the snapshot the session would hold after accepting `verdict`.
    fn compute_snapshot(&self, verdict: &Verdict) -> Result<HealthSnapshot> {
        let rul = estimate(self.window.with_next(verdict))?;

        let fault_count = self.fault_count + u64::from(verdict.fault_predicted());
        let anomaly_count = self.anomaly_count + u64::from(verdict.anomaly());

        let advice = self.pipeline.advise(verdict);

        Ok(HealthSnapshot {
            version: SchemaVersion::current(),
            time: verdict.reading().time,
            samples: self.history.len() as u64 + 1,
            rul_fault_pct: rul.fault_pct,
            rul_anomaly_pct: rul.anomaly_pct,
            fault_count,
            anomaly_count,
            status: HealthStatus::from_rul(rul.fault_pct.min(rul.anomaly_pct)),
            suggestions: advice.suggestion_messages(),
            corrective_actions: advice.action_messages(),
        })
    }

    /// Times of every reading with a predicted fault.
    pub fn fault_times(&self) -> Vec<u64> {
        self.times_where(Verdict::fault_predicted)
    }

    /// Times of every reading flagged as anomalous.
    pub fn anomaly_times(&self) -> Vec<u64> {
        self.times_where(Verdict::anomaly)
    }

    fn times_where(&self, predicate: impl Fn(&Verdict) -> bool) -> Vec<u64> {
        self.history
            .iter()
            .filter(|v| predicate(*v))
            .map(|v| v.reading().time)
            .collect()
    }

    /// Distinct non-stable suggestions raised over the whole history, in
    /// order of first appearance.
    pub fn maintenance_summary(&self) -> Vec<Suggestion> {
        let mut summary: Vec<Suggestion> = Vec::new();
        for verdict in &self.history {
            for suggestion in self.pipeline.advise(verdict).suggestions {
                if suggestion != Suggestion::Stable && !summary.contains(&suggestion) {
                    summary.push(suggestion);
                }
            }
        }
        summary
    }

    /// Share of labeled readings whose fault prediction matched the label.
    ///
    /// Returns None until at least one labeled reading has been accepted.
    pub fn accuracy(&self) -> Option<f64> {
        if self.labeled == 0 {
            return None;
        }
        Some(self.labeled_correct as f64 / self.labeled as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FixedAnomalyModel, FixedFaultModel};

    fn session(score: f64, anomaly: bool, config: SessionConfig) -> MonitoringSession {
        let pipeline = Pipeline::new(
            Box::new(FixedFaultModel::new(score)),
            Box::new(FixedAnomalyModel::new(anomaly)),
        );
        MonitoringSession::new(pipeline, config).unwrap()
    }

    fn healthy(time: u64) -> Reading {
        Reading::new(time, 12.0, 1.5, 1500.0)
    }

    #[test]
    fn test_lifecycle() {
        let mut session = session(0.0, false, SessionConfig::default());
        assert_eq!(session.state(), SessionState::Empty);
        assert!(session.snapshot().is_none());

        session.advance(healthy(0)).unwrap();
        assert_eq!(session.state(), SessionState::Active);

        session.close();
        assert_eq!(session.state(), SessionState::Finalized);
        assert_eq!(
            session.advance(healthy(1)).unwrap_err(),
            PipelineError::SessionClosed
        );
    }

    #[test]
    fn test_cap_finalizes() {
        let config = SessionConfig {
            window: 2,
            sample_cap: 3,
        };
        let mut session = session(0.0, false, config);
        for t in 0..3 {
            session.advance(healthy(t)).unwrap();
        }
        assert!(session.is_finalized());
        assert_eq!(session.len(), 3);
        assert_eq!(
            session.advance(healthy(3)).unwrap_err(),
            PipelineError::SessionClosed
        );
    }

    #[test]
    fn test_rejects_non_increasing_time() {
        let mut session = session(0.0, false, SessionConfig::default());
        session.advance(healthy(5)).unwrap();

        let err = session.advance(healthy(5)).unwrap_err();
        assert_eq!(err, PipelineError::NonMonotonicTime { previous: 5, got: 5 });
        let err = session.advance(healthy(4)).unwrap_err();
        assert_eq!(err, PipelineError::NonMonotonicTime { previous: 5, got: 4 });

        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_window_bounds_rul_but_not_counts() {
        let config = SessionConfig {
            window: 2,
            sample_cap: 10,
        };
        let mut session = session(1.0, true, config);
        for t in 0..5 {
            session.advance(healthy(t)).unwrap();
        }
        let snapshot = session.snapshot().unwrap();
        assert_eq!(session.window().len(), 2);
        assert_eq!(snapshot.fault_count, 5);
        assert_eq!(snapshot.anomaly_count, 5);
        assert_eq!(snapshot.samples, 5);
        assert_eq!(snapshot.rul_fault_pct, 0);
        assert_eq!(snapshot.status, HealthStatus::Critical);
    }

    #[test]
    fn test_failed_advance_keeps_prior_state() {
        let mut session = session(0.0, false, SessionConfig::default());
        session.advance(healthy(0)).unwrap();
        let before = session.snapshot().cloned();

        let err = session.advance(Reading::new(0, 12.0, 1.5, 1500.0)).unwrap_err();
        assert!(matches!(err, PipelineError::NonMonotonicTime { .. }));
        assert_eq!(session.snapshot().cloned(), before);
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.window().len(), 1);
    }

    #[test]
    fn test_counts_skip_rejected_readings() {
        let mut session = session(1.0, true, SessionConfig::default());
        session.advance(healthy(0)).unwrap();
        session.advance(healthy(1)).unwrap();
        assert!(session.advance(healthy(1)).is_err());

        let snapshot = session.advance(healthy(2)).unwrap().clone();
        assert_eq!(snapshot.fault_count, 3);
        assert_eq!(snapshot.anomaly_count, 3);
        assert_eq!(session.fault_times().len() as u64, snapshot.fault_count);
    }

    #[test]
    fn test_contract_violation_installs_nothing() {
        let mut session = session(2.0, false, SessionConfig::default());
        let err = session.advance(healthy(0)).unwrap_err();
        assert!(matches!(err, PipelineError::ModelContractViolation { .. }));
        assert_eq!(session.state(), SessionState::Empty);
        assert!(session.snapshot().is_none());
        assert!(session.is_empty());
    }

    #[test]
    fn test_invalid_config() {
        let pipeline = Pipeline::new(
            Box::new(FixedFaultModel::new(0.0)),
            Box::new(FixedAnomalyModel::new(false)),
        );
        let err = MonitoringSession::new(
            pipeline,
            SessionConfig {
                window: 0,
                sample_cap: 300,
            },
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));
    }

    #[test]
    fn test_timelines_and_summary() {
        let mut session = session(0.9, false, SessionConfig::default());
        session.advance(healthy(0)).unwrap();
        session.advance(Reading::new(1, 12.0, 3.0, 1500.0)).unwrap();
        session.advance(Reading::new(2, 12.0, 3.0, 1000.0)).unwrap();

        assert_eq!(session.fault_times(), vec![0, 1, 2]);
        assert!(session.anomaly_times().is_empty());
        assert_eq!(
            session.maintenance_summary(),
            vec![Suggestion::HighCurrent, Suggestion::LowRpm]
        );
    }

    #[test]
    fn test_accuracy() {
        let mut session = session(0.9, false, SessionConfig::default());
        assert_eq!(session.accuracy(), None);

        session.advance_labeled(healthy(0), true).unwrap();
        session.advance_labeled(healthy(1), false).unwrap();
        session.advance(healthy(2)).unwrap();

        assert_eq!(session.accuracy(), Some(0.5));
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut session = session(0.0, false, SessionConfig::default());
        session.close();
        session.close();
        assert!(session.is_finalized());
    }
}
