//! The stateless half of the decision pipeline.
//!
//! ## Submodules
//!
//! - [`fuser`]: combines a fault probability and an anomaly flag into a [`Verdict`]
//! - [`rul`]: remaining-useful-life estimation over a window of verdicts
//! - [`advisor`]: rule-based suggestions and corrective actions per verdict
//!
//! ## Data Flow
//!
//! ```text
//! Reading
//!    │
//!    ├──▶ FaultModel::predict_fault_probability ──┐
//!    │                                            ├──▶ fuse() ──▶ Verdict
//!    └──▶ AnomalyModel::predict_is_anomaly ───────┘
//!                                                         │
//!                               ┌─────────────────────────┤
//!                               ▼                         ▼
//!                        rul::estimate(window)   ActionAdvisor::suggest
//! ```
//!
//! [`Pipeline`] binds the two model ports, the decision threshold and the
//! advisor limits together; [`MonitoringSession`](crate::MonitoringSession)
//! adds the state.

pub mod advisor;
pub mod fuser;
pub mod rul;

pub use advisor::{ActionAdvisor, Advice, CorrectiveAction, Suggestion};
pub use fuser::{fuse, validate_threshold, Verdict, DEFAULT_DECISION_THRESHOLD};
pub use rul::{estimate, rul_pct, RulEstimate};

use motorwatch_types::Reading;
use serde::Serialize;

use crate::error::{Port, PipelineError, Result};
use crate::model::{AnomalyModel, FaultModel};

/// Outcome of running a hypothetical reading through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Simulation {
    pub verdict: Verdict,
    /// RUL implied by this reading's fault probability alone.
    pub rul_pct: u8,
    pub advice: Advice,
}

/// Model ports plus the fixed decision parameters applied to every reading.
#[derive(Debug)]
pub struct Pipeline {
    fault_model: Box<dyn FaultModel>,
    anomaly_model: Box<dyn AnomalyModel>,
    decision_threshold: f64,
    advisor: ActionAdvisor,
}

impl Pipeline {
    /// Create a pipeline with the default threshold and advisor limits.
    pub fn new(fault_model: Box<dyn FaultModel>, anomaly_model: Box<dyn AnomalyModel>) -> Self {
        Self {
            fault_model,
            anomaly_model,
            decision_threshold: DEFAULT_DECISION_THRESHOLD,
            advisor: ActionAdvisor::default(),
        }
    }

    /// Replace the decision threshold. Fails unless it lies in (0, 1).
    pub fn with_threshold(mut self, decision_threshold: f64) -> Result<Self> {
        self.decision_threshold = validate_threshold(decision_threshold)?;
        Ok(self)
    }

    /// Replace the advisor limits.
    pub fn with_advisor(mut self, advisor: ActionAdvisor) -> Self {
        self.advisor = advisor;
        self
    }

    pub fn decision_threshold(&self) -> f64 {
        self.decision_threshold
    }

    pub fn advisor(&self) -> &ActionAdvisor {
        &self.advisor
    }

    /// Short description of both ports, for logs and status lines.
    pub fn describe_models(&self) -> String {
        format!(
            "{} + {}",
            self.fault_model.description(),
            self.anomaly_model.description()
        )
    }

    /// Score a reading with both ports and fuse the results.
    ///
    /// A fault probability outside `[0, 1]` is a contract violation of the
    /// fault port and is reported as such, never clamped.
    pub fn assess(&self, reading: &Reading) -> Result<Verdict> {
        let [voltage, current, rpm] = reading.features();

        let fault_score = self.fault_model.predict_fault_probability(voltage, current, rpm)?;
        if !(0.0..=1.0).contains(&fault_score) {
            return Err(PipelineError::ModelContractViolation {
                port: Port::Fault,
                value: fault_score,
            });
        }

        let anomaly = self.anomaly_model.predict_is_anomaly(voltage, current, rpm)?;

        fuse(*reading, fault_score, anomaly, self.decision_threshold)
    }

    /// Advice for a verdict under this pipeline's limits.
    pub fn advise(&self, verdict: &Verdict) -> Advice {
        self.advisor.suggest(verdict)
    }

    /// Run a what-if reading through the pipeline without touching any session.
    ///
    /// # Example
    ///
    /// ```
    /// use motorwatch::{FixedAnomalyModel, FixedFaultModel, Pipeline, Reading};
    ///
    /// let pipeline = Pipeline::new(
    ///     Box::new(FixedFaultModel::new(0.5)),
    ///     Box::new(FixedAnomalyModel::new(false)),
    /// );
    /// let sim = pipeline.simulate(&Reading::new(0, 12.0, 2.0, 1400.0)).unwrap();
    /// assert_eq!(sim.rul_pct, 25);
    /// assert!(sim.verdict.fault_predicted());
    /// ```
    pub fn simulate(&self, reading: &Reading) -> Result<Simulation> {
        let verdict = self.assess(reading)?;
        Ok(Simulation {
            rul_pct: rul_pct(verdict.fault_score()),
            advice: self.advise(&verdict),
            verdict,
        })
    }
}
