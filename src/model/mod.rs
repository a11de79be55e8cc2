//! Model ports: the fault classifier and anomaly detector the pipeline consumes.
//!
//! The pipeline never looks inside a model. It sees two capabilities with a
//! fixed input/output contract, and any implementation satisfying that
//! contract can be plugged in: a coefficient set exported from an offline
//! training run, a call into an inference service, or a constant stub in
//! tests.
//!
//! ## Implementations
//!
//! - [`LogisticFaultModel`]: logistic regression over (voltage, current, rpm)
//! - [`EnvelopeAnomalyModel`]: flags readings outside per-signal operating envelopes
//! - [`DisabledAnomalyModel`]: explicit "anomaly detection disabled" choice
//! - [`FixedFaultModel`] / [`FixedAnomalyModel`]: constant outputs for tests and dry runs

mod envelope;
mod fixed;
mod logistic;

pub use envelope::{Envelope, EnvelopeAnomalyModel};
pub use fixed::{DisabledAnomalyModel, FixedAnomalyModel, FixedFaultModel};
pub use logistic::LogisticFaultModel;

use std::fmt::Debug;

use crate::error::Result;

/// A supervised classifier estimating the probability that a reading is faulty.
///
/// # Contract
///
/// Implementations must return a probability in `[0, 1]`. The pipeline checks
/// every returned value and rejects anything else (including NaN) with
/// [`PipelineError::ModelContractViolation`](crate::PipelineError::ModelContractViolation)
/// instead of clamping it. A model that cannot produce a prediction at all
/// should return [`PipelineError::Model`](crate::PipelineError::Model).
///
/// # Example
///
/// ```
/// use motorwatch::{FaultModel, FixedFaultModel};
///
/// let model = FixedFaultModel::new(0.25);
/// assert_eq!(model.predict_fault_probability(12.0, 1.5, 1500.0).unwrap(), 0.25);
/// ```
pub trait FaultModel: Send + Sync + Debug {
    /// Probability of a fault for the given signals.
    fn predict_fault_probability(&self, voltage: f64, current: f64, rpm: f64) -> Result<f64>;

    /// Returns a human-readable description of the model.
    fn description(&self) -> &str;
}

/// An unsupervised detector deciding whether a reading is an outlier
/// relative to the distribution it was fitted on.
pub trait AnomalyModel: Send + Sync + Debug {
    /// Returns true if the signals are anomalous.
    fn predict_is_anomaly(&self, voltage: f64, current: f64, rpm: f64) -> Result<bool>;

    /// Returns a human-readable description of the model.
    fn description(&self) -> &str;
}
