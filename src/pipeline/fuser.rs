//! Score fusion: one fault probability plus one anomaly flag become a verdict.

use motorwatch_types::Reading;
use serde::Serialize;

use crate::error::{PipelineError, Result};

/// Default probability at or above which a reading counts as a predicted fault.
pub const DEFAULT_DECISION_THRESHOLD: f64 = 0.5;

/// The fused assessment of a single reading.
///
/// Verdicts are only produced by [`fuse`], so `fault_predicted` always
/// agrees with the score and threshold they were built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Verdict {
    reading: Reading,
    fault_score: f64,
    fault_predicted: bool,
    anomaly: bool,
}

impl Verdict {
    pub fn reading(&self) -> &Reading {
        &self.reading
    }

    /// Fault probability reported by the fault model.
    pub fn fault_score(&self) -> f64 {
        self.fault_score
    }

    /// Returns true if the fault score reached the decision threshold.
    pub fn fault_predicted(&self) -> bool {
        self.fault_predicted
    }

    /// Returns true if the anomaly model flagged the reading.
    pub fn anomaly(&self) -> bool {
        self.anomaly
    }
}

/// Check that a decision threshold lies in the open interval (0, 1).
pub fn validate_threshold(decision_threshold: f64) -> Result<f64> {
    if decision_threshold > 0.0 && decision_threshold < 1.0 {
        Ok(decision_threshold)
    } else {
        Err(PipelineError::InvalidThreshold(decision_threshold))
    }
}

/// Fuse a fault score and an anomaly flag into a [`Verdict`].
///
/// A score exactly equal to the threshold is a predicted fault.
///
/// # Example
///
/// ```
/// use motorwatch::{fuse, Reading};
///
/// let reading = Reading::new(0, 12.0, 1.5, 1500.0);
/// let verdict = fuse(reading, 0.5, false, 0.5).unwrap();
/// assert!(verdict.fault_predicted());
/// ```
pub fn fuse(
    reading: Reading,
    fault_score: f64,
    anomaly: bool,
    decision_threshold: f64,
) -> Result<Verdict> {
    let decision_threshold = validate_threshold(decision_threshold)?;
    if !(0.0..=1.0).contains(&fault_score) {
        return Err(PipelineError::InvalidScore(fault_score));
    }

    Ok(Verdict {
        reading,
        fault_score,
        fault_predicted: fault_score >= decision_threshold,
        anomaly,
    })
}
