//! Constant-output models.

use super::{AnomalyModel, FaultModel};
use crate::error::Result;

/// A fault model that returns the same probability for every reading.
///
/// The value is returned as-is, so a stub configured outside `[0, 1]` can be
/// used to exercise the pipeline's contract checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedFaultModel {
    probability: f64,
}

impl FixedFaultModel {
    /// Create a model that always predicts `probability`.
    pub fn new(probability: f64) -> Self {
        Self { probability }
    }
}

impl FaultModel for FixedFaultModel {
    fn predict_fault_probability(&self, _voltage: f64, _current: f64, _rpm: f64) -> Result<f64> {
        Ok(self.probability)
    }

    fn description(&self) -> &str {
        "fixed fault probability"
    }
}

/// An anomaly model that returns the same flag for every reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAnomalyModel {
    anomaly: bool,
}

impl FixedAnomalyModel {
    /// Create a model that always answers `anomaly`.
    pub fn new(anomaly: bool) -> Self {
        Self { anomaly }
    }
}

impl AnomalyModel for FixedAnomalyModel {
    fn predict_is_anomaly(&self, _voltage: f64, _current: f64, _rpm: f64) -> Result<bool> {
        Ok(self.anomaly)
    }

    fn description(&self) -> &str {
        "fixed anomaly flag"
    }
}

/// Anomaly detection switched off.
///
/// Every reading is reported as normal, so the anomaly-based RUL stays at
/// 100% and no anomaly advice is produced. This exists so that running
/// without a detector is a visible configuration choice rather than a
/// fallback hidden inside the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisabledAnomalyModel;

impl AnomalyModel for DisabledAnomalyModel {
    fn predict_is_anomaly(&self, _voltage: f64, _current: f64, _rpm: f64) -> Result<bool> {
        Ok(false)
    }

    fn description(&self) -> &str {
        "anomaly detection disabled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_fault_model_passes_value_through() {
        let model = FixedFaultModel::new(1.7);
        assert_eq!(model.predict_fault_probability(0.0, 0.0, 0.0).unwrap(), 1.7);
    }

    #[test]
    fn test_disabled_never_flags() {
        let model = DisabledAnomalyModel;
        assert!(!model.predict_is_anomaly(99.0, 99.0, 0.0).unwrap());
        assert_eq!(model.description(), "anomaly detection disabled");
    }
}
