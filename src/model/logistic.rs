//! Logistic-regression fault classifier.

use serde::{Deserialize, Serialize};

use super::FaultModel;
use crate::error::{Port, PipelineError, Result};

/// Fault classifier of the form `sigmoid(w_v*voltage + w_c*current + w_r*rpm + bias)`.
///
/// The coefficients come from an offline training run and are loaded
/// through configuration; nothing here fits them. The defaults put the
/// decision boundary between the healthy operating point (about 1.5 A at
/// 1500 RPM) and the overload region (above 2.5 A, below 1150 RPM).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticFaultModel {
    pub voltage_weight: f64,
    pub current_weight: f64,
    pub rpm_weight: f64,
    pub bias: f64,
}

impl Default for LogisticFaultModel {
    fn default() -> Self {
        Self {
            voltage_weight: 0.0,
            current_weight: 8.0,
            rpm_weight: -0.04,
            bias: 32.0,
        }
    }
}

impl LogisticFaultModel {
    /// Create a classifier from explicit coefficients.
    pub fn new(voltage_weight: f64, current_weight: f64, rpm_weight: f64, bias: f64) -> Self {
        Self {
            voltage_weight,
            current_weight,
            rpm_weight,
            bias,
        }
    }

    fn logit(&self, voltage: f64, current: f64, rpm: f64) -> f64 {
        self.voltage_weight * voltage
            + self.current_weight * current
            + self.rpm_weight * rpm
            + self.bias
    }
}

impl FaultModel for LogisticFaultModel {
    fn predict_fault_probability(&self, voltage: f64, current: f64, rpm: f64) -> Result<f64> {
        let z = self.logit(voltage, current, rpm);
        if z.is_nan() {
            return Err(PipelineError::Model {
                port: Port::Fault,
                message: format!("non-numeric input (voltage={voltage}, current={current}, rpm={rpm})"),
            });
        }
        Ok(1.0 / (1.0 + (-z).exp()))
    }

    fn description(&self) -> &str {
        "logistic fault classifier"
    }
}
