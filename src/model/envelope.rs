//! Operating-envelope anomaly detector.

use serde::{Deserialize, Serialize};

use super::AnomalyModel;
use crate::error::{Port, PipelineError, Result};

/// Inclusive `[min, max]` band for one signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub min: f64,
    pub max: f64,
}

impl Envelope {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns true if `value` lies inside the band.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Flags a reading as anomalous when any signal leaves its envelope.
///
/// The envelopes describe the distribution the detector was fitted on,
/// so they are loaded from configuration like any other model artifact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeAnomalyModel {
    pub voltage: Envelope,
    pub current: Envelope,
    pub rpm: Envelope,
}

impl Default for EnvelopeAnomalyModel {
    fn default() -> Self {
        Self {
            voltage: Envelope::new(11.4, 12.6),
            current: Envelope::new(1.3, 3.5),
            rpm: Envelope::new(1000.0, 1560.0),
        }
    }
}

impl AnomalyModel for EnvelopeAnomalyModel {
    fn predict_is_anomaly(&self, voltage: f64, current: f64, rpm: f64) -> Result<bool> {
        if voltage.is_nan() || current.is_nan() || rpm.is_nan() {
            return Err(PipelineError::Model {
                port: Port::Anomaly,
                message: format!("non-numeric input (voltage={voltage}, current={current}, rpm={rpm})"),
            });
        }

        let inside = self.voltage.contains(voltage)
            && self.current.contains(current)
            && self.rpm.contains(rpm);
        Ok(!inside)
    }

    fn description(&self) -> &str {
        "operating envelope detector"
    }
}
