//! Rule-based maintenance advice for a single verdict.

use std::fmt;

use motorwatch_types::Reading;
use serde::{Deserialize, Serialize};

use super::Verdict;

/// A maintenance suggestion raised by one advisory rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Suggestion {
    HighCurrent,
    LowRpm,
    VoltageCurrentStress,
    AnomalyReview,
    /// No rule fired. Never appears alongside another suggestion.
    Stable,
}

impl Suggestion {
    pub fn message(&self) -> &'static str {
        match self {
            Suggestion::HighCurrent => "High current: Reduce motor load or check for blockage.",
            Suggestion::LowRpm => "Low RPM: Inspect motor for wear or shaft issues.",
            Suggestion::VoltageCurrentStress => {
                "Voltage-Current stress: Evaluate power supply or motor resistance."
            }
            Suggestion::AnomalyReview => "Anomaly detected: Review recent operational changes.",
            Suggestion::Stable => "System appears stable.",
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A corrective action for the machine's current condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectiveAction {
    ReduceCurrent,
    IncreaseRpm,
    InspectSensorDrift,
    /// Nothing applies. Never appears alongside another action.
    NoneNeeded,
}

impl CorrectiveAction {
    pub fn message(&self) -> &'static str {
        match self {
            CorrectiveAction::ReduceCurrent => "Reduce current draw (lower torque or load).",
            CorrectiveAction::IncreaseRpm => {
                "Increase RPM (boost motor voltage or recalibrate load)."
            }
            CorrectiveAction::InspectSensorDrift => {
                "Anomaly detected: inspect for irregular sensor drift or noise."
            }
            CorrectiveAction::NoneNeeded => "No corrective action needed.",
        }
    }
}

impl fmt::Display for CorrectiveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Suggestions and actions for one verdict, each list in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub suggestions: Vec<Suggestion>,
    pub actions: Vec<CorrectiveAction>,
}

impl Advice {
    /// Returns true if the only suggestion is [`Suggestion::Stable`].
    pub fn is_stable(&self) -> bool {
        self.suggestions == [Suggestion::Stable]
    }

    pub fn suggestion_messages(&self) -> Vec<String> {
        self.suggestions.iter().map(ToString::to_string).collect()
    }

    pub fn action_messages(&self) -> Vec<String> {
        self.actions.iter().map(ToString::to_string).collect()
    }
}

/// Signal limits used by the advisory rules.
///
/// The rule set and its order are fixed; only the limits are tunable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionAdvisor {
    /// Current above which the load is too high (A).
    pub high_current: f64,
    /// Speed below which the shaft is too slow (RPM).
    pub low_rpm: f64,
    /// Voltage above which combined electrical stress is checked (V).
    pub stress_voltage: f64,
    /// Current above which combined electrical stress is checked (A).
    pub stress_current: f64,
}

impl Default for ActionAdvisor {
    fn default() -> Self {
        Self {
            high_current: 2.5,
            low_rpm: 1150.0,
            stress_voltage: 12.2,
            stress_current: 2.0,
        }
    }
}

impl ActionAdvisor {
    /// Evaluate every rule against the verdict and its reading.
    ///
    /// # Example
    ///
    /// ```
    /// use motorwatch::{fuse, ActionAdvisor, CorrectiveAction, Reading, Suggestion};
    ///
    /// let verdict = fuse(Reading::new(0, 12.0, 1.5, 1500.0), 0.1, false, 0.5).unwrap();
    /// let advice = ActionAdvisor::default().suggest(&verdict);
    ///
    /// assert_eq!(advice.suggestions, vec![Suggestion::Stable]);
    /// assert_eq!(advice.actions, vec![CorrectiveAction::NoneNeeded]);
    /// ```
    pub fn suggest(&self, verdict: &Verdict) -> Advice {
        Advice {
            suggestions: self.suggestions(verdict),
            actions: self.actions(verdict),
        }
    }

    fn suggestions(&self, verdict: &Verdict) -> Vec<Suggestion> {
        let reading = verdict.reading();
        let mut suggestions = Vec::new();

        if self.is_high_current(reading) {
            suggestions.push(Suggestion::HighCurrent);
        }
        if self.is_low_rpm(reading) {
            suggestions.push(Suggestion::LowRpm);
        }
        if reading.voltage > self.stress_voltage && reading.current > self.stress_current {
            suggestions.push(Suggestion::VoltageCurrentStress);
        }
        if verdict.anomaly() {
            suggestions.push(Suggestion::AnomalyReview);
        }

        if suggestions.is_empty() {
            suggestions.push(Suggestion::Stable);
        }
        suggestions
    }

    fn actions(&self, verdict: &Verdict) -> Vec<CorrectiveAction> {
        let reading = verdict.reading();
        let mut actions = Vec::new();

        if verdict.fault_predicted() {
            if self.is_high_current(reading) {
                actions.push(CorrectiveAction::ReduceCurrent);
            }
            if self.is_low_rpm(reading) {
                actions.push(CorrectiveAction::IncreaseRpm);
            }
        } else if verdict.anomaly() {
            actions.push(CorrectiveAction::InspectSensorDrift);
        }

        if actions.is_empty() {
            actions.push(CorrectiveAction::NoneNeeded);
        }
        actions
    }

    fn is_high_current(&self, reading: &Reading) -> bool {
        reading.current > self.high_current
    }

    fn is_low_rpm(&self, reading: &Reading) -> bool {
        reading.rpm < self.low_rpm
    }
}
