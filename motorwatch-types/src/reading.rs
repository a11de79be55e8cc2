//! A single sensor sample from the monitored machine.

/// One timestamped sample of the machine's electrical and mechanical state.
///
/// `time` is measured in whole seconds since the feed started and must be
/// strictly increasing within a monitoring session.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reading {
    /// Seconds since the start of the feed.
    pub time: u64,

    /// Supply voltage in volts.
    pub voltage: f64,

    /// Current draw in amperes.
    pub current: f64,

    /// Shaft speed in revolutions per minute.
    pub rpm: f64,
}

impl Reading {
    /// Create a reading.
    pub const fn new(time: u64, voltage: f64, current: f64, rpm: f64) -> Self {
        Self {
            time,
            voltage,
            current,
            rpm,
        }
    }

    /// The reading's signals in model feature order: voltage, current, rpm.
    pub const fn features(&self) -> [f64; 3] {
        [self.voltage, self.current, self.rpm]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_features_order() {
        let reading = Reading::new(7, 12.0, 1.5, 1500.0);
        assert_eq!(reading.features(), [12.0, 1.5, 1500.0]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_integer_signals() {
        let json = r#"{"time": 3, "voltage": 12, "current": 2, "rpm": 1400}"#;
        let reading: Reading = serde_json::from_str(json).unwrap();
        assert_eq!(reading, Reading::new(3, 12.0, 2.0, 1400.0));
    }
}
