//! Remaining-useful-life estimation over a window of verdicts.
//!
//! Both estimates use the same squared decay, `floor(100 * (1 - risk)^2)`:
//! one elevated reading barely moves the estimate, while sustained risk
//! drives it toward zero faster than linearly. Downstream health bands
//! (see [`HealthStatus::from_rul`](motorwatch_types::HealthStatus::from_rul))
//! are calibrated against this curve.

use serde::Serialize;

use super::Verdict;
use crate::error::{PipelineError, Result};

/// The pair of RUL estimates for one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RulEstimate {
    /// RUL from the mean fault probability.
    pub fault_pct: u8,
    /// RUL from the share of anomalous readings.
    pub anomaly_pct: u8,
}

/// Map a risk in `[0, 1]` to a RUL percentage.
pub fn rul_pct(risk: f64) -> u8 {
    let pct = (100.0 * (1.0 - risk).powi(2)).floor();
    pct.clamp(0.0, 100.0) as u8
}

/// Estimate RUL over `window`, oldest verdict first.
///
/// The caller owns the window; this function only needs to walk it once.
pub fn estimate<'a, I>(window: I) -> Result<RulEstimate>
where
    I: IntoIterator<Item = &'a Verdict>,
{
    let mut len = 0usize;
    let mut score_sum = 0.0;
    let mut anomalies = 0usize;

    for verdict in window {
        len += 1;
        score_sum += verdict.fault_score();
        if verdict.anomaly() {
            anomalies += 1;
        }
    }

    if len == 0 {
        return Err(PipelineError::EmptyWindow);
    }

    let fault_risk = score_sum / len as f64;
    let anomaly_risk = anomalies as f64 / len as f64;

    Ok(RulEstimate {
        fault_pct: rul_pct(fault_risk),
        anomaly_pct: rul_pct(anomaly_risk),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::fuse;
    use motorwatch_types::Reading;

    fn verdicts(scores: &[f64], anomalies: &[bool]) -> Vec<Verdict> {
        scores
            .iter()
            .zip(anomalies)
            .enumerate()
            .map(|(i, (&score, &anomaly))| {
                fuse(Reading::new(i as u64, 12.0, 1.5, 1500.0), score, anomaly, 0.5).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_empty_window() {
        let window: Vec<Verdict> = Vec::new();
        assert_eq!(estimate(&window), Err(PipelineError::EmptyWindow));
    }

    #[test]
    fn test_healthy_window_is_full_life() {
        let window = verdicts(&[0.0; 60], &[false; 60]);
        assert_eq!(
            estimate(&window).unwrap(),
            RulEstimate {
                fault_pct: 100,
                anomaly_pct: 100
            }
        );
    }

    #[test]
    fn test_certain_fault_window_is_zero_life() {
        let window = verdicts(&[1.0; 10], &[false; 10]);
        let rul = estimate(&window).unwrap();
        assert_eq!(rul.fault_pct, 0);
        assert_eq!(rul.anomaly_pct, 100);
    }

    #[test]
    fn test_squared_decay() {
        // mean 0.5 -> 100 * 0.25
        let window = verdicts(&[0.25, 0.75], &[true, false]);
        let rul = estimate(&window).unwrap();
        assert_eq!(rul.fault_pct, 25);
        assert_eq!(rul.anomaly_pct, 25);
    }

    #[test]
    fn test_floor_not_round() {
        // (1 - 1/3)^2 * 100 = 44.44..
        let window = verdicts(&[0.0, 0.0, 0.0], &[true, false, false]);
        assert_eq!(estimate(&window).unwrap().anomaly_pct, 44);
        // (1 - 0.125)^2 * 100 = 76.5625
        assert_eq!(rul_pct(0.125), 76);
    }

    #[test]
    fn test_single_spike_does_not_collapse() {
        let mut scores = [0.0; 20];
        scores[19] = 1.0;
        let window = verdicts(&scores, &[false; 20]);
        assert_eq!(estimate(&window).unwrap().fault_pct, 90);
    }

    #[test]
    fn test_rul_pct_is_clamped() {
        for step in 0..=100 {
            let pct = rul_pct(step as f64 / 100.0);
            assert!(pct <= 100);
        }
        assert_eq!(rul_pct(0.0), 100);
        assert_eq!(rul_pct(1.0), 0);
    }

    #[test]
    fn test_accepts_any_iterator() {
        let window = verdicts(&[0.0, 1.0], &[false, true]);
        let rul = estimate(window.iter().skip(1)).unwrap();
        assert_eq!(rul.fault_pct, 0);
        assert_eq!(rul.anomaly_pct, 0);
    }
}
