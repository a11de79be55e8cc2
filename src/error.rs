//! Error types for the decision pipeline.

use std::fmt;

use thiserror::Error;

/// Identifies which model port produced a value or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    /// The supervised fault classifier.
    Fault,
    /// The unsupervised anomaly detector.
    Anomaly,
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Fault => f.write_str("fault"),
            Port::Anomaly => f.write_str("anomaly"),
        }
    }
}

/// Errors raised by the pipeline.
///
/// None of these are retried or defaulted internally; every one surfaces
/// to the caller at the point it is detected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// A fault score handed to the fuser is not a probability.
    #[error("Invalid fault score {0}: expected a value in [0, 1]")]
    InvalidScore(f64),

    /// A decision threshold is outside the open interval (0, 1).
    #[error("Invalid decision threshold {0}: expected a value in (0, 1)")]
    InvalidThreshold(f64),

    /// RUL was requested for a window with no verdicts.
    #[error("Cannot estimate remaining useful life from an empty window")]
    EmptyWindow,

    /// The session has been finalized and accepts no more readings.
    #[error("Session is closed")]
    SessionClosed,

    /// A model port returned a value outside its contract.
    #[error("The {port} model returned {value}, outside its [0, 1] contract")]
    ModelContractViolation { port: Port, value: f64 },

    /// A model port call failed outright.
    #[error("The {port} model failed: {message}")]
    Model { port: Port, message: String },

    /// A reading did not arrive strictly after the previous one.
    #[error("Reading at {got}s does not follow the previous reading at {previous}s")]
    NonMonotonicTime { previous: u64, got: u64 },

    /// Configuration values that cannot drive a session.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the pipeline.
pub type Result<T> = std::result::Result<T, PipelineError>;
