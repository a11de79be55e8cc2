//! # motorwatch
//!
//! A predictive-maintenance decision pipeline for a DC motor.
//!
//! Each timestamped reading (voltage, current, rpm) is scored by a fault
//! classifier and an anomaly detector, the two outputs are fused into a
//! verdict, and a monitoring session turns the verdict history into a
//! health snapshot: remaining useful life from two independent risk views,
//! fault and anomaly counts, and rule-based maintenance advice.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        MonitoringSession                         │
//! │  ┌─────────┐    ┌───────────────────────────────┐    ┌─────────┐ │
//! │  │ source  │───▶│           pipeline            │───▶│ session │ │
//! │  │ (input) │    │ model ports ─▶ fuse ─▶ advise │    │ (state) │ │
//! │  └─────────┘    └───────────────────────────────┘    └────┬────┘ │
//! │       ▲                                                   │      │
//! │       │                                                   ▼      │
//! │  FileSource | StreamSource | ChannelSource         HealthSnapshot│
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`model`]**: the [`FaultModel`] and [`AnomalyModel`] ports plus bundled
//!   implementations
//! - **[`pipeline`]**: score fusion, RUL estimation and the [`ActionAdvisor`]
//! - **[`session`]**: [`MonitoringSession`], the only stateful component
//! - **[`source`]**: reading feeds ([`ReadingSource`] trait) from files, TCP
//!   streams and in-process channels
//! - **[`config`]**: layered configuration (file + `MOTORWATCH_*` environment)
//! - **[`report`]**: end-of-run export
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Replay a recorded feed
//! motorwatch --file readings.jsonl
//!
//! # Follow a TCP feed and print one JSON snapshot per reading
//! motorwatch --connect localhost:9100 --json
//! ```
//!
//! ### As a library
//!
//! ```
//! use motorwatch::{
//!     FixedAnomalyModel, FixedFaultModel, HealthStatus, MonitoringSession, Pipeline, Reading,
//! };
//!
//! let pipeline = Pipeline::new(
//!     Box::new(FixedFaultModel::new(0.5)),
//!     Box::new(FixedAnomalyModel::new(false)),
//! );
//! let mut session = MonitoringSession::with_defaults(pipeline);
//!
//! let snapshot = session.advance(Reading::new(0, 12.0, 2.8, 1500.0)).unwrap();
//! assert_eq!(snapshot.rul_fault_pct, 25);
//! assert_eq!(snapshot.status, HealthStatus::Warning);
//! ```
//!
//! ### With a channel source
//!
//! ```
//! use motorwatch::{ChannelSource, FeedRecord, MonitorConfig, Reading, ReadingSource};
//!
//! let mut session = MonitorConfig::default().build_session().unwrap();
//! let (tx, mut source) = ChannelSource::create("simulator", 16);
//! tx.try_send(FeedRecord::from(Reading::new(0, 12.0, 1.5, 1500.0))).unwrap();
//!
//! while let Some(record) = source.poll() {
//!     session.advance(record.reading()).unwrap();
//! }
//! assert_eq!(session.len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod session;
pub mod source;

// Re-export main types for convenience
pub use crate::config::{AnomalyModelConfig, FaultModelConfig, MonitorConfig};
pub use error::{PipelineError, Port, Result};
pub use model::{
    AnomalyModel, DisabledAnomalyModel, Envelope, EnvelopeAnomalyModel, FaultModel,
    FixedAnomalyModel, FixedFaultModel, LogisticFaultModel,
};
pub use motorwatch_types::{HealthSnapshot, HealthStatus, Reading, SchemaVersion};
pub use pipeline::{
    fuse, ActionAdvisor, Advice, CorrectiveAction, Pipeline, RulEstimate, Simulation, Suggestion,
    Verdict,
};
pub use report::SessionReport;
pub use session::{MonitoringSession, SessionConfig, SessionState};
pub use source::{ChannelSource, FeedRecord, FileSource, ReadingSource, StreamSource};
