//! Configuration loading.
//!
//! Settings come from an optional TOML file, then from `MOTORWATCH_*`
//! environment variables, with built-in defaults for anything unset:
//!
//! ```toml
//! decision_threshold = 0.5
//!
//! [session]
//! window = 60
//! sample_cap = 300
//!
//! [advisor]
//! high_current = 2.5
//! low_rpm = 1150.0
//!
//! [fault_model]
//! kind = "logistic"
//! current_weight = 8.0
//! rpm_weight = -0.04
//! bias = 32.0
//!
//! [anomaly_model]
//! kind = "envelope"
//! voltage = { min = 11.4, max = 12.6 }
//! current = { min = 1.3, max = 3.5 }
//! rpm = { min = 1000.0, max = 1560.0 }
//! ```
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `MOTORWATCH_SESSION__WINDOW=120`.

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::model::{
    AnomalyModel, DisabledAnomalyModel, EnvelopeAnomalyModel, FaultModel, FixedAnomalyModel,
    FixedFaultModel, LogisticFaultModel,
};
use crate::pipeline::{validate_threshold, ActionAdvisor, Pipeline, DEFAULT_DECISION_THRESHOLD};
use crate::session::{MonitoringSession, SessionConfig};

/// Which fault classifier to load and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FaultModelConfig {
    Logistic(LogisticFaultModel),
    Fixed { probability: f64 },
}

impl Default for FaultModelConfig {
    fn default() -> Self {
        FaultModelConfig::Logistic(LogisticFaultModel::default())
    }
}

impl FaultModelConfig {
    pub fn build(&self) -> Box<dyn FaultModel> {
        match self {
            FaultModelConfig::Logistic(model) => Box::new(*model),
            FaultModelConfig::Fixed { probability } => Box::new(FixedFaultModel::new(*probability)),
        }
    }
}

/// Which anomaly detector to load and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnomalyModelConfig {
    Envelope(EnvelopeAnomalyModel),
    Fixed { anomaly: bool },
    /// Run without anomaly detection.
    Disabled,
}

impl Default for AnomalyModelConfig {
    fn default() -> Self {
        AnomalyModelConfig::Envelope(EnvelopeAnomalyModel::default())
    }
}

impl AnomalyModelConfig {
    pub fn build(&self) -> Box<dyn AnomalyModel> {
        match self {
            AnomalyModelConfig::Envelope(model) => Box::new(*model),
            AnomalyModelConfig::Fixed { anomaly } => Box::new(FixedAnomalyModel::new(*anomaly)),
            AnomalyModelConfig::Disabled => Box::new(DisabledAnomalyModel),
        }
    }
}

/// Everything needed to build a [`MonitoringSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub decision_threshold: f64,
    pub session: SessionConfig,
    pub advisor: ActionAdvisor,
    pub fault_model: FaultModelConfig,
    pub anomaly_model: AnomalyModelConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            decision_threshold: DEFAULT_DECISION_THRESHOLD,
            session: SessionConfig::default(),
            advisor: ActionAdvisor::default(),
            fault_model: FaultModelConfig::default(),
            anomaly_model: AnomalyModelConfig::default(),
        }
    }
}

impl MonitorConfig {
    /// Load configuration from an optional file plus the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(
                Environment::with_prefix("MOTORWATCH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        let monitor: MonitorConfig = config
            .try_deserialize()
            .context("Failed to parse configuration")?;
        monitor.validate()?;
        Ok(monitor)
    }

    /// Check every value the pipeline would reject later.
    pub fn validate(&self) -> std::result::Result<(), PipelineError> {
        validate_threshold(self.decision_threshold)?;
        self.session.validate()
    }

    /// Build the pipeline described by this configuration.
    pub fn build_pipeline(&self) -> std::result::Result<Pipeline, PipelineError> {
        Ok(
            Pipeline::new(self.fault_model.build(), self.anomaly_model.build())
                .with_threshold(self.decision_threshold)?
                .with_advisor(self.advisor),
        )
    }

    /// Build a fresh session described by this configuration.
    pub fn build_session(&self) -> std::result::Result<MonitoringSession, PipelineError> {
        MonitoringSession::new(self.build_pipeline()?, self.session)
    }
}
