//! # motorwatch-types
//!
//! Core types shared between the motorwatch pipeline and whatever sits on
//! either side of it: the producer that feeds sensor readings in, and the
//! dashboards or CLIs that read health snapshots out.
//!
//! ## Features
//!
//! - `serde`: JSON/TOML/etc. serialization via serde
//!
//! ## Example
//!
//! ```rust
//! use motorwatch_types::{HealthStatus, Reading};
//!
//! let reading = Reading::new(42, 12.1, 1.6, 1480.0);
//! assert_eq!(reading.time, 42);
//!
//! assert_eq!(HealthStatus::from_rul(95), HealthStatus::Healthy);
//! assert_eq!(HealthStatus::from_rul(35), HealthStatus::Warning);
//! assert_eq!(HealthStatus::from_rul(10), HealthStatus::Critical);
//! ```
//!
//! ## Schema Version
//!
//! The current schema version is **1**. The version is included in every
//! serialized snapshot so consumers can handle format evolution.

mod reading;
mod snapshot;
mod version;

pub use reading::*;
pub use snapshot::*;
pub use version::*;

/// Current schema version.
///
/// Increment this when making breaking changes to the snapshot format.
pub const SCHEMA_VERSION: u32 = 1;
