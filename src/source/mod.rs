//! Feed abstraction for receiving sensor readings.
//!
//! The pipeline never owns or polls the producer itself. A driver loop pulls
//! records from a [`ReadingSource`] and hands each one to
//! [`MonitoringSession::advance`](crate::MonitoringSession::advance).
//!
//! All sources speak the same line format: one JSON [`FeedRecord`] per line.

mod channel;
mod file;
mod record;
mod stream;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use record::FeedRecord;
pub use stream::StreamSource;

use std::fmt::Debug;

/// Trait for receiving readings from various producers.
///
/// # Example
///
/// ```
/// use motorwatch::{FileSource, ReadingSource};
///
/// let mut source = FileSource::new("readings.jsonl");
/// while let Some(record) = source.poll() {
///     println!("t={}s rpm={}", record.time, record.rpm);
/// }
/// ```
pub trait ReadingSource: Send + Debug {
    /// Take the next record if one is available.
    ///
    /// Returns `None` when nothing is ready yet. This method never blocks.
    fn poll(&mut self) -> Option<FeedRecord>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;

    /// The most recent read or parse error, if any.
    fn error(&self) -> Option<String>;

    /// Returns true once the source can produce no further records.
    fn is_finished(&self) -> bool;
}
