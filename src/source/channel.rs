//! Channel-based reading source.
//!
//! Receives records pushed by an in-process producer over a tokio mpsc
//! channel, for simulators or bridges that already hold parsed readings.

use tokio::sync::mpsc;

use super::{FeedRecord, ReadingSource};

/// A source fed by the sending half of an mpsc channel.
///
/// Every record sent is delivered exactly once, in order. The source
/// finishes when all senders are dropped and the channel is drained.
///
/// # Example
///
/// ```
/// use motorwatch::{ChannelSource, FeedRecord, Reading, ReadingSource};
///
/// let (tx, mut source) = ChannelSource::create("simulator", 16);
/// tx.try_send(FeedRecord::from(Reading::new(0, 12.0, 1.5, 1500.0))).unwrap();
///
/// assert_eq!(source.poll().map(|r| r.time), Some(0));
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: mpsc::Receiver<FeedRecord>,
    description: String,
    finished: bool,
}

impl ChannelSource {
    /// Wrap the receiving end of a channel.
    pub fn new(receiver: mpsc::Receiver<FeedRecord>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
            finished: false,
        }
    }

    /// Create a bounded channel pair.
    ///
    /// Returns (sender, source) where the sender is handed to the producer.
    pub fn create(source_description: &str, capacity: usize) -> (mpsc::Sender<FeedRecord>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self::new(rx, source_description))
    }
}

impl ReadingSource for ChannelSource {
    fn poll(&mut self) -> Option<FeedRecord> {
        match self.receiver.try_recv() {
            Ok(record) => Some(record),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                self.finished = true;
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        // Producers report their own failures; the channel itself cannot fail.
        None
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
