//! Stream-based reading source.
//!
//! Receives readings from an async byte stream such as a TCP connection.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::{FeedRecord, ReadingSource};

/// Records buffered between the reader task and the poller.
const CHANNEL_CAPACITY: usize = 256;

/// A source that receives readings from an async stream.
///
/// A background task reads newline-delimited JSON from the provided reader
/// and queues each record, in order, for [`poll`](ReadingSource::poll).
/// The source finishes once the stream reaches EOF and every queued record
/// has been taken.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use motorwatch::StreamSource;
///
/// # tokio_test::block_on(async {
/// let data = b"{\"time\": 0, \"voltage\": 12.0, \"current\": 1.5, \"rpm\": 1500.0}\n";
/// let stream = Cursor::new(data.to_vec());
/// let source = StreamSource::spawn(stream, "example");
/// # });
/// ```
#[derive(Debug)]
pub struct StreamSource {
    receiver: mpsc::Receiver<FeedRecord>,
    description: String,
    last_error: Arc<Mutex<Option<String>>>,
    finished: bool,
}

impl StreamSource {
    /// Spawn a background task that reads from the given async reader.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<R>(reader: R, description: &str) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let last_error = Arc::new(Mutex::new(None));
        let error_handle = last_error.clone();
        let desc = description.to_string();

        tokio::spawn(async move {
            let mut reader = BufReader::new(reader);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => {
                        debug!("Stream {} reached EOF", desc);
                        break;
                    }
                    Ok(_) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        match FeedRecord::parse_line(&line) {
                            Ok(record) => {
                                *error_handle.lock() = None;
                                if tx.send(record).await.is_err() {
                                    // Receiver dropped
                                    break;
                                }
                            }
                            Err(e) => {
                                warn!("Skipping malformed line from {}: {}", desc, e);
                                *error_handle.lock() = Some(format!("Parse error: {}", e));
                            }
                        }
                    }
                    Err(e) => {
                        *error_handle.lock() = Some(format!("Read error: {}", e));
                        break;
                    }
                }
            }
        });

        Self {
            receiver: rx,
            description: format!("stream: {}", description),
            last_error,
            finished: false,
        }
    }
}

impl ReadingSource for StreamSource {
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
        self.last_error.lock().clone()
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn line(time: u64) -> String {
        format!(r#"{{"time":{time},"voltage":12.0,"current":1.5,"rpm":1500.0}}"#)
    }

    #[tokio::test]
    async fn test_stream_source_spawn() {
        let data = format!("{}\n", line(0));
        let mut source = StreamSource::spawn(Cursor::new(data), "test");

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        let record = source.poll();
        assert_eq!(record.map(|r| r.time), Some(0));
    }

    #[tokio::test]
    async fn test_stream_source_preserves_order_and_finishes() {
        let data = format!("{}\n{}\n\n{}\n", line(0), line(1), line(2));
        let mut source = StreamSource::spawn(Cursor::new(data), "test");

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        let times: Vec<u64> = std::iter::from_fn(|| source.poll()).map(|r| r.time).collect();
        assert_eq!(times, vec![0, 1, 2]);
        assert!(source.is_finished());
        assert!(source.error().is_none());
    }

    #[tokio::test]
    async fn test_stream_source_reports_parse_errors() {
        let data = "garbage\n".to_string();
        let mut source = StreamSource::spawn(Cursor::new(data), "test");

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Parse error"));
    }

    #[tokio::test]
    async fn test_stream_source_description() {
        let source = StreamSource::spawn(Cursor::new(Vec::new()), "127.0.0.1:9000");
        assert_eq!(source.description(), "stream: 127.0.0.1:9000");
    }
}
