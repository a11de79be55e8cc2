//! File-based reading source.
//!
//! Reads newline-delimited JSON records from a file, optionally following
//! the file as a producer keeps appending to it.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::warn;

use super::{FeedRecord, ReadingSource};

/// A source that reads readings from a newline-delimited JSON file.
///
/// In replay mode (the default) the file is read once and the source
/// finishes when every record has been polled. In follow mode the source
/// remembers how far it has read and picks up newly appended lines on each
/// poll, like `tail -f`; a partially written last line is left for the
/// next poll. If the file shrinks, it is assumed to have been regenerated
/// and is read again from the start.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    follow: bool,
    offset: u64,
    pending: VecDeque<FeedRecord>,
    last_error: Option<String>,
    finished: bool,
}

impl FileSource {
    /// Create a replaying source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            follow: false,
            offset: 0,
            pending: VecDeque::new(),
            last_error: None,
            finished: false,
        }
    }

    /// Keep following the file for appended lines instead of finishing at EOF.
    pub fn follow(mut self, follow: bool) -> Self {
        self.follow = follow;
        self
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read everything appended since the last call and queue the parsed records.
    fn read_new_lines(&mut self) {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) => {
                self.last_error = Some(format!("Read error: {}", e));
                return;
            }
        };

        let len = match file.metadata() {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                self.last_error = Some(format!("Read error: {}", e));
                return;
            }
        };
        if len < self.offset {
            warn!("{} shrank, reading it again from the start", self.path.display());
            self.offset = 0;
        }

        let mut content = Vec::new();
        let read = file
            .seek(SeekFrom::Start(self.offset))
            .and_then(|_| file.read_to_end(&mut content));
        if let Err(e) = read {
            self.last_error = Some(format!("Read error: {}", e));
            return;
        }

        let consumed = if self.follow {
            content.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1)
        } else {
            content.len()
        };

        for line in content[..consumed].split(|&b| b == b'\n') {
            if line.trim_ascii().is_empty() {
                continue;
            }
            match FeedRecord::parse_bytes(line) {
                Ok(record) => {
                    self.last_error = None;
                    self.pending.push_back(record);
                }
                Err(e) => {
                    warn!("Skipping malformed line in {}: {}", self.path.display(), e);
                    self.last_error = Some(format!("Parse error: {}", e));
                }
            }
        }

        self.offset += consumed as u64;
    }
}

impl ReadingSource for FileSource {
    fn poll(&mut self) -> Option<FeedRecord> {
        if self.pending.is_empty() && !self.finished {
            self.read_new_lines();
            if !self.follow {
                self.finished = true;
            }
        }
        self.pending.pop_front()
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        self.last_error.clone()
    }

    fn is_finished(&self) -> bool {
        self.finished && self.pending.is_empty()
    }
}
