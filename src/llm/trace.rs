//! Append-only debug trace of requests and replies
//!
//! The trace is handed to the suggestion flow explicitly. It is purely
//! observational: nothing reads it back, and a trace that cannot be written
//! never fails a request.

use crate::core::error::Result;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const SEPARATOR_WIDTH: usize = 40;

/// Debug trace file, or a no-op when disabled
#[derive(Debug)]
pub struct DebugTrace {
    sink: Option<(PathBuf, File)>,
}

impl DebugTrace {
    /// Open (creating if needed) the trace file for appending
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            sink: Some((path.to_path_buf(), file)),
        })
    }

    /// Open `path`, falling back to a disabled trace with a warning
    pub fn open_or_disabled(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::open(path) {
            Ok(trace) => trace,
            Err(e) => {
                tracing::warn!("Debug trace disabled, cannot open {}: {}", path.display(), e);
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.sink.as_ref().map(|(path, _)| path.as_path())
    }

    /// Record a one-line message
    pub fn record(&self, message: &str) {
        self.write_entry(format!("[{}] {}\n", timestamp(), message));
    }

    /// Record a message followed by a block of data and a separator line
    pub fn record_with(&self, message: &str, data: &str) {
        self.write_entry(format!(
            "[{}] {}\n{}\n{}\n",
            timestamp(),
            message,
            data,
            "=".repeat(SEPARATOR_WIDTH)
        ));
    }

    fn write_entry(&self, entry: String) {
        if let Some((_, file)) = &self.sink {
            // One write per entry keeps concurrent entries whole
            if let Err(e) = (&*file).write_all(entry.as_bytes()) {
                tracing::debug!("Debug trace write failed: {}", e);
            }
        }
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
