//! Diagnostic record of outgoing request URLs.
//!
//! Every signed URL is appended to a sink before the request is sent. The
//! sink is best-effort: the client discards its errors, so a broken log file
//! never stops a search.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Capability to record one diagnostic entry.
pub trait DiagnosticSink: Send + Sync {
    /// Record a single entry.
    fn record(&self, entry: &str) -> io::Result<()>;
}

/// Sink that discards every entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn record(&self, _entry: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Sink appending one line per entry to a file.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DiagnosticSink for FileSink {
    fn record(&self, entry: &str) -> io::Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| io::Error::other("diagnostic log lock poisoned"))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{entry}")
    }
}

/// Sink buffering entries in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded entries.
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, entry: &str) -> io::Result<()> {
        self.entries
            .lock()
            .map_err(|_| io::Error::other("diagnostic buffer lock poisoned"))?
            .push(entry.to_string());
        Ok(())
    }
}
