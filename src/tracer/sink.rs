//! Sinks receiving call records and trace markers
//!
//! A sink is the destination for emitted lines. Each line is a timestamp and a message;
//! [`StdoutSink`] renders it as `[<timestamp>] <message>`, the others either forward it
//! to `tracing`, keep it in memory, or drop it.

use super::call_record::format_line;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

/// Type alias for line callback functions
pub type LineCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Destination for call records
pub trait Sink: Send + Sync {
    /// Write one line captured at `timestamp` (Unix seconds)
    fn write_line(&self, timestamp: f64, message: &str);
}

/// Writes `[<timestamp>] <message>` lines to standard output
///
/// Write errors (a closed or broken stdout) are ignored; the traced call is unaffected.
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write_line(&self, timestamp: f64, message: &str) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        let _ = writeln!(handle, "{}", format_line(timestamp, message));
    }
}

/// Forwards each line as a debug-level `tracing` event under the `calltrace` target
pub struct TracingSink;

impl Sink for TracingSink {
    fn write_line(&self, _timestamp: f64, message: &str) {
        tracing::debug!(target: "calltrace", "{}", message);
    }
}

/// Discards every line
pub struct NullSink;

impl Sink for NullSink {
    fn write_line(&self, _timestamp: f64, _message: &str) {}
}

/// Keeps formatted lines in memory
///
/// Useful for tests and for callers that want to inspect or ship trace output
/// themselves. An optional callback sees each line as it is stored.
#[derive(Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
    on_line_callback: Option<LineCallback>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(on_line_callback: LineCallback) -> Self {
        Self {
            lines: Arc::default(),
            on_line_callback: Some(on_line_callback),
        }
    }

    /// Messages written so far, without timestamps
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn clear(&self) {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    pub fn len(&self) -> usize {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Sink for MemorySink {
    fn write_line(&self, _timestamp: f64, message: &str) {
        if let Some(callback) = &self.on_line_callback {
            callback(message);
        }
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).push(message.to_string());
    }
}
