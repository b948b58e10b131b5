//! Tracer configuration
//!
//! The trace buffer capacity is the only tunable. It defaults to 10 and can be
//! overridden with the `CALLTRACE_TRACE_MAXLEN` environment variable.

use crate::error::{Result, TracerError};
use serde::{Deserialize, Serialize};

/// Environment variable controlling the trace buffer capacity
pub const TRACE_MAXLEN_ENV: &str = "CALLTRACE_TRACE_MAXLEN";

/// Capacity used when nothing else is configured
pub const DEFAULT_TRACE_CAPACITY: usize = 10;

/// Configuration for a [`CallTracer`](crate::tracer::CallTracer)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracerConfig {
    /// Maximum number of records held by the trace buffer
    #[serde(default = "default_trace_capacity")]
    pub trace_capacity: usize,
}

fn default_trace_capacity() -> usize {
    DEFAULT_TRACE_CAPACITY
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            trace_capacity: DEFAULT_TRACE_CAPACITY,
        }
    }
}

impl TracerConfig {
    /// Create a configuration with an explicit trace capacity
    pub fn with_capacity(trace_capacity: usize) -> Self {
        Self { trace_capacity }
    }

    /// Read the configuration from the process environment
    ///
    /// A missing variable yields the default; a value that is not a
    /// non-negative integer is rejected.
    pub fn from_env() -> Result<Self> {
        Self::from_value(std::env::var(TRACE_MAXLEN_ENV).ok().as_deref())
    }

    fn from_value(value: Option<&str>) -> Result<Self> {
        match value {
            None => Ok(Self::default()),
            Some(raw) => raw.trim().parse::<usize>().map(Self::with_capacity).map_err(|e| {
                TracerError::Config(format!(
                    "{} must be a non-negative integer, got '{}': {}",
                    TRACE_MAXLEN_ENV, raw, e
                ))
            }),
        }
    }
}
