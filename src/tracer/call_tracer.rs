//! Call tracer context
//!
//! [`CallTracer`] ties a sink to a trace buffer and hands out wrapped callables. It is
//! cheap to clone; clones share the same sink and buffer.

use super::call_record::{current_timestamp, CallIdentity, CallRecord};
use super::channel::{ChannelSet, LogConfig};
use super::panic_hook;
use super::sink::{Sink, StdoutSink};
use super::trace_buffer::TraceBuffer;
use super::traced::{TraceMode, Traced};
use crate::config::TracerConfig;
use crate::error::Result;
use std::sync::Arc;
use tracing::debug;

/// Line written before flushed records
pub const TRACE_START_MARKER: &str = "== CALL TRACE:";

/// Line written after flushed records
pub const TRACE_END_MARKER: &str = "== END CALL TRACE ==";

/// Line written when the panic hook flushes the trace
pub const PANIC_FLUSH_NOTICE: &str = "Panic occurred; flushing call trace.";

/// Logs and traces calls of wrapped callables
///
/// Immediate logging writes records to the sink as calls happen. Buffered tracing keeps
/// the most recent records in a bounded [`TraceBuffer`] until [`CallTracer::flush`] is
/// called, either explicitly or by the panic hook.
#[derive(Clone)]
pub struct CallTracer {
    sink: Arc<dyn Sink>,
    buffer: Arc<TraceBuffer>,
}

impl CallTracer {
    /// Create a call tracer
    ///
    /// # Arguments
    ///
    /// * `sink` - Destination for records and trace markers
    /// * `config` - Tracer configuration; sets the trace buffer capacity
    pub fn new(sink: Arc<dyn Sink>, config: TracerConfig) -> Self {
        Self {
            sink,
            buffer: Arc::new(TraceBuffer::new(config.trace_capacity)),
        }
    }

    /// Create a call tracer with the default configuration
    pub fn with_sink(sink: impl Sink + 'static) -> Self {
        Self::new(Arc::new(sink), TracerConfig::default())
    }

    /// Create a call tracer configured from the environment
    pub fn from_env(sink: Arc<dyn Sink>) -> Result<Self> {
        Ok(Self::new(sink, TracerConfig::from_env()?))
    }

    /// Validate a channel request and return a layer that wraps callables with it
    ///
    /// Fails with [`TracerError::InvalidConfiguration`](crate::TracerError::InvalidConfiguration)
    /// when any requested channel is unknown.
    pub fn log(&self, config: impl Into<LogConfig>) -> Result<LogLayer> {
        let config = config.into();
        let channels = ChannelSet::resolve(&config)?;
        debug!(?config, "Validated log channels");
        Ok(LogLayer {
            tracer: self.clone(),
            channels,
        })
    }

    /// Wrap a callable so each call logs its inputs and outputs
    pub fn log_fn<F>(&self, identity: CallIdentity, func: F) -> Traced<F> {
        Traced::new(self.clone(), identity, TraceMode::Immediate(ChannelSet::BOTH), func)
    }

    /// Wrap a callable so each call is recorded in the trace buffer
    pub fn trace<F>(&self, identity: CallIdentity, func: F) -> Traced<F> {
        Traced::new(self.clone(), identity, TraceMode::Buffered, func)
    }

    /// Write all buffered records to the sink, oldest first, between trace markers
    pub fn flush(&self) {
        self.sink.write_line(current_timestamp(), TRACE_START_MARKER);
        for record in self.buffer.drain_oldest_first() {
            self.sink.write_line(record.timestamp, &record.message());
        }
        self.sink.write_line(current_timestamp(), TRACE_END_MARKER);
    }

    /// Install a panic hook that flushes this tracer before the previous hook runs
    pub fn register_panic_hook(&self) {
        panic_hook::register(self);
    }

    /// Number of records waiting for a flush
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    pub fn buffer(&self) -> &TraceBuffer {
        &self.buffer
    }

    pub(crate) fn emit(&self, record: &CallRecord) {
        self.sink.write_line(record.timestamp, &record.message());
    }

    pub(crate) fn buffer_record(&self, record: CallRecord) {
        self.buffer.push_front(record);
    }

    pub(crate) fn flush_after_panic(&self) {
        self.sink.write_line(current_timestamp(), PANIC_FLUSH_NOTICE);
        self.flush();
    }
}

impl Default for CallTracer {
    fn default() -> Self {
        Self::with_sink(StdoutSink)
    }
}

/// Wraps callables with a validated channel selection
#[derive(Clone)]
pub struct LogLayer {
    tracer: CallTracer,
    channels: ChannelSet,
}

impl LogLayer {
    pub fn wrap<F>(&self, identity: CallIdentity, func: F) -> Traced<F> {
        Traced::new(self.tracer.clone(), identity, TraceMode::Immediate(self.channels), func)
    }

    pub fn channels(&self) -> ChannelSet {
        self.channels
    }
}
