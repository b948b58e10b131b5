//! Process-wide default tracer
//!
//! These free functions operate on a single [`CallTracer`]. Unless [`init`] chose a
//! different sink first, it is created on first use and writes timestamped lines to
//! standard output. Its trace buffer is sized from `CALLTRACE_TRACE_MAXLEN`, read once
//! when the tracer is created.

use crate::config::TracerConfig;
use crate::error::{Result, TracerError};
use crate::tracer::{
    panic_hook, CallIdentity, CallTracer, LogConfig, LogLayer, Sink, StdoutSink, Traced,
};
use std::sync::{Arc, OnceLock};
use tracing::warn;

static GLOBAL_TRACER: OnceLock<CallTracer> = OnceLock::new();

fn build(sink: Arc<dyn Sink>) -> CallTracer {
    let config = TracerConfig::from_env().unwrap_or_else(|e| {
        warn!("{}; falling back to the default trace capacity", e);
        TracerConfig::default()
    });
    CallTracer::new(sink, config)
}

/// Create the process-wide tracer with `sink` instead of standard output
///
/// Must run before any other function in this module. Fails with
/// [`TracerError::AlreadyInitialized`] once the tracer exists.
pub fn init(sink: Arc<dyn Sink>) -> Result<&'static CallTracer> {
    let mut created = false;
    let tracer = GLOBAL_TRACER.get_or_init(|| {
        created = true;
        build(sink)
    });
    if created {
        Ok(tracer)
    } else {
        Err(TracerError::AlreadyInitialized)
    }
}

/// The process-wide tracer
pub fn tracer() -> &'static CallTracer {
    GLOBAL_TRACER.get_or_init(|| build(Arc::new(StdoutSink)))
}

/// Validate a channel request against the global tracer
pub fn log(config: impl Into<LogConfig>) -> Result<LogLayer> {
    tracer().log(config)
}

/// Log inputs and outputs of every call to `func`
pub fn log_fn<F>(identity: CallIdentity, func: F) -> Traced<F> {
    tracer().log_fn(identity, func)
}

/// Record calls to `func` in the global trace buffer
pub fn trace<F>(identity: CallIdentity, func: F) -> Traced<F> {
    tracer().trace(identity, func)
}

/// Flush the global trace buffer to the global sink
pub fn flush() {
    tracer().flush();
}

/// Flush the global trace buffer whenever a panic occurs
pub fn register_uncaught_panic_handler() {
    tracer().register_panic_hook();
}

/// Restore the panic hook that was active before registration
pub fn unregister_uncaught_panic_handler() -> Result<()> {
    panic_hook::unregister()
}
