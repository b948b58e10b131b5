//! Call tracing for arbitrary callables
//!
//! The tracer wraps closures and functions so that every invocation produces a record of
//! its inputs and/or return value.
//!
//! # Architecture
//!
//! - **Channel / LogConfig / ChannelSet**: which aspects of a call are recorded
//! - **CallRecord**: one formatted input or output entry, with its identity and timestamp
//! - **Sink**: destination for records (`StdoutSink`, `TracingSink`, `MemorySink`, `NullSink`)
//! - **TraceBuffer**: bounded ring buffer holding records until they are flushed
//! - **CallTracer**: context object tying a sink to a buffer and wrapping callables
//! - **panic_hook**: flushes the buffer when a panic occurs
//!
//! # Usage Example
//!
//! ```rust
//! use calltrace::tracer::{CallTracer, MemorySink};
//! use calltrace::call_identity;
//!
//! let sink = MemorySink::new();
//! let tracer = CallTracer::with_sink(sink.clone());
//!
//! let add = tracer.log("outputs")?.wrap(call_identity!("add"), |(x, y): (i32, i32)| x + y);
//! assert_eq!(add.call((1, 1)), 2);
//! assert!(sink.lines()[0].ends_with("returns: [2]"));
//!
//! let subtract = tracer.trace(call_identity!("subtract"), |(x, y): (i32, i32)| x - y);
//! subtract.call((2, 1));
//! tracer.flush();
//! assert_eq!(sink.len(), 5);
//! # Ok::<(), calltrace::TracerError>(())
//! ```

pub mod call_record;
pub mod call_tracer;
pub mod channel;
pub mod panic_hook;
pub mod sink;
pub mod trace_buffer;
pub mod traced;

// Re-export main types
pub use call_record::{
    format_line, CallIdentity, CallRecord, Kwargs, RecordKind, TIMESTAMP_FORMAT,
};
pub use call_tracer::{CallTracer, LogLayer, PANIC_FLUSH_NOTICE, TRACE_END_MARKER, TRACE_START_MARKER};
pub use channel::{Channel, ChannelSet, LogConfig, ACCEPTABLE_CHANNELS};
pub use sink::{LineCallback, MemorySink, NullSink, Sink, StdoutSink, TracingSink};
pub use trace_buffer::TraceBuffer;
pub use traced::{TraceMode, Traced};
