pub mod config;
pub mod error;
pub mod global;
pub mod logging;
pub mod tracer;

pub use config::TracerConfig;
pub use error::{Result, TracerError};
pub use global::{
    flush, log, log_fn, register_uncaught_panic_handler, trace, unregister_uncaught_panic_handler,
};
pub use tracer::{
    CallIdentity, CallTracer, Kwargs, MemorySink, NullSink, StdoutSink, Traced, TracingSink,
    ACCEPTABLE_CHANNELS,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    pub use crate::call_identity;
    pub use crate::error::{Result, TracerError};
    pub use crate::tracer::{CallIdentity, CallTracer, Kwargs, LogConfig, Sink, Traced};
}
