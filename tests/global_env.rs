//! The global tracer reads its capacity once, so this binary holds a single test.

use calltrace::config::TRACE_MAXLEN_ENV;
use calltrace::tracer::{
    CallIdentity, CallTracer, MemorySink, NullSink, PANIC_FLUSH_NOTICE, TRACE_END_MARKER,
    TRACE_START_MARKER,
};
use calltrace::{flush, global, register_uncaught_panic_handler, trace, unregister_uncaught_panic_handler};
use calltrace::{TracerConfig, TracerError};
use std::panic;
use std::sync::Arc;

fn explode() {
    panic!("trigger flush of global trace");
}

#[test]
fn test_global_tracer_follows_environment() {
    // Largest representable capacity is accepted and does not allocate up front.
    std::env::set_var(TRACE_MAXLEN_ENV, usize::MAX.to_string());
    let config = TracerConfig::from_env().unwrap();
    assert_eq!(config.trace_capacity, usize::MAX);
    let unbounded = CallTracer::new(Arc::new(NullSink), config);
    unbounded.trace(CallIdentity::new("tests", "noop"), |(): ()| ()).call(());
    assert_eq!(unbounded.pending(), 2);

    std::env::set_var(TRACE_MAXLEN_ENV, "3");
    assert_eq!(TracerConfig::from_env().unwrap().trace_capacity, 3);

    let sink = MemorySink::new();
    let tracer = global::init(Arc::new(sink.clone())).unwrap();
    assert_eq!(tracer.buffer().capacity(), 3);
    assert_eq!(global::tracer().buffer().capacity(), 3);
    assert!(matches!(global::init(Arc::new(NullSink)), Err(TracerError::AlreadyInitialized)));

    // Capacity is read once; later changes do not resize the global buffer.
    std::env::set_var(TRACE_MAXLEN_ENV, "50");

    let add = trace(CallIdentity::new("tests", "add"), |(x, y): (i32, i32)| x + y);
    add.call((1, 1));
    add.call((2, 2));
    assert!(sink.is_empty());
    assert_eq!(global::tracer().pending(), 3);

    flush();
    assert_eq!(
        sink.lines(),
        vec![
            TRACE_START_MARKER.to_string(),
            "[tests.add] returns: [2]".to_string(),
            "[tests.add] inputs: [args: (2, 2)] [kwargs: {}]".to_string(),
            "[tests.add] returns: [4]".to_string(),
            TRACE_END_MARKER.to_string(),
        ]
    );
    assert_eq!(global::tracer().buffer().capacity(), 3);

    sink.clear();
    register_uncaught_panic_handler();
    add.call((5, 5));
    assert!(panic::catch_unwind(explode).is_err());
    unregister_uncaught_panic_handler().unwrap();

    assert_eq!(
        sink.lines(),
        vec![
            PANIC_FLUSH_NOTICE.to_string(),
            TRACE_START_MARKER.to_string(),
            "[tests.add] inputs: [args: (5, 5)] [kwargs: {}]".to_string(),
            "[tests.add] returns: [10]".to_string(),
            TRACE_END_MARKER.to_string(),
        ]
    );
}
