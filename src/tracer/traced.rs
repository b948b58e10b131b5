//! Wrapped callables
//!
//! A [`Traced`] owns a plain invocable together with its identity and the way its calls
//! are recorded. Only closures and functions can be wrapped: a `Traced` is not itself
//! callable through `Fn`, so wrapping a wrapper does not compile.
//!
//! ```compile_fail
//! use calltrace::{call_identity, CallTracer, NullSink};
//!
//! let tracer = CallTracer::with_sink(NullSink);
//! let inner = tracer.log_fn(call_identity!("add"), |(x, y): (i32, i32)| x + y);
//! let outer = tracer.log_fn(call_identity!("add"), inner);
//! outer.call((1, 1));
//! ```

use super::call_record::{CallIdentity, CallRecord, Kwargs};
use super::call_tracer::CallTracer;
use super::channel::ChannelSet;
use std::fmt::{self, Debug};
use uuid::Uuid;

/// How a wrapped callable reports its calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceMode {
    /// Records go straight to the sink for the selected channels
    Immediate(ChannelSet),
    /// Input and output records go to the trace buffer until flushed
    Buffered,
}

impl TraceMode {
    pub fn records_inputs(&self) -> bool {
        match self {
            TraceMode::Immediate(channels) => channels.records_inputs(),
            TraceMode::Buffered => true,
        }
    }

    pub fn records_outputs(&self) -> bool {
        match self {
            TraceMode::Immediate(channels) => channels.records_outputs(),
            TraceMode::Buffered => true,
        }
    }
}

/// A callable whose invocations are logged or traced
pub struct Traced<F> {
    identity: CallIdentity,
    mode: TraceMode,
    tracer: CallTracer,
    func: F,
}

impl<F> Traced<F> {
    pub(crate) fn new(tracer: CallTracer, identity: CallIdentity, mode: TraceMode, func: F) -> Self {
        Self {
            identity,
            mode,
            tracer,
            func,
        }
    }

    pub fn identity(&self) -> &CallIdentity {
        &self.identity
    }

    pub fn mode(&self) -> TraceMode {
        self.mode
    }

    /// Unwrap the original callable
    pub fn into_inner(self) -> F {
        self.func
    }

    /// Invoke a callable taking positional arguments as one tuple
    ///
    /// Panics raised by the callable propagate unchanged; no output record is
    /// written for them.
    pub fn call<A, R>(&self, args: A) -> R
    where
        F: Fn(A) -> R,
        A: Debug,
        R: Debug,
    {
        self.invoke(args, &Kwargs::new(), |args| (self.func)(args))
    }

    /// Invoke a callable that also takes named arguments
    pub fn call_with_kwargs<A, R>(&self, args: A, kwargs: Kwargs) -> R
    where
        F: Fn(A, &Kwargs) -> R,
        A: Debug,
        R: Debug,
    {
        self.invoke(args, &kwargs, |args| (self.func)(args, &kwargs))
    }

    fn invoke<A, R>(&self, args: A, kwargs: &Kwargs, run: impl FnOnce(A) -> R) -> R
    where
        A: Debug,
        R: Debug,
    {
        let call_id = Uuid::new_v4().to_string();

        if self.mode.records_inputs() {
            self.record(CallRecord::input(&self.identity, &call_id, &args, kwargs));
        }

        let result = run(args);

        if self.mode.records_outputs() {
            self.record(CallRecord::output(&self.identity, &call_id, &result));
        }

        result
    }

    fn record(&self, record: CallRecord) {
        match self.mode {
            TraceMode::Immediate(_) => self.tracer.emit(&record),
            TraceMode::Buffered => self.tracer.buffer_record(record),
        }
    }
}

impl<F> fmt::Debug for Traced<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traced")
            .field("identity", &self.identity)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::sink::MemorySink;
    use std::panic::{self, AssertUnwindSafe};

    fn tracer() -> (CallTracer, MemorySink) {
        let sink = MemorySink::new();
        (CallTracer::with_sink(sink.clone()), sink)
    }

    #[test]
    fn test_call_returns_original_result() {
        let (tracer, _sink) = tracer();
        let add = tracer.log_fn(CallIdentity::new("tests", "add"), |(x, y): (i32, i32)| x + y);
        assert_eq!(add.call((2, 3)), 5);
    }

    #[test]
    fn test_call_with_kwargs() {
        let (tracer, sink) = tracer();
        let join = tracer.log_fn(
            CallIdentity::new("tests", "utility_function_one"),
            |(a, b): (&str, &str), kwargs: &Kwargs| {
                let separator = kwargs.get("separator").and_then(|v| v.as_str()).unwrap_or(":");
                format!("{}{}{}", a, separator, b)
            },
        );

        let joined = join.call_with_kwargs(("te", "st"), Kwargs::new().with("separator", "/"));

        assert_eq!(joined, "te/st");
        assert_eq!(
            sink.lines(),
            vec![
                r#"[tests.utility_function_one] inputs: [args: ("te", "st")] [kwargs: {separator: "/"}]"#
                    .to_string(),
                r#"[tests.utility_function_one] returns: ["te/st"]"#.to_string(),
            ]
        );
    }

    #[test]
    fn test_panic_propagates_without_output_record() {
        let (tracer, sink) = tracer();
        let raises = tracer.log_fn(CallIdentity::new("tests", "raises_exception"), |(): ()| -> () {
            panic!("this is a test panic")
        });

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| raises.call(())));

        let payload = outcome.unwrap_err();
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"this is a test panic"));
        assert_eq!(sink.lines(), vec!["[tests.raises_exception] inputs: [args: ()] [kwargs: {}]".to_string()]);
    }

    #[test]
    fn test_err_result_is_an_ordinary_return() {
        let (tracer, sink) = tracer();
        let parse = tracer.log_fn(CallIdentity::new("tests", "parse"), |(s,): (&str,)| s.parse::<u8>().map_err(|_| "bad"));

        assert_eq!(parse.call(("x",)), Err("bad"));
        assert_eq!(sink.lines()[1], r#"[tests.parse] returns: [Err("bad")]"#);
    }

    #[test]
    fn test_input_and_output_share_call_id() {
        let (tracer, _sink) = tracer();
        let square = tracer.trace(CallIdentity::new("tests", "square"), |(x,): (i64,)| x * x);
        square.call((4,));

        let records = tracer.buffer().drain_oldest_first();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].call_id, records[1].call_id);
        assert!(records[0].is_input());
    }

    #[test]
    fn test_method_with_receiver_in_args() {
        #[derive(Debug)]
        struct Counter {
            x: i32,
            y: i32,
        }

        let (tracer, sink) = tracer();
        let run = tracer.log_fn(CallIdentity::new("tests", "Counter::run"), |(this,): (&Counter,)| this.x + this.y);
        let counter = Counter { x: 1, y: 2 };

        assert_eq!(run.call((&counter,)), 3);
        assert_eq!(
            sink.lines()[0],
            "[tests.Counter::run] inputs: [args: (Counter { x: 1, y: 2 },)] [kwargs: {}]"
        );
    }

    #[test]
    fn test_into_inner_returns_callable() {
        let (tracer, sink) = tracer();
        let double = tracer.log_fn(CallIdentity::new("tests", "double"), |(x,): (i32,)| x * 2);
        assert_eq!(double.identity().qualified_name(), "double");
        assert_eq!(double.mode(), TraceMode::Immediate(ChannelSet::BOTH));

        let raw = double.into_inner();
        assert_eq!(raw((21,)), 42);
        assert!(sink.is_empty());
    }
}
