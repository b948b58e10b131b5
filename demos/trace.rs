//! Buffered call tracing flushed on demand and on panic
//!
//! Set `CALLTRACE_TRACE_MAXLEN` (or put it in `.env`) to change how many records
//! are kept between flushes.
//!
//! # Running the example
//!
//! ```bash
//! cargo run --example trace
//! ```

use calltrace::prelude::*;
use calltrace::{flush, register_uncaught_panic_handler, trace};

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    calltrace::logging::init_logging();

    let add = trace(call_identity!("add"), |(x, y): (i32, i32)| x + y);
    let subtract = trace(call_identity!("subtract"), |(x, y): (i32, i32)| x - y);
    let multiply = trace(call_identity!("multiply"), |(x, y): (i32, i32)| x * y);

    add.call((1, 1));
    subtract.call((2, 1));
    flush();

    register_uncaught_panic_handler();
    multiply.call((4, 5));
    panic!("trigger flush of call trace");
}
