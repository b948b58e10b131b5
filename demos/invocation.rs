//! Immediate call logging with the global tracer
//!
//! # Running the example
//!
//! ```bash
//! cargo run --example invocation
//! ```

use calltrace::prelude::*;
use calltrace::{log, log_fn};

#[derive(Debug)]
struct Calculator {
    x: i32,
    y: i32,
    op: String,
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    calltrace::logging::init_logging();

    let add = log_fn(call_identity!("add"), |(x, y): (i32, i32)| x + y);
    let subtract = log("inputs")?.wrap(call_identity!("subtract"), |(x, y): (i32, i32)| x - y);
    let multiply = log("outputs")?.wrap(call_identity!("multiply"), |(x, y): (i32, i32)| x * y);

    add.call((1, 1));
    subtract.call((2, 1));
    multiply.call((4, 5));

    let new_calculator = log_fn(call_identity!("Calculator::new"), |(x, y, op): (i32, i32, &str)| {
        Calculator {
            x,
            y,
            op: op.to_string(),
        }
    });
    let run = log_fn(call_identity!("Calculator::run"), |(this,): (&Calculator,)| this.x + this.y);
    let join = log_fn(call_identity!("utility_function_one"), |(a, b): (&str, &str), kwargs: &Kwargs| {
        let separator = kwargs.get("separator").and_then(|v| v.as_str()).unwrap_or(":");
        format!("{}{}{}", a, separator, b)
    });

    let calculator = new_calculator.call((1, 2, "+"));
    println!("{} {} {} = {}", calculator.x, calculator.op, calculator.y, run.call((&calculator,)));
    join.call_with_kwargs(("te", "st"), Kwargs::new().with("separator", "/"));

    match log(vec!["inputs", "verbose"]) {
        Ok(_) => println!("unexpectedly accepted an unknown channel"),
        Err(e) => println!("rejected: {}", e),
    }

    Ok(())
}
