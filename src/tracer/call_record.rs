//! Call records and their line format
//!
//! A [`CallRecord`] is one formatted entry describing either the inputs or the return
//! value of a single invocation. Records are immutable once captured: the argument and
//! return-value representations are rendered when the call happens, not when the record
//! reaches a sink.

use chrono::{DateTime, Local};
use serde_json::Value;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Timestamp layout used for every sink line
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Build a [`CallIdentity`] scoped to the calling module
///
/// ```
/// use calltrace::call_identity;
///
/// let identity = call_identity!("Point::new");
/// assert_eq!(identity.to_string(), format!("{}.Point::new", module_path!()));
/// ```
#[macro_export]
macro_rules! call_identity {
    ($name:expr) => {
        $crate::tracer::CallIdentity::new(module_path!(), $name)
    };
}

/// Name under which a wrapped callable is reported: `<scope>.<qualified-name>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallIdentity {
    scope: String,
    qualified_name: String,
}

impl CallIdentity {
    pub fn new(scope: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            qualified_name: qualified_name.into(),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }
}

impl fmt::Display for CallIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.scope, self.qualified_name)
    }
}

/// Named arguments of a call, kept in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kwargs {
    entries: Vec<(String, Value)>,
}

impl Kwargs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a named argument
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(existing, _)| existing == name).map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Kwargs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        f.write_str("}")
    }
}

/// What a record describes
#[derive(Debug, Clone, PartialEq)]
pub enum RecordKind {
    Input { args: String, kwargs: String },
    Output { value: String },
}

/// One formatted entry describing a single call's inputs or outputs
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    /// Timestamp when the record was captured (Unix timestamp)
    pub timestamp: f64,
    /// UUID string shared by the input and output record of one invocation
    pub call_id: String,
    /// Identity of the wrapped callable
    pub identity: CallIdentity,
    pub kind: RecordKind,
}

impl CallRecord {
    pub fn input(
        identity: &CallIdentity,
        call_id: &str,
        args: &dyn fmt::Debug,
        kwargs: &Kwargs,
    ) -> Self {
        Self {
            timestamp: current_timestamp(),
            call_id: call_id.to_string(),
            identity: identity.clone(),
            kind: RecordKind::Input {
                args: format!("{:?}", args),
                kwargs: kwargs.to_string(),
            },
        }
    }

    pub fn output(identity: &CallIdentity, call_id: &str, value: &dyn fmt::Debug) -> Self {
        Self {
            timestamp: current_timestamp(),
            call_id: call_id.to_string(),
            identity: identity.clone(),
            kind: RecordKind::Output {
                value: format!("{:?}", value),
            },
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self.kind, RecordKind::Input { .. })
    }

    /// The record without its timestamp, e.g. `[app.add] returns: [2]`
    pub fn message(&self) -> String {
        match &self.kind {
            RecordKind::Input { args, kwargs } => {
                format!("[{}] inputs: [args: {}] [kwargs: {}]", self.identity, args, kwargs)
            }
            RecordKind::Output { value } => format!("[{}] returns: [{}]", self.identity, value),
        }
    }

    /// Local capture time rendered with [`TIMESTAMP_FORMAT`]
    pub fn formatted_timestamp(&self) -> String {
        format_timestamp(self.timestamp)
    }
}

/// Render a Unix timestamp as local time with [`TIMESTAMP_FORMAT`]
pub fn format_timestamp(timestamp: f64) -> String {
    let secs = timestamp.floor();
    let nanos = ((timestamp - secs) * 1_000_000_000.0) as u32;
    let dt = DateTime::from_timestamp(secs as i64, nanos)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .with_timezone(&Local);
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Render a sink line: `[<timestamp>] <message>`
pub fn format_line(timestamp: f64, message: &str) -> String {
    format!("[{}] {}", format_timestamp(timestamp), message)
}

/// Get current timestamp as Unix timestamp (seconds since epoch)
pub fn current_timestamp() -> f64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs_f64()).unwrap_or_default()
}
