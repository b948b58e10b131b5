//! Error types and result aliases for the calltrace library.
//!
//! This module defines the core error type [`TracerError`] and the [`Result`] type alias
//! used throughout the library. Failures raised by a wrapped callable are never converted
//! into a `TracerError`; they reach the caller untouched.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TracerError {
    #[error(
        "The following channels are unacceptable: {unacceptable:?}. \
         Acceptable channels are listed in ACCEPTABLE_CHANNELS: {acceptable:?}"
    )]
    InvalidConfiguration {
        unacceptable: Vec<String>,
        acceptable: &'static [&'static str],
    },

    #[error("No panic hook is registered; call register_uncaught_panic_handler first")]
    NotRegistered,

    #[error("The global tracer is already initialized; call init before any other global function")]
    AlreadyInitialized,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TracerError>;
