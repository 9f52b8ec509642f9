//! Shared error types for build-time and run-time failures.

use thiserror::Error;

/// Configuration errors raised while resolving a capability spec.
///
/// These are programmer errors: they are raised synchronously at build
/// time, before any aggregate or machine instance exists, and are not
/// meant to be recovered from at run time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Either explicit method names or an interface must be supplied")]
    NoCapability,

    #[error("Reduction '{method}' does not match any declared method")]
    UnknownReduction { method: String },
}

/// Run-time lookup failures.
///
/// Unlike [`ConfigError`], these are recoverable: callers may catch them
/// and fall back (probe-then-fallback patterns).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("Name '{name}' is not bound to any member")]
    UnboundName { name: String },

    #[error("Index {index} is out of bounds (len: {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Event '{name}' is not declared in this state machine")]
    UnknownEvent { name: String },

    #[error("State '{name}' is not declared in this state machine")]
    UnknownState { name: String },
}
