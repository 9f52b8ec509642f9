//! Build errors for state machine definitions.

use crate::error::ConfigError;
use thiserror::Error;

/// Errors raised while building a state machine definition.
///
/// All of these fail the build synchronously, before any machine
/// instance exists.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("No states declared. Add at least one state")]
    NoStates,

    #[error("Initial state not designated. Call .initial(name) before .build()")]
    MissingInitialState,

    #[error("Initial state designated more than once")]
    MultipleInitialStates,

    #[error("Initial state '{name}' is not a declared state")]
    UnknownInitialState { name: String },

    #[error("State '{name}' is declared more than once")]
    DuplicateState { name: String },

    #[error("Event '{name}' is declared more than once")]
    DuplicateEvent { name: String },

    #[error("Event '{event}' references undeclared state '{state}'")]
    UnknownState { event: String, state: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
