//! Setup errors raised while registering states and transitions.

use thiserror::Error;

/// Errors that can occur while configuring a registry or builder.
///
/// These are configuration mistakes: they are raised immediately by the
/// offending registration call and never during dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("State '{state}' has already been added")]
    DuplicateState { state: String },

    #[error("Cannot set multiple starting states: '{existing}' is already the starting state, '{rejected}' was rejected")]
    MultipleStartingStates { existing: String, rejected: String },

    #[error("Transition from '{from}' on {kind} is already registered")]
    DuplicateTransition { from: String, kind: String },

    #[error("Transition endpoint '{state}' is not a known state. Add it before registering the transition")]
    UnknownEndpoint { state: String },

    #[error("Cannot add a transition from final state '{state}'")]
    TransitionFromFinalState { state: String },
}
