//! Operation errors raised while dispatching messages.

use crate::config::{HookError, HookKind};
use thiserror::Error;

/// Errors that can occur during [`StateMachine::dispatch`](crate::StateMachine::dispatch).
///
/// None of these are transient: retrying the same dispatch yields the same
/// error. Messages with no matching rule and messages ignored after the
/// machine finished are not errors.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("Message of kind {kind} is not valid for dispatch")]
    InvalidMessage { kind: String },

    #[error("Machine's starting state is unset")]
    NotInitialized,

    #[error("Machine already finished in final state '{state}'")]
    MachineFinished { state: String },

    #[error("Transition from '{from}' on {kind} produced unknown state '{target}'")]
    UnknownTargetState {
        from: String,
        kind: String,
        target: String,
    },

    /// A hook failed. State changes made before the hook ran are kept.
    #[error("Hook {hook} failed: {source}")]
    Hook {
        hook: HookKind,
        #[source]
        source: HookError,
    },
}
