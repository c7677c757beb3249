//! Statewright: an embeddable finite state machine engine
//!
//! A machine is a fixed set of caller-defined states, one starting state,
//! any number of final states and a table of transition rules keyed by
//! `(state, message kind)`. Messages are dispatched one at a time; each
//! dispatch either follows a rule (firing lifecycle hooks in a fixed
//! order) or reports that no rule matched.
//!
//! # Core Concepts
//!
//! - **State** / **Message**: caller-defined types via the `State` and
//!   `Message` traits, or the `state_enum!` / `message_enum!` macros
//! - **Registry**: states, final states and transition rules
//! - **Policy**: whether duplicates and post-finish dispatch are errors
//! - **EventHooks**: callbacks for leaving, entering, finishing and
//!   (not) transitioning
//! - **MachineBuilder**: fluent construction, including deriving a new
//!   machine from a running one
//!
//! # Example
//!
//! ```rust
//! use statewright::{message_enum, state_enum, MachineBuilder};
//!
//! state_enum! {
//!     enum PipelineStep {
//!         Start,
//!         Middle,
//!         Finish,
//!     }
//! }
//!
//! message_enum! {
//!     enum Operation {
//!         First,
//!         Second,
//!     }
//! }
//!
//! # fn main() -> statewright::Result<()> {
//! let mut pipeline = MachineBuilder::<PipelineStep, Operation>::new()
//!     .starting_state(PipelineStep::Start)?
//!     .state(PipelineStep::Middle)?
//!     .final_state(PipelineStep::Finish)?
//!     .transition(PipelineStep::Start, Operation::First, PipelineStep::Middle)?
//!     .transition(PipelineStep::Middle, Operation::Second, PipelineStep::Finish)?
//!     .build();
//!
//! pipeline.dispatch(&Operation::First)?;
//! pipeline.dispatch(&Operation::Second)?;
//! assert!(pipeline.is_finished());
//!
//! // Finished machines ignore further messages under the default policy.
//! pipeline.dispatch(&Operation::Second)?;
//! assert_eq!(pipeline.current_state(), Some(&PipelineStep::Finish));
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod error;
pub mod machine;

// Re-export commonly used types
pub use crate::builder::MachineBuilder;
pub use crate::config::{EventHooks, HookError, HookKind, HookResult, Policy};
pub use crate::core::{
    Message, Registry, SetupError, State, StateHistory, StateTransition, DEFAULT_HISTORY_LIMIT,
};
pub use crate::error::{Error, Result};
pub use crate::machine::{MachineStatus, OperationError, StateMachine};
