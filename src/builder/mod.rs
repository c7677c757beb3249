//! Builder API for ergonomic state machine construction.
//!
//! This module provides the fluent [`MachineBuilder`] and the
//! `state_enum!`/`message_enum!` macros for declaring states and messages
//! with minimal boilerplate.

mod machine;
pub mod macros;

pub use machine::MachineBuilder;
