//! The runtime side of the crate: a built machine and its dispatch loop.
//!
//! A [`StateMachine`] owns its registry and runtime state exclusively.
//! Dispatch is synchronous and runs entirely on the caller's thread; hooks
//! are invoked inline.

mod engine;
mod error;

pub use engine::{MachineStatus, StateMachine};
pub use error::OperationError;
