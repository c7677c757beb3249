//! Core state machine types.
//!
//! This module contains the building blocks every machine is made of:
//! - State and message abstractions via the `State` and `Message` traits
//! - The `Registry` of states, final states and transition rules
//! - In-memory history of committed transitions
//! - Setup errors raised while registering states and rules

mod error;
mod history;
mod message;
mod registry;
mod state;

pub use error::SetupError;
pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_LIMIT};
pub use message::Message;
pub use registry::{Registry, TransitionRule};
pub use state::State;
