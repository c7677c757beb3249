//! Core State trait for state machine states.
//!
//! States are opaque, caller-defined values. The engine only needs to
//! compare, hash and clone them, and to name them in diagnostics.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// Nothing about a state's internal structure is imposed: whether a state
/// is final or starting is decided by how it is registered with a
/// [`Registry`](crate::core::Registry), not by the type itself.
///
/// # Required Traits
///
/// - `Clone`: States are copied into the registry and the history
/// - `Eq` + `Hash`: States are set members and part of transition keys
/// - `Debug`: States must be debuggable for diagnostics
///
/// # Example
///
/// ```rust
/// use statewright::core::State;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum TaskState {
///     Pending,
///     Running,
///     Complete,
/// }
///
/// impl State for TaskState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Pending => "Pending",
///             Self::Running => "Running",
///             Self::Complete => "Complete",
///         }
///     }
/// }
///
/// assert_eq!(TaskState::Running.name(), "Running");
/// ```
pub trait State: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Get the state's name for display/logging and error values.
    fn name(&self) -> &str;
}
