//! State transition history tracking.
//!
//! Every committed transition of a [`StateMachine`](crate::StateMachine)
//! is appended here, up to a configurable bound, so embedders can inspect the path a machine took
//! without wiring their own hooks.

use super::state::State;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single committed state transition.
///
/// # Example
///
/// ```rust
/// use statewright::core::{State, StateTransition};
/// use chrono::Utc;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum TaskState {
///     Pending,
///     Running,
/// }
///
/// impl State for TaskState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Pending => "Pending",
///             Self::Running => "Running",
///         }
///     }
/// }
///
/// let transition = StateTransition {
///     from: TaskState::Pending,
///     to: TaskState::Running,
///     trigger: "Start".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to, TaskState::Running);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Debug rendering of the message kind that triggered the transition
    pub trigger: String,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

/// Number of transitions a machine keeps unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// Ordered history of committed state transitions.
///
/// The history keeps at most `limit` entries, dropping the oldest first,
/// so a long-lived machine does not grow without bound.
#[derive(Clone, Debug)]
pub struct StateHistory<S: State> {
    transitions: VecDeque<StateTransition<S>>,
    limit: Option<usize>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history bounded by [`DEFAULT_HISTORY_LIMIT`].
    pub fn new() -> Self {
        Self::with_limit(Some(DEFAULT_HISTORY_LIMIT))
    }

    /// Create a new empty history keeping at most `limit` transitions.
    /// `None` keeps every transition.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            transitions: VecDeque::new(),
            limit,
        }
    }

    /// Change the bound, dropping the oldest entries if it shrank.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
        self.trim();
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Append a transition, evicting the oldest one when full.
    pub fn record(&mut self, transition: StateTransition<S>) {
        self.transitions.push_back(transition);
        self.trim();
    }

    fn trim(&mut self) {
        if let Some(limit) = self.limit {
            while self.transitions.len() > limit {
                self.transitions.pop_front();
            }
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns references to states in order: the `from` state of the
    /// first retained transition, then the `to` state of each transition.
    /// Self-transitions appear as repeated entries.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time elapsed between the first and the last retained transition.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Retained transitions, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &StateTransition<S>> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
