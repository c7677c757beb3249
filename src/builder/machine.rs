//! Builder for constructing state machines.

use crate::config::{EventHooks, Policy};
use crate::core::{Message, Registry, SetupError, State, StateHistory};
use crate::machine::StateMachine;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Runtime fields carried over when a builder is derived from a machine.
struct Carried<S: State> {
    current: Option<S>,
    finished: bool,
    history: StateHistory<S>,
}

impl<S: State> Default for Carried<S> {
    fn default() -> Self {
        Self {
            current: None,
            finished: false,
            history: StateHistory::new(),
        }
    }
}

/// Builder for constructing state machines with a fluent API.
///
/// Registration methods mirror [`Registry`] and surface the same
/// [`SetupError`]s immediately. They consume the builder and hand it back,
/// so a configuration reads as one `?` chain.
///
/// A builder derived from a running machine (see [`derive`](Self::derive))
/// starts from a deep copy of that machine's registry and continues from
/// its current state; building it never touches the source machine.
pub struct MachineBuilder<S: State, M: Message> {
    registry: Registry<S, M>,
    hooks: Arc<EventHooks<S, M>>,
    carried: Carried<S>,
}

impl<S: State, M: Message> MachineBuilder<S, M> {
    /// Create a builder with the default policy and no-op hooks.
    pub fn new() -> Self {
        Self::with_config(Policy::default(), EventHooks::new())
    }

    /// Create a builder with the given policy and hooks.
    pub fn with_config(policy: Policy, hooks: EventHooks<S, M>) -> Self {
        Self {
            registry: Registry::new(policy),
            hooks: Arc::new(hooks),
            carried: Carried::default(),
        }
    }

    /// Seed a builder from an existing machine.
    ///
    /// States, final states and the transition table are copied; the policy
    /// is copied and the hook set is shared. The machine's current state,
    /// finished flag and history are carried into the machine this builder
    /// produces.
    pub fn derive(machine: &StateMachine<S, M>) -> Self {
        debug!(
            state = machine.current_state().map(State::name),
            finished = machine.is_finished(),
            "deriving builder from machine"
        );
        Self {
            registry: machine.registry().clone(),
            hooks: Arc::clone(machine.hooks()),
            carried: Carried {
                current: machine.current_state().cloned(),
                finished: machine.is_finished(),
                history: machine.history().clone(),
            },
        }
    }

    /// Replace the policy. Registrations already made are not re-checked.
    pub fn policy(mut self, policy: Policy) -> Self {
        self.registry.set_policy(policy);
        self
    }

    /// Replace the hook set for the machine being built.
    pub fn hooks(mut self, hooks: EventHooks<S, M>) -> Self {
        self.hooks = Arc::new(hooks);
        self
    }

    /// Cap the number of transitions kept in the machine's history.
    ///
    /// The oldest entries are dropped first. `None` keeps every transition.
    /// Defaults to [`DEFAULT_HISTORY_LIMIT`](crate::core::DEFAULT_HISTORY_LIMIT).
    pub fn history_limit(mut self, limit: Option<usize>) -> Self {
        self.carried.history.set_limit(limit);
        self
    }

    /// Add a state.
    pub fn state(mut self, state: S) -> Result<Self, SetupError> {
        self.registry.add_state(state)?;
        Ok(self)
    }

    /// Add a final state.
    pub fn final_state(mut self, state: S) -> Result<Self, SetupError> {
        self.registry.add_final_state(state)?;
        Ok(self)
    }

    /// Add the starting state. Only one may be set.
    pub fn starting_state(mut self, state: S) -> Result<Self, SetupError> {
        self.registry.add_starting_state(state)?;
        Ok(self)
    }

    /// Add several states at once, stopping at the first error.
    pub fn states<I>(mut self, states: I) -> Result<Self, SetupError>
    where
        I: IntoIterator<Item = S>,
    {
        for state in states {
            self.registry.add_state(state)?;
        }
        Ok(self)
    }

    /// Add a transition to a fixed target state.
    pub fn transition(mut self, from: S, kind: M::Kind, to: S) -> Result<Self, SetupError> {
        self.registry.add_transition(from, kind, to)?;
        Ok(self)
    }

    /// Add a transition whose target is computed from the message when it
    /// is dispatched.
    pub fn transition_with<F>(mut self, from: S, kind: M::Kind, rule: F) -> Result<Self, SetupError>
    where
        F: Fn(&S, &M) -> S + Send + Sync + 'static,
    {
        self.registry.add_transition_with(from, kind, rule)?;
        Ok(self)
    }

    /// The registry under construction.
    pub fn registry(&self) -> &Registry<S, M> {
        &self.registry
    }

    /// Build the state machine.
    ///
    /// A derived builder resumes from its source machine's state. Otherwise
    /// the machine starts in the registered starting state, or is unstarted
    /// if none was registered. A machine that begins in a final state is
    /// finished from the start.
    pub fn build(self) -> StateMachine<S, M> {
        let Carried {
            current,
            finished,
            history,
        } = self.carried;
        let current = current.or_else(|| self.registry.starting_state().cloned());
        let finished = finished || current.as_ref().is_some_and(|s| self.registry.is_final(s));

        StateMachine::from_parts(self.registry, self.hooks, current, finished, history)
    }
}

impl<S: State, M: Message> Default for MachineBuilder<S, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, M: Message> fmt::Debug for MachineBuilder<S, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineBuilder")
            .field("registry", &self.registry)
            .field("current", &self.carried.current)
            .field("finished", &self.carried.finished)
            .finish_non_exhaustive()
    }
}
