//! The stateful machine instance and its dispatch algorithm.

use super::error::OperationError;
use crate::builder::MachineBuilder;
use crate::config::{EventHooks, HookError, HookKind, Policy};
use crate::core::{Message, Registry, SetupError, State, StateHistory, StateTransition};
use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Lifecycle of a machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MachineStatus {
    /// No starting state was registered; every dispatch fails.
    Unstarted,
    /// The machine occupies a non-final state.
    Running,
    /// A final state was entered. Absorbing.
    Finished,
}

/// A finite state machine driven by messages.
///
/// Machines are produced by a [`MachineBuilder`] and never gain states or
/// rules afterwards. To extend a machine, derive a builder from it with
/// [`to_builder`](Self::to_builder); the source machine is left untouched.
///
/// # Example
///
/// ```rust
/// use statewright::{message_enum, state_enum, MachineBuilder};
///
/// state_enum! {
///     enum Window { Closed, Opened }
/// }
///
/// message_enum! {
///     enum WindowMessage { Open, Close }
/// }
///
/// # fn main() -> Result<(), statewright::Error> {
/// let mut window = MachineBuilder::<Window, WindowMessage>::new()
///     .starting_state(Window::Closed)?
///     .state(Window::Opened)?
///     .transition(Window::Closed, WindowMessage::Open, Window::Opened)?
///     .transition(Window::Opened, WindowMessage::Close, Window::Closed)?
///     .build();
///
/// window.dispatch(&WindowMessage::Open)?;
/// assert_eq!(window.current_state(), Some(&Window::Opened));
/// # Ok(())
/// # }
/// ```
pub struct StateMachine<S: State, M: Message> {
    registry: Registry<S, M>,
    hooks: Arc<EventHooks<S, M>>,
    current: Option<S>,
    finished: bool,
    history: StateHistory<S>,
}

impl<S: State, M: Message> StateMachine<S, M> {
    /// Create an empty, unstarted machine with the default policy and
    /// no-op hooks.
    pub fn new() -> Self {
        MachineBuilder::new().build()
    }

    /// Start a fresh builder with the default policy and no-op hooks.
    pub fn builder() -> MachineBuilder<S, M> {
        MachineBuilder::new()
    }

    /// Build a machine by handing a fresh builder to `configure`.
    ///
    /// Any setup error returned by the callback is returned unchanged and
    /// no machine is produced.
    pub fn configure<F>(policy: Policy, hooks: EventHooks<S, M>, configure: F) -> Result<Self, SetupError>
    where
        F: FnOnce(MachineBuilder<S, M>) -> Result<MachineBuilder<S, M>, SetupError>,
    {
        let builder = configure(MachineBuilder::with_config(policy, hooks))?;
        Ok(builder.build())
    }

    pub(crate) fn from_parts(
        registry: Registry<S, M>,
        hooks: Arc<EventHooks<S, M>>,
        current: Option<S>,
        finished: bool,
        history: StateHistory<S>,
    ) -> Self {
        Self {
            registry,
            hooks,
            current,
            finished,
            history,
        }
    }

    /// Derive a builder seeded with a deep copy of this machine's registry
    /// and its runtime state. Hooks are shared.
    pub fn to_builder(&self) -> MachineBuilder<S, M> {
        MachineBuilder::derive(self)
    }

    /// Feed one message to the machine.
    ///
    /// Checks run in order: message validity, started, finished. Then the
    /// rule for `(current state, message kind)` is looked up:
    ///
    /// - no rule: `on_no_transition` fires and the state is unchanged;
    /// - rule: its target is evaluated and must be a known state, then
    ///   `on_leaving_state`, the state change, `on_entering_state`,
    ///   `on_entering_final_state` (final targets only) and `on_transition`
    ///   run in that order. Self-transitions run the full sequence.
    ///
    /// The state change is committed before `on_entering_state` runs. If
    /// that or any later hook fails, the error is returned but the machine
    /// stays in the new state, and a final target still finishes it.
    pub fn dispatch(&mut self, message: &M) -> Result<(), OperationError> {
        if !message.is_valid() {
            return Err(OperationError::InvalidMessage {
                kind: format!("{:?}", message.kind()),
            });
        }

        let Some(current) = self.current.as_ref() else {
            return Err(OperationError::NotInitialized);
        };

        if self.finished {
            if self.registry.policy().reject_dispatch_when_finished {
                return Err(OperationError::MachineFinished {
                    state: current.name().to_string(),
                });
            }
            warn!(
                state = current.name(),
                kind = ?message.kind(),
                "machine finished, ignoring message"
            );
            return Ok(());
        }

        let Some(target) = self.registry.resolve(current, message) else {
            trace!(state = current.name(), kind = ?message.kind(), "no transition");
            return (self.hooks.on_no_transition)(message, current)
                .map_err(hook_failed(HookKind::NoTransition));
        };

        if !self.registry.contains_state(&target) {
            return Err(OperationError::UnknownTargetState {
                from: current.name().to_string(),
                kind: format!("{:?}", message.kind()),
                target: target.name().to_string(),
            });
        }

        let from = current.clone();
        self.commit(message, from, target)
    }

    fn commit(&mut self, message: &M, from: S, to: S) -> Result<(), OperationError> {
        (self.hooks.on_leaving_state)(&from).map_err(hook_failed(HookKind::LeavingState))?;

        debug!(from = from.name(), to = to.name(), "state changed");
        self.current = Some(to.clone());
        let entered_final = self.registry.is_final(&to);
        if entered_final {
            self.finished = true;
        }
        self.history.record(StateTransition {
            from,
            to: to.clone(),
            trigger: format!("{:?}", message.kind()),
            timestamp: Utc::now(),
        });

        (self.hooks.on_entering_state)(&to).map_err(hook_failed(HookKind::EnteringState))?;

        if entered_final {
            debug!(state = to.name(), "entered final state");
            (self.hooks.on_entering_final_state)(&to)
                .map_err(hook_failed(HookKind::EnteringFinalState))?;
        }

        (self.hooks.on_transition)(message, &to).map_err(hook_failed(HookKind::Transition))
    }

    /// The state the machine occupies, or `None` if it never started.
    pub fn current_state(&self) -> Option<&S> {
        self.current.as_ref()
    }

    pub fn is_started(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn status(&self) -> MachineStatus {
        match (&self.current, self.finished) {
            (None, _) => MachineStatus::Unstarted,
            (Some(_), false) => MachineStatus::Running,
            (Some(_), true) => MachineStatus::Finished,
        }
    }

    /// Committed transitions, oldest first, up to the configured limit.
    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    pub fn registry(&self) -> &Registry<S, M> {
        &self.registry
    }

    pub fn policy(&self) -> Policy {
        self.registry.policy()
    }

    pub(crate) fn hooks(&self) -> &Arc<EventHooks<S, M>> {
        &self.hooks
    }
}

impl<S: State, M: Message> Default for StateMachine<S, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, M: Message> fmt::Debug for StateMachine<S, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("finished", &self.finished)
            .field("registry", &self.registry)
            .field("history", &self.history.len())
            .finish_non_exhaustive()
    }
}

fn hook_failed(hook: HookKind) -> impl FnOnce(HookError) -> OperationError {
    move |source| OperationError::Hook { hook, source }
}
