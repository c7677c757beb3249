//! Lifecycle hooks invoked by the engine during dispatch.
//!
//! Every hook is always present. Hooks that the embedder does not set are
//! no-ops, so the dispatch path never has to check for a missing callback.

use crate::core::{Message, State};
use std::fmt;
use std::sync::Arc;

/// Error type hooks may return to abort the rest of a dispatch.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Return type of every hook.
pub type HookResult = Result<(), HookError>;

type StateHook<S> = Arc<dyn Fn(&S) -> HookResult + Send + Sync>;
type MessageHook<S, M> = Arc<dyn Fn(&M, &S) -> HookResult + Send + Sync>;

/// Identifies a hook, used when reporting hook failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookKind {
    LeavingState,
    EnteringState,
    EnteringFinalState,
    Transition,
    NoTransition,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LeavingState => "on_leaving_state",
            Self::EnteringState => "on_entering_state",
            Self::EnteringFinalState => "on_entering_final_state",
            Self::Transition => "on_transition",
            Self::NoTransition => "on_no_transition",
        };
        f.write_str(name)
    }
}

/// The set of callbacks a [`StateMachine`](crate::StateMachine) invokes.
///
/// When a rule matches, hooks fire in this order:
///
/// 1. `on_leaving_state(previous)`
/// 2. `on_entering_state(current)`, after the current state was updated
/// 3. `on_entering_final_state(current)`, only if `current` is final
/// 4. `on_transition(message, current)`
///
/// When no rule matches, only `on_no_transition(message, current)` fires.
///
/// # Example
///
/// ```rust
/// use statewright::{message_enum, state_enum, EventHooks};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// state_enum! {
///     enum Light { Off, On }
/// }
///
/// message_enum! {
///     enum Switch { Flip }
/// }
///
/// let entered = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&entered);
///
/// let hooks = EventHooks::<Light, Switch>::new().on_entering_state(move |_| {
///     counter.fetch_add(1, Ordering::SeqCst);
///     Ok(())
/// });
/// # let _ = hooks;
/// ```
pub struct EventHooks<S: State, M: Message> {
    pub(crate) on_leaving_state: StateHook<S>,
    pub(crate) on_entering_state: StateHook<S>,
    pub(crate) on_entering_final_state: StateHook<S>,
    pub(crate) on_transition: MessageHook<S, M>,
    pub(crate) on_no_transition: MessageHook<S, M>,
}

impl<S: State, M: Message> EventHooks<S, M> {
    /// Create a hook set where every hook is a no-op.
    pub fn new() -> Self {
        Self {
            on_leaving_state: Arc::new(|_| Ok(())),
            on_entering_state: Arc::new(|_| Ok(())),
            on_entering_final_state: Arc::new(|_| Ok(())),
            on_transition: Arc::new(|_, _| Ok(())),
            on_no_transition: Arc::new(|_, _| Ok(())),
        }
    }

    /// Called with the state being left, before the current state changes.
    pub fn on_leaving_state<F>(mut self, hook: F) -> Self
    where
        F: Fn(&S) -> HookResult + Send + Sync + 'static,
    {
        self.on_leaving_state = Arc::new(hook);
        self
    }

    /// Called with the newly entered state, including self-transitions.
    pub fn on_entering_state<F>(mut self, hook: F) -> Self
    where
        F: Fn(&S) -> HookResult + Send + Sync + 'static,
    {
        self.on_entering_state = Arc::new(hook);
        self
    }

    /// Called when the entered state is final, after `on_entering_state`.
    ///
    /// A machine may have several final states; the hook receives the one
    /// that was reached.
    pub fn on_entering_final_state<F>(mut self, hook: F) -> Self
    where
        F: Fn(&S) -> HookResult + Send + Sync + 'static,
    {
        self.on_entering_final_state = Arc::new(hook);
        self
    }

    /// Called last, with the message that caused the transition and the
    /// state the machine ended up in.
    pub fn on_transition<F>(mut self, hook: F) -> Self
    where
        F: Fn(&M, &S) -> HookResult + Send + Sync + 'static,
    {
        self.on_transition = Arc::new(hook);
        self
    }

    /// Called when no rule matches the message in the current state.
    pub fn on_no_transition<F>(mut self, hook: F) -> Self
    where
        F: Fn(&M, &S) -> HookResult + Send + Sync + 'static,
    {
        self.on_no_transition = Arc::new(hook);
        self
    }
}

impl<S: State, M: Message> Default for EventHooks<S, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, M: Message> Clone for EventHooks<S, M> {
    fn clone(&self) -> Self {
        Self {
            on_leaving_state: Arc::clone(&self.on_leaving_state),
            on_entering_state: Arc::clone(&self.on_entering_state),
            on_entering_final_state: Arc::clone(&self.on_entering_final_state),
            on_transition: Arc::clone(&self.on_transition),
            on_no_transition: Arc::clone(&self.on_no_transition),
        }
    }
}

impl<S: State, M: Message> fmt::Debug for EventHooks<S, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHooks").finish_non_exhaustive()
    }
}
