//! Registry of known states, final states and transition rules.

use super::error::SetupError;
use super::message::Message;
use super::state::State;
use crate::config::Policy;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Function computing the destination state for a message.
///
/// Rules are evaluated at dispatch time, so one message kind can lead to
/// different states depending on its payload. The returned state is
/// validated against the registry after evaluation.
pub type TransitionRule<S, M> = Arc<dyn Fn(&S, &M) -> S + Send + Sync>;

/// Owns the set of valid states, the subset marked final, the starting
/// state and the lookup table from `(state, message kind)` to rule.
///
/// Cloning a registry deep-copies its sets and table. Rule closures are
/// immutable and shared between clones.
pub struct Registry<S: State, M: Message> {
    policy: Policy,
    states: HashSet<S>,
    final_states: HashSet<S>,
    starting_state: Option<S>,
    transitions: HashMap<(S, M::Kind), TransitionRule<S, M>>,
}

impl<S: State, M: Message> Registry<S, M> {
    /// Create an empty registry whose duplicate checks follow `policy`.
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            states: HashSet::new(),
            final_states: HashSet::new(),
            starting_state: None,
            transitions: HashMap::new(),
        }
    }

    /// Register a state.
    ///
    /// Re-adding a known state fails with [`SetupError::DuplicateState`]
    /// unless the policy tolerates duplicates, in which case it is a no-op.
    pub fn add_state(&mut self, state: S) -> Result<(), SetupError> {
        if self.states.contains(&state) {
            if self.policy.reject_duplicate_states {
                return Err(SetupError::DuplicateState {
                    state: state.name().to_string(),
                });
            }
            warn!(state = state.name(), "ignoring duplicate state");
            return Ok(());
        }

        debug!(state = state.name(), "registered state");
        self.states.insert(state);
        Ok(())
    }

    /// Register a state and mark it final. Marking is idempotent.
    ///
    /// A known state that already has outgoing rules cannot become final
    /// and fails with [`SetupError::TransitionFromFinalState`].
    pub fn add_final_state(&mut self, state: S) -> Result<(), SetupError> {
        if self.transitions.keys().any(|(from, _)| *from == state) {
            return Err(SetupError::TransitionFromFinalState {
                state: state.name().to_string(),
            });
        }

        self.add_state(state.clone())?;
        debug!(state = state.name(), "marked state final");
        self.final_states.insert(state);
        Ok(())
    }

    /// Register the unique starting state.
    pub fn add_starting_state(&mut self, state: S) -> Result<(), SetupError> {
        if let Some(existing) = &self.starting_state {
            return Err(SetupError::MultipleStartingStates {
                existing: existing.name().to_string(),
                rejected: state.name().to_string(),
            });
        }

        self.add_state(state.clone())?;
        debug!(state = state.name(), "set starting state");
        self.starting_state = Some(state);
        Ok(())
    }

    /// Register a rule leading from `from` to the fixed state `to` on
    /// messages of `kind`. Both endpoints must already be known.
    pub fn add_transition(&mut self, from: S, kind: M::Kind, to: S) -> Result<(), SetupError> {
        self.ensure_known(&from)?;
        self.ensure_known(&to)?;
        self.add_transition_with(from, kind, move |_: &S, _: &M| to.clone())
    }

    /// Register a rule whose target is computed from the message at
    /// dispatch time.
    ///
    /// Fails if `from` is unknown or final, or if a rule for
    /// `(from, kind)` exists and the policy rejects duplicates. With
    /// duplicates tolerated, the new rule replaces the old one.
    pub fn add_transition_with<F>(&mut self, from: S, kind: M::Kind, rule: F) -> Result<(), SetupError>
    where
        F: Fn(&S, &M) -> S + Send + Sync + 'static,
    {
        self.ensure_known(&from)?;

        if self.final_states.contains(&from) {
            return Err(SetupError::TransitionFromFinalState {
                state: from.name().to_string(),
            });
        }

        let key = (from, kind);
        if self.transitions.contains_key(&key) {
            if self.policy.reject_duplicate_transitions {
                return Err(SetupError::DuplicateTransition {
                    from: key.0.name().to_string(),
                    kind: format!("{:?}", key.1),
                });
            }
            warn!(
                from = key.0.name(),
                kind = ?key.1,
                "overwriting existing transition"
            );
        }

        debug!(from = key.0.name(), kind = ?key.1, "registered transition");
        self.transitions.insert(key, Arc::new(rule));
        Ok(())
    }

    /// Look up the rule for `(from, message.kind())` and evaluate it.
    ///
    /// Returns `None` if no rule is registered. The returned state is not
    /// validated.
    pub fn resolve(&self, from: &S, message: &M) -> Option<S> {
        // Keys own their state, so the lookup key is built from a clone.
        let key = (from.clone(), message.kind());
        self.transitions.get(&key).map(|rule| rule(from, message))
    }

    /// Whether `state` has been registered.
    pub fn contains_state(&self, state: &S) -> bool {
        self.states.contains(state)
    }

    /// Whether `state` is marked final.
    pub fn is_final(&self, state: &S) -> bool {
        self.final_states.contains(state)
    }

    /// Whether a rule exists for `(from, kind)`.
    pub fn has_transition(&self, from: &S, kind: &M::Kind) -> bool {
        self.transitions.contains_key(&(from.clone(), kind.clone()))
    }

    /// The registered starting state, if any.
    pub fn starting_state(&self) -> Option<&S> {
        self.starting_state.as_ref()
    }

    /// All registered states, in no particular order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.states.iter()
    }

    /// States marked final, in no particular order.
    pub fn final_states(&self) -> impl Iterator<Item = &S> {
        self.final_states.iter()
    }

    /// Number of registered rules.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// The policy governing duplicate checks.
    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub(crate) fn set_policy(&mut self, policy: Policy) {
        self.policy = policy;
    }

    fn ensure_known(&self, state: &S) -> Result<(), SetupError> {
        if self.states.contains(state) {
            Ok(())
        } else {
            Err(SetupError::UnknownEndpoint {
                state: state.name().to_string(),
            })
        }
    }
}

impl<S: State, M: Message> Default for Registry<S, M> {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}

impl<S: State, M: Message> Clone for Registry<S, M> {
    fn clone(&self) -> Self {
        Self {
            policy: self.policy,
            states: self.states.clone(),
            final_states: self.final_states.clone(),
            starting_state: self.starting_state.clone(),
            transitions: self
                .transitions
                .iter()
                .map(|(key, rule)| (key.clone(), Arc::clone(rule)))
                .collect(),
        }
    }
}

impl<S: State, M: Message> fmt::Debug for Registry<S, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("policy", &self.policy)
            .field("states", &self.states)
            .field("final_states", &self.final_states)
            .field("starting_state", &self.starting_state)
            .field("transitions", &self.transitions.len())
            .finish()
    }
}
