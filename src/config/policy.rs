//! Strictness switches for registration conflicts and post-finish dispatch.

use serde::{Deserialize, Serialize};

/// Controls whether configuration conflicts and dispatch after the machine
/// finished raise errors or are tolerated.
///
/// A `Policy` is an immutable value: it is copied into the registry when a
/// builder is created and cannot change afterwards.
///
/// Missing fields take their defaults when deserialized, so a partial
/// document only needs to name the switches it changes.
///
/// # Example
///
/// ```rust
/// use statewright::Policy;
///
/// let policy = Policy::default().with_reject_dispatch_when_finished(true);
///
/// assert!(policy.reject_duplicate_states);
/// assert!(policy.reject_duplicate_transitions);
/// assert!(policy.reject_dispatch_when_finished);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Adding an already known state is an error. If disabled, it is a no-op.
    /// Enabled by default.
    pub reject_duplicate_states: bool,

    /// Adding a second rule for the same (state, message kind) is an error.
    /// If disabled, the new rule replaces the existing one.
    /// Enabled by default.
    pub reject_duplicate_transitions: bool,

    /// Dispatching to a finished machine is an error. If disabled, the
    /// message is silently ignored. Disabled by default.
    pub reject_dispatch_when_finished: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            reject_duplicate_states: true,
            reject_duplicate_transitions: true,
            reject_dispatch_when_finished: false,
        }
    }
}

impl Policy {
    /// Policy that tolerates every conflict: duplicates are ignored or
    /// overwritten and post-finish messages are dropped.
    pub fn lenient() -> Self {
        Self {
            reject_duplicate_states: false,
            reject_duplicate_transitions: false,
            reject_dispatch_when_finished: false,
        }
    }

    pub fn with_reject_duplicate_states(mut self, reject: bool) -> Self {
        self.reject_duplicate_states = reject;
        self
    }

    pub fn with_reject_duplicate_transitions(mut self, reject: bool) -> Self {
        self.reject_duplicate_transitions = reject;
        self
    }

    pub fn with_reject_dispatch_when_finished(mut self, reject: bool) -> Self {
        self.reject_dispatch_when_finished = reject;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_strict_except_finished_dispatch() {
        let policy = Policy::default();

        assert!(policy.reject_duplicate_states);
        assert!(policy.reject_duplicate_transitions);
        assert!(!policy.reject_dispatch_when_finished);
    }

    #[test]
    fn setters_are_independent() {
        let policy = Policy::default().with_reject_duplicate_transitions(false);

        assert!(policy.reject_duplicate_states);
        assert!(!policy.reject_duplicate_transitions);
        assert!(!policy.reject_dispatch_when_finished);
    }

    #[test]
    fn partial_document_fills_in_defaults() {
        let policy: Policy =
            serde_json::from_str(r#"{ "reject_dispatch_when_finished": true }"#).unwrap();

        assert_eq!(
            policy,
            Policy::default().with_reject_dispatch_when_finished(true)
        );
    }

    #[test]
    fn empty_document_is_default() {
        let policy: Policy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy, Policy::default());
    }

    #[test]
    fn lenient_disables_every_check() {
        let policy = Policy::lenient();

        assert!(!policy.reject_duplicate_states);
        assert!(!policy.reject_duplicate_transitions);
        assert!(!policy.reject_dispatch_when_finished);
    }
}
