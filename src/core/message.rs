//! Messages that drive a state machine.
//!
//! A message is an opaque input value. Rule lookup uses only the message's
//! [`Kind`](Message::Kind), so payload fields never affect which rule is
//! selected, only (through the rule itself) which state it leads to.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for messages accepted by [`StateMachine::dispatch`](crate::StateMachine::dispatch).
///
/// # Example
///
/// ```rust
/// use statewright::core::Message;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum DoorKind {
///     Open,
///     Lock,
/// }
///
/// #[derive(Debug)]
/// enum DoorMessage {
///     Open,
///     Lock { code: u32 },
/// }
///
/// impl Message for DoorMessage {
///     type Kind = DoorKind;
///
///     fn kind(&self) -> DoorKind {
///         match self {
///             Self::Open => DoorKind::Open,
///             Self::Lock { .. } => DoorKind::Lock,
///         }
///     }
/// }
///
/// assert_eq!(DoorMessage::Lock { code: 1234 }.kind(), DoorKind::Lock);
/// ```
pub trait Message: Debug + Send + Sync + 'static {
    /// Tag identifying which transition rule applies to this message.
    type Kind: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    /// The dispatch tag for this message.
    fn kind(&self) -> Self::Kind;

    /// Whether this message may be dispatched at all.
    ///
    /// Messages reporting `false` are rejected with
    /// [`OperationError::InvalidMessage`](crate::OperationError::InvalidMessage)
    /// before any other check. Default implementation returns `true`.
    fn is_valid(&self) -> bool {
        true
    }
}
