//! Macros for declaring state and message enums with minimal boilerplate.

/// Declare a fieldless enum and implement [`State`](crate::core::State) for it.
///
/// The enum derives `Clone, Copy, PartialEq, Eq, Hash, Debug`; each
/// variant's name is its identifier.
///
/// # Example
///
/// ```
/// use statewright::state_enum;
/// use statewright::core::State;
///
/// state_enum! {
///     pub enum WorkflowState {
///         Start,
///         Processing,
///         Done,
///     }
/// }
///
/// assert_eq!(WorkflowState::Processing.name(), "Processing");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

/// Declare a fieldless enum and implement [`Message`](crate::core::Message)
/// for it, with each variant acting as its own kind.
///
/// # Example
///
/// ```
/// use statewright::message_enum;
/// use statewright::core::Message;
///
/// message_enum! {
///     pub enum WindowMessage {
///         Open,
///         Close,
///     }
/// }
///
/// assert_eq!(WindowMessage::Open.kind(), WindowMessage::Open);
/// ```
#[macro_export]
macro_rules! message_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Message for $name {
            type Kind = Self;

            fn kind(&self) -> Self {
                *self
            }
        }
    };
}
