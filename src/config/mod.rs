//! Configuration attached to a machine at construction time.
//!
//! Both the [`Policy`] and the [`EventHooks`] are immutable once a machine
//! is built. Machines derived from one another share the same hook set.

mod hooks;
mod policy;

pub use hooks::{EventHooks, HookError, HookKind, HookResult};
pub use policy::Policy;
