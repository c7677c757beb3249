//! Crate-level error type.

use crate::core::SetupError;
use crate::machine::OperationError;
use thiserror::Error;

/// Either family of errors, for callers that configure and dispatch in
/// the same `?` chain.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Result type alias for mixed setup and dispatch code.
pub type Result<T> = std::result::Result<T, Error>;
