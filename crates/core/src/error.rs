//! Foundation error model.

use thiserror::Error;

/// Result type used across the form foundation.
pub type CoreResult<T> = Result<T, CoreError>;

/// Foundation-level error.
///
/// Field-level validation failures are **not** errors in this sense: they are
/// expected form outcomes, carried per field by
/// [`ValidationErrors`](crate::validate::ValidationErrors) and rendered
/// inline. This enum covers genuine misuse of the foundation types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl CoreError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
