//! Report Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};

/// A report error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for report operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A built-in template failed to compile.
    #[display("invalid report template: {_0}")]
    Template(#[error(not(source))] &'static str),
    /// A template failed while rendering (missing or unformattable value).
    #[display("failed to render report: {_0}")]
    Render(#[error(not(source))] &'static str),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Templates are static; rendering the same input fails the same way.
        false
    }
}
