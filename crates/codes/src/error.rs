//! Code Database Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction. Only loading the database can fail: once a
//! [`Database`](crate::Database) exists, lookups, extraction and enrichment
//! are infallible, and an unknown code is ordinary data rather than an error.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A code database error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for code database operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The database source does not exist or could not be read.
    #[display("database source unreadable: {}", _0.display())]
    Unreadable(#[error(not(source))] PathBuf),
    /// The database source is not a well-formed collection of records.
    #[display("malformed database source: {_0}")]
    Malformed(#[error(not(source))] String),
    /// A record is missing a required field (or it is blank).
    #[display("record {record} is missing required field '{field}'")]
    MissingField {
        /// The record's code, or its position when the code itself is missing.
        record: String,
        /// The missing field.
        field: &'static str,
    },
    /// A value is not a valid OBD-II trouble code.
    #[display("invalid diagnostic trouble code: {_0:?}")]
    InvalidCode(#[error(not(source))] String),
    /// The same normalized code appears more than once in the source.
    #[display("duplicate diagnostic trouble code: {_0}")]
    DuplicateCode(#[error(not(source))] String),
    /// A category letter or name was not recognised.
    #[display("unknown code category: {_0:?}")]
    UnknownCategory(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Sources are loaded once at startup; a broken source stays broken.
        false
    }

    /// Returns `true` when the source could not be turned into records at all.
    /// Duplicate codes are reported separately.
    pub fn is_data_load(&self) -> bool {
        matches!(self, Self::Unreadable(_) | Self::Malformed(_) | Self::MissingField { .. } | Self::InvalidCode(_))
    }
}
